//! Cover art download

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cli::Context;
use crate::client::SteamClient;
use crate::error::Result;
use crate::models::Game;
use crate::storage::SnapshotStore;

/// Pause between cover downloads
const COVER_DELAY: Duration = Duration::from_millis(100);

/// Counts reported by a cover run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Download the cover of one title, trying the tall library art first.
///
/// Failures are logged; returns whether a file was written.
pub async fn download_cover(cdn: &SteamClient, store: &SnapshotStore, game: &Game) -> bool {
    for url in cdn.cover_urls(game.appid) {
        match cdn.download(&url).await {
            Ok(bytes) => match store.write_cover(game.appid, &bytes) {
                Ok(path) => {
                    debug!(appid = game.appid, path = %path.display(), "cover saved");
                    return true;
                }
                Err(e) => {
                    warn!(appid = game.appid, error = %e, "failed to write cover");
                    return false;
                }
            },
            Err(e) => debug!(appid = game.appid, %url, error = %e, "cover candidate unavailable"),
        }
    }

    warn!(appid = game.appid, name = %game.name, "failed to download cover");
    false
}

/// Download covers for every owned title that does not have one yet
pub async fn download(ctx: &Context) -> Result<CoverStats> {
    let store = ctx.store();
    let games = store.games()?;
    let cdn = ctx.cdn_client()?;

    info!(games = games.games.len(), "downloading covers");

    let mut stats = CoverStats::default();
    for game in &games.games {
        if store.has_cover(game.appid) {
            stats.skipped += 1;
            continue;
        }

        if stats.downloaded + stats.failed > 0 {
            tokio::time::sleep(COVER_DELAY).await;
        }

        if download_cover(&cdn, &store, game).await {
            stats.downloaded += 1;
        } else {
            stats.failed += 1;
        }
    }

    println!(
        "Covers: {} new, {} skipped, {} failed",
        stats.downloaded, stats.skipped, stats.failed
    );
    Ok(stats)
}
