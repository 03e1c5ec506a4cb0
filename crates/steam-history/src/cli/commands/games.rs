//! Owned games snapshot commands

use tracing::info;

use crate::cli::commands::covers::download_cover;
use crate::cli::Context;
use crate::error::Result;
use crate::models::{self, GamesSnapshot};
use crate::storage::SnapshotKind;

/// Fetch the owned games list and store it as the games snapshot
pub async fn fetch(ctx: &Context) -> Result<GamesSnapshot> {
    let client = ctx.client()?;
    info!("fetching owned games");

    let owned = client.get_owned_games().await?;
    let snapshot = GamesSnapshot {
        game_count: owned.game_count,
        games: owned.games,
        fetched_at: models::now(),
    };

    let path = ctx
        .store()
        .write_snapshot(SnapshotKind::Games, &snapshot, snapshot.fetched_at)?;
    info!(
        path = %path.display(),
        games = snapshot.game_count,
        playtime_hours = snapshot.total_playtime_hours(),
        "games saved"
    );

    println!(
        "Games: {} ({} hours played)",
        snapshot.game_count,
        snapshot.total_playtime_hours()
    );
    Ok(snapshot)
}

/// Compare the owned list with the stored snapshot; on additions, rewrite
/// the snapshot and fetch covers for the new titles.
///
/// Returns the app ids that were added.
pub async fn check_new(ctx: &Context) -> Result<Vec<u32>> {
    let client = ctx.client()?;
    let store = ctx.store();
    info!("checking for new games");

    let owned = client.get_owned_games().await?;
    let Some(previous) = store.read_latest::<GamesSnapshot>(SnapshotKind::Games)? else {
        info!("no previous games snapshot to compare against");
        return Ok(Vec::new());
    };

    let current = GamesSnapshot {
        game_count: owned.games.len() as u32,
        games: owned.games,
        fetched_at: models::now(),
    };

    let added: Vec<_> = current.added_since(&previous).into_iter().cloned().collect();
    if added.is_empty() {
        println!("No new games found");
        return Ok(Vec::new());
    }

    println!("Found {} new game(s):", added.len());
    for game in &added {
        println!("  + {}", game.name);
    }

    store.write_snapshot(SnapshotKind::Games, &current, current.fetched_at)?;

    let cdn = ctx.cdn_client()?;
    for game in &added {
        download_cover(&cdn, &store, game).await;
    }

    Ok(added.iter().map(|g| g.appid).collect())
}
