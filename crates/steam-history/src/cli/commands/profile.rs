//! Profile snapshot command

use tracing::info;

use crate::cli::Context;
use crate::error::Result;
use crate::models::{self, ProfileSnapshot};
use crate::storage::SnapshotKind;

/// Fetch the player summary and store it as the profile snapshot
pub async fn fetch(ctx: &Context) -> Result<ProfileSnapshot> {
    let client = ctx.client()?;
    info!("fetching Steam profile");

    let player = client.get_player_summary().await?;
    let snapshot = ProfileSnapshot {
        player,
        fetched_at: models::now(),
    };

    let path = ctx
        .store()
        .write_snapshot(SnapshotKind::Profile, &snapshot, snapshot.fetched_at)?;
    info!(path = %path.display(), "profile saved");

    println!("Profile: {}", snapshot.player.personaname);
    Ok(snapshot)
}
