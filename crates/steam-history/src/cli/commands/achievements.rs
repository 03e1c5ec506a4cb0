//! Achievement commands

use tracing::info;

use crate::cli::Context;
use crate::error::Result;
use crate::sync::{AchievementSync, FileCheckpointStore, SyncOptions, SyncReport, SyncStats};

/// Batched, resumable achievement sync over the owned games snapshot
pub async fn sync(ctx: &Context, opts: SyncOptions, state_file: &str) -> Result<SyncReport> {
    // Credentials first so a misconfigured run fails before touching anything
    let client = ctx.client()?;
    let store = ctx.store();
    let games = store.games()?;

    let checkpoints = FileCheckpointStore::new(ctx.data_dir.join(state_file));
    let mut limiter = ctx.rate_limiter();

    let report = AchievementSync::new(&client, &mut limiter, &store)
        .run(&games.games, opts, &checkpoints)
        .await?;

    println!("Achievements: {}", report);
    Ok(report)
}

/// Refresh achievement files of recently played titles
pub async fn update(ctx: &Context) -> Result<SyncStats> {
    let client = ctx.client()?;
    let store = ctx.store();

    let recent = match store.recent_games()? {
        Some(snapshot) if !snapshot.games.is_empty() => snapshot,
        _ => {
            info!("no recently played games, nothing to update");
            println!("No recent games to update");
            return Ok(SyncStats::default());
        }
    };

    let mut limiter = ctx.rate_limiter();
    let stats = AchievementSync::new(&client, &mut limiter, &store)
        .refresh(&recent.games)
        .await?;

    println!("Updated achievements: {}", stats);
    Ok(stats)
}
