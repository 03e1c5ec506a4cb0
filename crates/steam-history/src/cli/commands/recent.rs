//! Recently played games snapshot command

use chrono::SecondsFormat;
use serde_json::Value;
use tracing::info;

use crate::cli::Context;
use crate::error::Result;
use crate::models;
use crate::storage::SnapshotKind;

/// Fetch the recently played list and store it verbatim with `fetchedAt`
pub async fn fetch(ctx: &Context) -> Result<usize> {
    let client = ctx.client()?;
    info!("fetching recently played games");

    let mut body = client.get_recent_games().await?;
    let fetched_at = models::now();
    body.insert(
        "fetchedAt".to_string(),
        Value::String(fetched_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    let count = body
        .get("games")
        .and_then(|v| v.as_array())
        .map(|games| games.len())
        .unwrap_or(0);

    let path = ctx
        .store()
        .write_snapshot(SnapshotKind::RecentGames, &body, fetched_at)?;
    info!(path = %path.display(), count, "recent games saved");

    println!("Recently played: {} games", count);
    Ok(count)
}
