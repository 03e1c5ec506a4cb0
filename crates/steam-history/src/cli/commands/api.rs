//! Static API generation for the site

use std::path::PathBuf;

use tracing::info;

use crate::cli::Context;
use crate::error::Result;
use crate::models::{self, ApiStats, ApiSummary, GamesSnapshot, ProfileCard, ProfileSnapshot};
use crate::storage::{write_json_atomic, SnapshotKind, SnapshotStore};

/// Write `profile.json`, `games.json` and `summary.json` into the API
/// directory and every mirror
pub fn generate(ctx: &Context, mirrors: &[PathBuf]) -> Result<ApiSummary> {
    let store = ctx.store();
    let mut outputs = vec![store.api_dir()];
    outputs.extend(mirrors.iter().cloned());

    let profile = store.profile()?;
    let games = store.read_latest::<GamesSnapshot>(SnapshotKind::Games)?;
    let summary = build_summary(&store, profile.as_ref(), games.as_ref())?;

    for dir in &outputs {
        if let Some(profile) = &profile {
            write_json_atomic(&dir.join("profile.json"), profile)?;
        }
        if let Some(games) = &games {
            write_json_atomic(&dir.join("games.json"), games)?;
        }
        write_json_atomic(&dir.join("summary.json"), &summary)?;
        info!(dir = %dir.display(), "API generated");
    }

    println!(
        "API: {} games, {} hours, {} with achievements",
        summary.stats.total_games, summary.stats.total_playtime, summary.stats.games_with_achievements
    );
    Ok(summary)
}

/// Summary document; missing inputs count as zero
fn build_summary(
    store: &SnapshotStore,
    profile: Option<&ProfileSnapshot>,
    games: Option<&GamesSnapshot>,
) -> Result<ApiSummary> {
    let achievements = store.achievement_summary()?;

    Ok(ApiSummary {
        profile: profile.map(|p| ProfileCard::from(&p.player)),
        stats: ApiStats {
            total_games: games.map(|g| g.game_count).unwrap_or(0),
            total_playtime: games.map(|g| g.total_playtime_hours()).unwrap_or(0),
            games_with_achievements: achievements
                .map(|a| a.games_with_achievements)
                .unwrap_or(0),
        },
        last_update: models::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AchievementSummary, Game};
    use crate::storage::AchievementStore;
    use tempfile::TempDir;

    #[test]
    fn test_generate_without_snapshots() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(temp.path());

        let summary = generate(&ctx, &[]).unwrap();

        assert!(summary.profile.is_none());
        assert_eq!(summary.stats.total_games, 0);
        assert!(temp.path().join("api/summary.json").exists());
        assert!(!temp.path().join("api/games.json").exists());
    }

    #[test]
    fn test_generate_writes_mirrors() {
        let temp = TempDir::new().unwrap();
        let ctx = Context::new(temp.path());
        let store = ctx.store();

        let mut game = Game::new(620, "Portal 2");
        game.playtime_forever = 150;
        let games = GamesSnapshot {
            game_count: 1,
            games: vec![game],
            fetched_at: models::now(),
        };
        store
            .write_snapshot(SnapshotKind::Games, &games, games.fetched_at)
            .unwrap();
        store
            .save_summary(&AchievementSummary {
                total_games: 1,
                games_with_achievements: 1,
                last_sync: models::now(),
            })
            .unwrap();

        let mirror = temp.path().join("site/public/api");
        let summary = generate(&ctx, &[mirror.clone()]).unwrap();

        assert_eq!(summary.stats.total_games, 1);
        assert_eq!(summary.stats.total_playtime, 3);
        assert_eq!(summary.stats.games_with_achievements, 1);
        for dir in [temp.path().join("api"), mirror] {
            assert!(dir.join("games.json").exists());
            assert!(dir.join("summary.json").exists());
        }
    }
}
