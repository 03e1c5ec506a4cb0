//! Snapshot storage for Steam data
//!
//! Every fetch writes plain JSON so the static site can read it directly.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── history/
//! │   ├── profile/
//! │   │   ├── 2024-12-01.json      # Dated copies
//! │   │   └── latest.json          # Most recent snapshot
//! │   ├── games/
//! │   │   ├── 2024-12-01.json
//! │   │   └── latest.json
//! │   ├── stats/
//! │   │   ├── recent-2024-12-01.json
//! │   │   └── recent-latest.json
//! │   └── achievements/
//! │       ├── 620.json             # One file per title, overwritten on fetch
//! │       └── summary.json
//! ├── covers/
//! │   └── 620.jpg
//! └── api/
//!     ├── profile.json
//!     ├── games.json
//!     └── summary.json
//! ```
//!
//! Files are written atomically (temp file + rename), so the site build never
//! sees a partial document.

mod json;
mod layout;

pub use json::{read_json, write_json_atomic};
pub use layout::SnapshotKind;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SteamError};
use crate::models::{
    AchievementSummary, GamesSnapshot, ProfileSnapshot, RecentGamesSnapshot, TitleAchievementFile,
};

const HISTORY_DIR: &str = "history";
const COVERS_DIR: &str = "covers";
const API_DIR: &str = "api";
const SUMMARY_FILE: &str = "summary.json";

/// Destination for per-title achievement files and the run summary
pub trait AchievementStore: Send + Sync {
    /// Overwrite the achievement file of one title
    fn save_title(&self, file: &TitleAchievementFile) -> Result<()>;

    /// Write the end-of-run summary
    fn save_summary(&self, summary: &AchievementSummary) -> Result<()>;

    /// Whether a title already has an achievement file
    fn has_title(&self, appid: u32) -> bool;
}

/// Directory-backed snapshot store rooted at the data directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a snapshot kind
    pub fn kind_dir(&self, kind: SnapshotKind) -> PathBuf {
        self.root.join(HISTORY_DIR).join(kind.dir_name())
    }

    /// Path of the latest snapshot of a kind
    pub fn latest_path(&self, kind: SnapshotKind) -> PathBuf {
        self.kind_dir(kind).join(kind.latest_file_name())
    }

    pub fn title_path(&self, appid: u32) -> PathBuf {
        self.kind_dir(SnapshotKind::Achievements)
            .join(format!("{}.json", appid))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.kind_dir(SnapshotKind::Achievements).join(SUMMARY_FILE)
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.root.join(COVERS_DIR)
    }

    pub fn cover_path(&self, appid: u32) -> PathBuf {
        self.covers_dir().join(format!("{}.jpg", appid))
    }

    /// Default output directory for the generated static API
    pub fn api_dir(&self) -> PathBuf {
        self.root.join(API_DIR)
    }

    /// Write a snapshot to its dated file and to the latest pointer file.
    ///
    /// Returns the dated path, or the latest path for kinds without history.
    pub fn write_snapshot<T: Serialize>(
        &self,
        kind: SnapshotKind,
        value: &T,
        fetched_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let latest = self.latest_path(kind);
        write_json_atomic(&latest, value)?;

        match kind.dated_file_name(fetched_at.date_naive()) {
            Some(name) => {
                let dated = self.kind_dir(kind).join(name);
                write_json_atomic(&dated, value)?;
                Ok(dated)
            }
            None => Ok(latest),
        }
    }

    /// Read the latest snapshot of a kind, `None` when it was never written
    pub fn read_latest<T: DeserializeOwned>(&self, kind: SnapshotKind) -> Result<Option<T>> {
        read_json(&self.latest_path(kind))
    }

    /// Read the latest snapshot of a kind, failing when it is missing
    pub fn require_latest<T: DeserializeOwned>(&self, kind: SnapshotKind) -> Result<T> {
        self.read_latest(kind)?
            .ok_or_else(|| SteamError::MissingSnapshot(self.latest_path(kind)))
    }

    /// Owned games list; required input of the achievement sync
    pub fn games(&self) -> Result<GamesSnapshot> {
        self.require_latest(SnapshotKind::Games)
    }

    pub fn recent_games(&self) -> Result<Option<RecentGamesSnapshot>> {
        self.read_latest(SnapshotKind::RecentGames)
    }

    pub fn profile(&self) -> Result<Option<ProfileSnapshot>> {
        self.read_latest(SnapshotKind::Profile)
    }

    pub fn achievement_summary(&self) -> Result<Option<AchievementSummary>> {
        read_json(&self.summary_path())
    }

    pub fn read_title(&self, appid: u32) -> Result<Option<TitleAchievementFile>> {
        read_json(&self.title_path(appid))
    }

    pub fn has_cover(&self, appid: u32) -> bool {
        self.cover_path(appid).exists()
    }

    /// Store cover art bytes for a title
    pub fn write_cover(&self, appid: u32, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.cover_path(appid);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("jpg.tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;
        Ok(path)
    }
}

impl AchievementStore for SnapshotStore {
    fn save_title(&self, file: &TitleAchievementFile) -> Result<()> {
        write_json_atomic(&self.title_path(file.app_id), file)
    }

    fn save_summary(&self, summary: &AchievementSummary) -> Result<()> {
        write_json_atomic(&self.summary_path(), summary)
    }

    fn has_title(&self, appid: u32) -> bool {
        self.title_path(appid).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-12-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_write_snapshot_dated_and_latest() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path());

        let snapshot = GamesSnapshot {
            game_count: 1,
            games: vec![Game::new(620, "Portal 2")],
            fetched_at: fixed_time(),
        };

        let dated = store
            .write_snapshot(SnapshotKind::Games, &snapshot, snapshot.fetched_at)
            .unwrap();
        assert!(dated.ends_with("history/games/2024-12-01.json"));
        assert!(store.latest_path(SnapshotKind::Games).exists());

        let back = store.games().unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_missing_games_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path());

        let err = store.games().unwrap_err();
        assert!(matches!(err, SteamError::MissingSnapshot(_)));
        assert!(store.recent_games().unwrap().is_none());
    }

    #[test]
    fn test_title_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path());

        assert!(!store.has_title(10));
        let file = TitleAchievementFile::new(10, "A", vec![]);
        store.save_title(&file).unwrap();

        assert!(store.has_title(10));
        assert!(store.title_path(10).ends_with("history/achievements/10.json"));
        assert_eq!(store.read_title(10).unwrap().unwrap(), file);
    }

    #[test]
    fn test_summary_path() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path());

        let summary = AchievementSummary {
            total_games: 3,
            games_with_achievements: 2,
            last_sync: fixed_time(),
        };
        store.save_summary(&summary).unwrap();

        assert_eq!(store.achievement_summary().unwrap(), Some(summary));
        assert!(store.summary_path().ends_with("history/achievements/summary.json"));
    }

    #[test]
    fn test_write_cover() {
        let temp = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp.path());

        assert!(!store.has_cover(620));
        store.write_cover(620, b"\xff\xd8jpeg").unwrap();
        assert!(store.has_cover(620));
        assert_eq!(fs::read(store.cover_path(620)).unwrap(), b"\xff\xd8jpeg");
    }
}
