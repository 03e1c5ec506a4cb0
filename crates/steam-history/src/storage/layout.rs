//! File naming for the snapshot history directories

use chrono::NaiveDate;

/// Snapshot kinds with their directory and file naming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// history/profile/YYYY-MM-DD.json
    Profile,
    /// history/games/YYYY-MM-DD.json
    Games,
    /// history/stats/recent-YYYY-MM-DD.json
    RecentGames,
    /// history/achievements/{appid}.json, no dated copies
    Achievements,
}

impl SnapshotKind {
    /// Directory relative to the history root
    pub fn dir_name(&self) -> &'static str {
        match self {
            SnapshotKind::Profile => "profile",
            SnapshotKind::Games => "games",
            SnapshotKind::RecentGames => "stats",
            SnapshotKind::Achievements => "achievements",
        }
    }

    fn file_prefix(&self) -> &'static str {
        match self {
            SnapshotKind::RecentGames => "recent-",
            _ => "",
        }
    }

    /// File holding the most recent snapshot
    pub fn latest_file_name(&self) -> String {
        format!("{}latest.json", self.file_prefix())
    }

    /// Dated history file name, `None` for kinds that keep no history
    pub fn dated_file_name(&self, date: NaiveDate) -> Option<String> {
        match self {
            SnapshotKind::Achievements => None,
            _ => Some(format!("{}{}.json", self.file_prefix(), date.format("%Y-%m-%d"))),
        }
    }
}
