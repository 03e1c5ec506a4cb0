//! Data models for the Steam Web API and the snapshot files derived from it

pub mod achievement;
pub mod game;
pub mod profile;

pub use achievement::{
    AchievementSummary, GlobalPercentage, MergedAchievement, PlayerAchievement,
    SchemaAchievement, TitleAchievementFile,
};
pub use game::{Game, GamesSnapshot, RecentGamesSnapshot};
pub use profile::{ApiStats, ApiSummary, PlayerSummary, ProfileCard, ProfileSnapshot};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to the millisecond precision used in snapshot files
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Serde adapter writing timestamps as `2024-05-01T12:00:00.000Z`
pub(crate) mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
