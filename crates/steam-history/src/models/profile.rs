//! Player profile and the static API documents built from the snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Public profile summary from `ISteamUser/GetPlayerSummaries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub steamid: String,

    #[serde(default)]
    pub personaname: String,

    #[serde(default)]
    pub profileurl: String,

    #[serde(default)]
    pub avatarfull: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Persisted profile (`history/profile/latest.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(flatten)]
    pub player: PlayerSummary,

    #[serde(rename = "fetchedAt", with = "super::iso_millis")]
    pub fetched_at: DateTime<Utc>,
}

/// Profile subset exposed by the site's `api/summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub steamid: String,
    pub personaname: String,
    pub avatarfull: String,
    pub profileurl: String,
}

impl From<&PlayerSummary> for ProfileCard {
    fn from(p: &PlayerSummary) -> Self {
        Self {
            steamid: p.steamid.clone(),
            personaname: p.personaname.clone(),
            avatarfull: p.avatarfull.clone(),
            profileurl: p.profileurl.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStats {
    pub total_games: u32,
    /// Hours, rounded
    pub total_playtime: u64,
    pub games_with_achievements: usize,
}

/// `api/summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub profile: Option<ProfileCard>,
    pub stats: ApiStats,
    #[serde(with = "super::iso_millis")]
    pub last_update: DateTime<Utc>,
}
