//! Achievement records: player progress, title schema, global rarity and the merged form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One achievement as reported for the tracked player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAchievement {
    pub apiname: String,

    /// 1 when unlocked, 0 otherwise
    #[serde(default)]
    pub achieved: u8,

    /// Unix timestamp of the unlock, 0 when locked
    #[serde(default)]
    pub unlocktime: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerAchievement {
    pub fn is_achieved(&self) -> bool {
        self.achieved != 0
    }
}

/// Static, player-independent description of an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaAchievement {
    pub name: String,

    #[serde(rename = "displayName", default)]
    pub display_name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Icon shown once unlocked
    #[serde(default)]
    pub icon: String,

    /// Icon shown while locked
    #[serde(default)]
    pub icongray: String,

    #[serde(default)]
    pub hidden: u8,
}

/// Share of all players who unlocked an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPercentage {
    pub name: String,

    /// Percentage in `0.0..=100.0`; `None` when the API value could not be parsed
    #[serde(default, deserialize_with = "lenient_percent")]
    pub percent: Option<f64>,
}

/// Steam has sent `percent` both as a JSON number and as a decimal string.
fn lenient_percent<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(Value),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Raw::Other(_) => None,
    })
}

/// Player record joined with its schema entry and global rarity.
///
/// Schema-derived fields are left out of the JSON when no schema entry
/// matched; `globalPercent` is always written, as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedAchievement {
    #[serde(flatten)]
    pub player: PlayerAchievement,

    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<u8>,

    #[serde(rename = "globalPercent", default)]
    pub global_percent: Option<f64>,
}

impl MergedAchievement {
    /// Whether a schema entry contributed to this record
    pub fn has_schema(&self) -> bool {
        self.display_name.is_some()
    }
}

/// Per-title artifact written to `history/achievements/{appid}.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleAchievementFile {
    pub app_id: u32,
    pub game_name: String,
    pub achievements: Vec<MergedAchievement>,
    pub success: bool,
    #[serde(with = "super::iso_millis")]
    pub fetched_at: DateTime<Utc>,
}

impl TitleAchievementFile {
    pub fn new(app_id: u32, game_name: impl Into<String>, achievements: Vec<MergedAchievement>) -> Self {
        Self {
            app_id,
            game_name: game_name.into(),
            achievements,
            success: true,
            fetched_at: super::now(),
        }
    }

    /// Number of unlocked achievements
    pub fn unlocked(&self) -> usize {
        self.achievements
            .iter()
            .filter(|a| a.player.is_achieved())
            .count()
    }
}

/// Totals written to `history/achievements/summary.json` at the end of a full run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementSummary {
    pub total_games: usize,
    pub games_with_achievements: usize,
    #[serde(with = "super::iso_millis")]
    pub last_sync: DateTime<Utc>,
}
