//! Envelopes returned by the Steam Web API endpoints
//!
//! Steam wraps every payload in one or two levels of objects and omits keys
//! freely, so every level here is optional and defaults to empty.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{Game, GlobalPercentage, PlayerAchievement, PlayerSummary, SchemaAchievement};

/// Owned games as returned by `IPlayerService/GetOwnedGames`
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedGames {
    pub game_count: u32,
    pub games: Vec<Game>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnedGamesEnvelope {
    #[serde(default)]
    pub response: OwnedGamesBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnedGamesBody {
    pub game_count: Option<u32>,
    pub games: Option<Vec<Game>>,
}

/// Recently played games; the body is kept whole so snapshots mirror the API
#[derive(Debug, Deserialize)]
pub(crate) struct RecentGamesEnvelope {
    #[serde(default)]
    pub response: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerSummariesEnvelope {
    #[serde(default)]
    pub response: PlayerSummariesBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayerSummariesBody {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerStatsEnvelope {
    #[serde(default)]
    pub playerstats: PlayerStatsBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayerStatsBody {
    #[serde(default)]
    pub success: bool,
    pub achievements: Option<Vec<PlayerAchievement>>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaEnvelope {
    pub game: Option<SchemaGame>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaGame {
    #[serde(rename = "availableGameStats")]
    pub available_game_stats: Option<SchemaStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemaStats {
    pub achievements: Option<Vec<SchemaAchievement>>,
}

impl SchemaEnvelope {
    pub(crate) fn into_achievements(self) -> Vec<SchemaAchievement> {
        self.game
            .and_then(|g| g.available_game_stats)
            .and_then(|s| s.achievements)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalPercentagesEnvelope {
    pub achievementpercentages: Option<GlobalPercentagesBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalPercentagesBody {
    pub achievements: Option<Vec<GlobalPercentage>>,
}

impl GlobalPercentagesEnvelope {
    pub(crate) fn into_percentages(self) -> Vec<GlobalPercentage> {
        self.achievementpercentages
            .and_then(|b| b.achievements)
            .unwrap_or_default()
    }
}
