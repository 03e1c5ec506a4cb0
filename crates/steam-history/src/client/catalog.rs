//! Read-only game catalog queries used by the achievement sync

use async_trait::async_trait;
use tracing::{debug, info};

use crate::client::api::{
    SteamClient, GLOBAL_PERCENTAGES_PATH, PLAYER_ACHIEVEMENTS_PATH, SCHEMA_PATH,
};
use crate::client::responses::{
    GlobalPercentagesEnvelope, OwnedGames, PlayerStatsEnvelope, SchemaEnvelope,
};
use crate::error::{Result, SteamError};
use crate::models::{GlobalPercentage, PlayerAchievement, SchemaAchievement};

/// Source of library and achievement data.
///
/// Only the player lookups can fail: schema and global rarity are optional
/// decoration and degrade to an empty list.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Owned games of the tracked account.
    ///
    /// Fails with [`SteamError::PrivateProfile`] when Steam returns no list.
    async fn owned_games(&self) -> Result<OwnedGames>;

    /// The player's achievement state for one title.
    ///
    /// `Ok(None)` means the title has no achievements or its stats are not
    /// visible; it is an expected outcome, not a failure.
    async fn player_achievements(&self, appid: u32) -> Result<Option<Vec<PlayerAchievement>>>;

    /// Achievement schema for one title, empty when unavailable
    async fn schema(&self, appid: u32) -> Vec<SchemaAchievement>;

    /// Global unlock percentages for one title, empty when unavailable
    async fn global_percentages(&self, appid: u32) -> Vec<GlobalPercentage>;
}

#[async_trait]
impl Catalog for SteamClient {
    async fn owned_games(&self) -> Result<OwnedGames> {
        self.get_owned_games().await
    }

    async fn player_achievements(&self, appid: u32) -> Result<Option<Vec<PlayerAchievement>>> {
        let result: Result<PlayerStatsEnvelope> = self
            .get_json(
                PLAYER_ACHIEVEMENTS_PATH,
                &[self.steam_id_param()?, ("appid", appid.to_string())],
            )
            .await;

        match result {
            Ok(envelope) if envelope.playerstats.success => {
                Ok(Some(envelope.playerstats.achievements.unwrap_or_default()))
            }
            Ok(envelope) => {
                debug!(appid, error = ?envelope.playerstats.error, "player stats unsuccessful");
                Ok(None)
            }
            Err(e) if e.is_bad_request() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn schema(&self, appid: u32) -> Vec<SchemaAchievement> {
        let result: Result<SchemaEnvelope> = self
            .get_json(SCHEMA_PATH, &[("appid", appid.to_string())])
            .await;

        match result {
            Ok(envelope) => envelope.into_achievements(),
            Err(SteamError::Forbidden(_)) => {
                info!(appid, "schema unavailable (no public achievement data)");
                Vec::new()
            }
            Err(e) => {
                debug!(appid, error = %e, "schema fetch failed");
                Vec::new()
            }
        }
    }

    async fn global_percentages(&self, appid: u32) -> Vec<GlobalPercentage> {
        let result: Result<GlobalPercentagesEnvelope> = self
            .get_json(GLOBAL_PERCENTAGES_PATH, &[("gameid", appid.to_string())])
            .await;

        match result {
            Ok(envelope) => envelope.into_percentages(),
            Err(e) => {
                debug!(appid, error = %e, "global percentages unavailable");
                Vec::new()
            }
        }
    }
}
