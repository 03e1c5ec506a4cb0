//! Steam Web API client
//!
//! Thin wrapper over `reqwest` that appends the API key to every request and
//! maps HTTP status codes onto [`SteamError`] variants. Pacing is the caller's
//! job (see [`crate::sync::Throttle`]).

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::responses::{
    OwnedGames, OwnedGamesEnvelope, PlayerSummariesEnvelope, RecentGamesEnvelope,
};
use crate::config::Credentials;
use crate::error::{Result, SteamError};
use crate::models::PlayerSummary;

/// Default Steam Web API host
pub const DEFAULT_API_BASE: &str = "https://api.steampowered.com";
/// Steam CDN serving store artwork
pub const DEFAULT_CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";

const CLIENT_USER_AGENT: &str = concat!("steam-history/", env!("CARGO_PKG_VERSION"));

pub(crate) const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v0001/";
pub(crate) const RECENT_GAMES_PATH: &str = "/IPlayerService/GetRecentlyPlayedGames/v0001/";
pub(crate) const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";
pub(crate) const PLAYER_ACHIEVEMENTS_PATH: &str = "/ISteamUserStats/GetPlayerAchievements/v0001/";
pub(crate) const SCHEMA_PATH: &str = "/ISteamUserStats/GetSchemaForGame/v2/";
pub(crate) const GLOBAL_PERCENTAGES_PATH: &str =
    "/ISteamUserStats/GetGlobalAchievementPercentagesForApp/v2/";

/// Steam Web API client
pub struct SteamClient {
    client: Client,
    base_url: String,
    cdn_url: String,
    credentials: Option<Credentials>,
}

impl SteamClient {
    /// Create a client against the public Steam endpoints
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::new_with_base_url(credentials, DEFAULT_API_BASE)
    }

    /// Create a client with a custom API base URL (for testing)
    pub fn new_with_base_url(credentials: Credentials, base_url: &str) -> Result<Self> {
        Self::build(Some(credentials), base_url)
    }

    /// Client without an API key, usable only for CDN downloads
    pub fn anonymous() -> Result<Self> {
        Self::build(None, DEFAULT_API_BASE)
    }

    fn build(credentials: Option<Credentials>, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cdn_url: DEFAULT_CDN_BASE.to_string(),
            credentials,
        })
    }

    /// Point cover downloads at another CDN root (for testing)
    pub fn with_cdn_url(mut self, cdn_url: &str) -> Self {
        self.cdn_url = cdn_url.trim_end_matches('/').to_string();
        self
    }

    /// Credentials used for API calls
    pub fn credentials(&self) -> Result<&Credentials> {
        self.credentials
            .as_ref()
            .ok_or_else(|| SteamError::config("Steam API credentials are required for this request"))
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Candidate cover URLs for a title, preferred first
    pub fn cover_urls(&self, appid: u32) -> [String; 2] {
        [
            format!("{}/{}/library_600x900.jpg", self.cdn_url, appid),
            format!("{}/{}/header.jpg", self.cdn_url, appid),
        ]
    }

    /// GET an API path with the key appended and deserialize the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let credentials = self.credentials()?;
        let url = self.build_url(path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .query(&[("key", credentials.api_key())])
            .query(query)
            .send()
            .await
            .map_err(SteamError::Http)?;

        let response = self.handle_response_status(response).await?;
        response.json().await.map_err(|e| {
            SteamError::invalid_response(format!("Failed to parse JSON response: {}", e))
        })
    }

    /// Download raw bytes from an absolute URL (cover art)
    pub async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(SteamError::Http)?;

        let response = self.handle_response_status(response).await?;
        response.bytes().await.map_err(SteamError::Http)
    }

    /// Query parameter naming the tracked account
    pub(crate) fn steam_id_param(&self) -> Result<(&'static str, String)> {
        Ok(("steamid", self.credentials()?.steam_id().to_string()))
    }

    /// Fetch the owned games list, including free-to-play titles that were played
    pub async fn get_owned_games(&self) -> Result<OwnedGames> {
        let envelope: OwnedGamesEnvelope = self
            .get_json(
                OWNED_GAMES_PATH,
                &[
                    self.steam_id_param()?,
                    ("format", "json".to_string()),
                    ("include_appinfo", "true".to_string()),
                    ("include_played_free_games", "true".to_string()),
                ],
            )
            .await?;

        let games = envelope.response.games.ok_or(SteamError::PrivateProfile)?;
        let game_count = envelope.response.game_count.unwrap_or(games.len() as u32);
        Ok(OwnedGames { game_count, games })
    }

    /// Fetch the recently played games response body as-is
    pub async fn get_recent_games(&self) -> Result<Map<String, Value>> {
        let envelope: RecentGamesEnvelope = self
            .get_json(
                RECENT_GAMES_PATH,
                &[self.steam_id_param()?, ("format", "json".to_string())],
            )
            .await?;
        Ok(envelope.response)
    }

    /// Fetch the public profile summary of the tracked account
    pub async fn get_player_summary(&self) -> Result<PlayerSummary> {
        let envelope: PlayerSummariesEnvelope = self
            .get_json(
                PLAYER_SUMMARIES_PATH,
                &[("steamids", self.credentials()?.steam_id().to_string())],
            )
            .await?;

        envelope
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| SteamError::invalid_response("No player data returned"))
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                Err(SteamError::BadRequest(body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(SteamError::Forbidden(body))
            }
            StatusCode::NOT_FOUND => Err(SteamError::NotFound(response.url().path().to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(SteamError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SteamError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SteamClient {
        SteamClient::new(Credentials::new("KEY", "76561198000000000")).unwrap()
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            client().build_url(OWNED_GAMES_PATH),
            "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = SteamClient::new_with_base_url(
            Credentials::new("KEY", "1"),
            "http://localhost:1234/",
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_anonymous_client_has_no_credentials() {
        let client = SteamClient::anonymous().unwrap();
        assert!(matches!(client.credentials(), Err(SteamError::Config(_))));
    }

    #[test]
    fn test_cover_urls() {
        let [primary, fallback] = client().cover_urls(620);
        assert_eq!(
            primary,
            "https://cdn.cloudflare.steamstatic.com/steam/apps/620/library_600x900.jpg"
        );
        assert!(fallback.ends_with("/620/header.jpg"));
    }
}
