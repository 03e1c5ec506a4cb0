//! Command implementations behind the `steam-history` binary

pub mod commands;

use std::path::PathBuf;

use crate::client::api::{DEFAULT_API_BASE, DEFAULT_CDN_BASE};
use crate::client::SteamClient;
use crate::config::{Credentials, Pacing};
use crate::error::Result;
use crate::storage::SnapshotStore;
use crate::sync::RateLimiter;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Root of the snapshot directories
    pub data_dir: PathBuf,
    pub api_key: Option<String>,
    pub steam_id: Option<String>,
    pub api_base: String,
    pub cdn_base: String,
    pub pacing: Pacing,
}

impl Context {
    /// Context rooted at `data_dir` with default endpoints and pacing
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            api_key: None,
            steam_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            pacing: Pacing::default(),
        }
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir)
    }

    /// Validated credentials; missing values are a configuration error
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(self.api_key.clone(), self.steam_id.clone())
    }

    /// API client; fails before any request when credentials are missing
    pub fn client(&self) -> Result<SteamClient> {
        Ok(SteamClient::new_with_base_url(self.credentials()?, &self.api_base)?
            .with_cdn_url(&self.cdn_base))
    }

    /// Client for CDN downloads, which need no credentials
    pub fn cdn_client(&self) -> Result<SteamClient> {
        Ok(SteamClient::anonymous()?.with_cdn_url(&self.cdn_base))
    }

    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.pacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteamError;

    #[test]
    fn test_client_requires_credentials() {
        let ctx = Context::new(".");
        assert!(matches!(ctx.client(), Err(SteamError::Config(_))));
        assert!(ctx.cdn_client().is_ok());
    }

    #[test]
    fn test_store_rooted_at_data_dir() {
        let ctx = Context::new("/tmp/steam");
        assert_eq!(ctx.store().root(), std::path::Path::new("/tmp/steam"));
    }
}
