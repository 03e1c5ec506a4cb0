use std::fmt;

use crate::error::{Result, SteamError};

/// Environment variable holding the Steam Web API key
pub const API_KEY_ENV: &str = "STEAM_API_KEY";
/// Environment variable holding the 64-bit Steam id of the tracked account
pub const STEAM_ID_ENV: &str = "STEAM_ID";

/// Static key/id pair sent with every Steam Web API request.
///
/// There is no login flow: both values come from the environment (or the
/// matching CLI flags) and are passed through as query parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    steam_id: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(api_key: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            steam_id: steam_id.into(),
        }
    }

    /// Build credentials from optional values, failing when either is missing or blank
    pub fn from_parts(api_key: Option<String>, steam_id: Option<String>) -> Result<Self> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| SteamError::config(format!("{} is not set", API_KEY_ENV)))?;
        let steam_id = non_blank(steam_id)
            .ok_or_else(|| SteamError::config(format!("{} is not set", STEAM_ID_ENV)))?;

        if !steam_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(SteamError::config(format!(
                "{} must be a numeric 64-bit Steam id, got '{}'",
                STEAM_ID_ENV, steam_id
            )));
        }

        Ok(Self::new(api_key, steam_id))
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The Steam id
    pub fn steam_id(&self) -> &str {
        &self.steam_id
    }
}

// Keep the key out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let creds =
            Credentials::from_parts(Some("KEY".into()), Some("76561198000000000".into())).unwrap();
        assert_eq!(creds.api_key(), "KEY");
        assert_eq!(creds.steam_id(), "76561198000000000");
    }

    #[test]
    fn test_missing_api_key() {
        let err = Credentials::from_parts(None, Some("76561198000000000".into())).unwrap_err();
        assert!(matches!(err, SteamError::Config(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_blank_steam_id() {
        let err = Credentials::from_parts(Some("KEY".into()), Some("   ".into())).unwrap_err();
        assert!(err.to_string().contains(STEAM_ID_ENV));
    }

    #[test]
    fn test_non_numeric_steam_id() {
        let err = Credentials::from_parts(Some("KEY".into()), Some("gaben".into())).unwrap_err();
        assert!(err.to_string().contains("numeric"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("SECRET", "1");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("redacted"));
    }
}
