use std::path::PathBuf;

use thiserror::Error;

/// Main error type for steam-history
#[derive(Error, Debug)]
pub enum SteamError {
    #[error("No games data returned. The Steam profile might be private.")]
    PrivateProfile,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Rate limited. Please wait before retrying.")]
    RateLimited,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot not found: {}", .0.display())]
    MissingSnapshot(PathBuf),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, SteamError>;

impl SteamError {
    /// Create a configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid response error from a message
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create an invalid parameter error from a message
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Whether the API rejected the request as malformed for this title.
    ///
    /// Steam answers 400 for titles without stats, so callers treat this as
    /// "no data" rather than a failure.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }
}

/// Render an error for the terminal, with a hint for the common setup mistakes
pub fn format_user_error(err: &SteamError) -> String {
    match err {
        SteamError::Config(_) => {
            format!("{}\nSet STEAM_API_KEY and STEAM_ID (or pass --api-key/--steam-id).", err)
        }
        SteamError::MissingSnapshot(path) if path.ends_with("latest.json") => {
            format!("{}\nRun 'steam-history games' first.", err)
        }
        _ => err.to_string(),
    }
}
