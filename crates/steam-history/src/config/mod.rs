mod credentials;

pub use credentials::{Credentials, API_KEY_ENV, STEAM_ID_ENV};

use std::time::Duration;

/// Titles per checkpointed batch
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Pause between batches, in milliseconds
pub const DEFAULT_BATCH_DELAY_MS: u64 = 2000;
/// Pause before every API request, in milliseconds
pub const DEFAULT_API_DELAY_MS: u64 = 500;
/// Checkpoint file written after every batch
pub const DEFAULT_STATE_FILE: &str = ".sync-state.json";

/// Delays applied by the rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay before each API request
    pub request_delay: Duration,
    /// Delay between two batches
    pub batch_delay: Duration,
}

impl Pacing {
    /// Build pacing from millisecond values as they appear in the environment
    pub fn from_millis(request_delay_ms: u64, batch_delay_ms: u64) -> Self {
        Self {
            request_delay: Duration::from_millis(request_delay_ms),
            batch_delay: Duration::from_millis(batch_delay_ms),
        }
    }

    /// No delays at all
    pub fn none() -> Self {
        Self::from_millis(0, 0)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_millis(DEFAULT_API_DELAY_MS, DEFAULT_BATCH_DELAY_MS)
    }
}
