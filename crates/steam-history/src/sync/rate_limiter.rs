//! Request pacing for the Steam Web API
//!
//! Steam does not publish its limits; a fixed pause before every request and
//! a longer one between batches keeps a full library sync under them.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Pacing;

/// Pacing hook called by the sync driver before each request and between batches
#[async_trait]
pub trait Throttle: Send {
    /// Wait before making the next request
    async fn wait(&mut self);

    /// Wait between two batches
    async fn pause_between_batches(&mut self);
}

/// Fixed-delay rate limiter
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Delay before every request
    request_delay: Duration,
    /// Delay between batches
    batch_delay: Duration,
    /// Requests let through so far
    requests: u64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}

impl RateLimiter {
    /// Create a rate limiter with the given delays
    pub fn new(pacing: Pacing) -> Self {
        Self {
            request_delay: pacing.request_delay,
            batch_delay: pacing.batch_delay,
            requests: 0,
        }
    }

    /// Rate limiter that never sleeps
    pub fn unthrottled() -> Self {
        Self::new(Pacing::none())
    }

    /// Number of requests paced so far
    pub fn request_count(&self) -> u64 {
        self.requests
    }
}

#[async_trait]
impl Throttle for RateLimiter {
    async fn wait(&mut self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        self.requests += 1;
    }

    async fn pause_between_batches(&mut self) {
        if !self.batch_delay.is_zero() {
            tokio::time::sleep(self.batch_delay).await;
        }
    }
}
