//! Minimum-interval rate limiting for outbound registry calls.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Spaces successive calls to one source at least `interval` apart.
///
/// Shared by every enrichment using the same resolver, so concurrent
/// receipts queue up behind each other instead of bursting the source.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// A limiter allowing one call per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured spacing.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next call is allowed and claim it.
    pub async fn acquire(&self) {
        if self.interval.is_zero() {
            return;
        }
        let mut next_slot = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next_slot {
            Some(at) if at > now => at,
            _ => now,
        };
        *next_slot = Some(slot + self.interval);
        if slot > now {
            // Sleep while holding the lock so waiters are served in order.
            sleep_until(slot).await;
        }
    }
}
