//! Elapsed Time Module
//!
//! Time sources used to evaluate expiration. Readings are monotonic
//! durations, never wall-clock timestamps.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

// == Elapsed Time Provider ==
/// Supplies the current elapsed time.
pub trait ElapsedTimeProvider: Send + Sync {
    /// Returns how much time has passed since this provider's origin.
    fn elapsed(&self) -> Duration;
}

// == System Clock ==
/// Monotonic clock anchored at its construction.
///
/// Backed by `tokio::time::Instant`, so a paused tokio runtime
/// (`tokio::time::pause` / `advance`) drives it as well.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTimeProvider for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

// == Manual Clock ==
/// Deterministic clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and hand
/// another to the cache.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(by);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, to: Duration) {
        *self.now.lock() = to;
    }
}

impl ElapsedTimeProvider for ManualClock {
    fn elapsed(&self) -> Duration {
        *self.now.lock()
    }
}
