//! Cache Statistics Module
//!
//! Tracks how `get` calls were served: from storage or through the fetcher.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from storage without fetching
    pub hits: u64,
    /// Reads that went to the fetcher (absent or expired keys)
    pub misses: u64,
    /// Misses caused by the time-to-idle
    pub idle_expirations: u64,
    /// Misses caused by the time-to-live
    pub live_expirations: u64,
    /// Fetches that returned an error
    pub fetch_failures: u64,
    /// Keys currently tracked by the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records a miss caused by the time-to-idle.
    pub fn record_idle_expiration(&mut self) {
        self.misses += 1;
        self.idle_expirations += 1;
    }

    /// Records a miss caused by the time-to-live.
    pub fn record_live_expiration(&mut self) {
        self.misses += 1;
        self.live_expirations += 1;
    }

    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
