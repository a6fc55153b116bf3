//! Cache Entry Module
//!
//! Per-key access bookkeeping and the expiration policy evaluated against it.
//! Values themselves live in the `Storage` backend; only timestamps are kept here.

use std::time::Duration;

// == Cache Entry ==
/// Timestamps recorded for a cached key, as readings of the cache's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// When the current value was stored
    pub created_at: Duration,
    /// When the value was last stored or read
    pub last_accessed_at: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored and accessed at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            created_at: now,
            last_accessed_at: now,
        }
    }

    // == Touch ==
    /// Records a read at `now`. `created_at` is left untouched.
    pub fn touch(&mut self, now: Duration) {
        self.last_accessed_at = now;
    }

    /// Time since the last access.
    pub fn idle_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.last_accessed_at)
    }

    /// Time since creation.
    pub fn alive_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.created_at)
    }
}

// == Freshness ==
/// Outcome of checking a stored key against the expiration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Within both thresholds
    Fresh,
    /// Idle for at least the time-to-idle
    IdleExpired,
    /// Alive for at least the time-to-live
    LiveExpired,
    /// Stored, but with no recorded timestamps
    Untracked,
}

impl Freshness {
    pub fn is_fresh(self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}

// == Expiration Policy ==
/// Cache-wide expiration thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationPolicy {
    /// Maximum time since the last access
    pub time_to_idle: Duration,
    /// Maximum time since creation, regardless of accesses
    pub time_to_live: Duration,
}

impl ExpirationPolicy {
    pub fn new(time_to_idle: Duration, time_to_live: Duration) -> Self {
        Self {
            time_to_idle,
            time_to_live,
        }
    }

    // == Evaluate ==
    /// Checks an entry at `now`.
    ///
    /// Boundary condition: an entry is expired once the elapsed time is greater
    /// than or equal to the threshold. When both thresholds are crossed the
    /// live expiration is reported; either way the caller refetches once.
    pub fn evaluate(&self, entry: Option<&CacheEntry>, now: Duration) -> Freshness {
        let Some(entry) = entry else {
            return Freshness::Untracked;
        };

        if entry.alive_for(now) >= self.time_to_live {
            Freshness::LiveExpired
        } else if entry.idle_for(now) >= self.time_to_idle {
            Freshness::IdleExpired
        } else {
            Freshness::Fresh
        }
    }
}

impl Default for ExpirationPolicy {
    /// One day of idling, thirty minutes of living.
    fn default() -> Self {
        Self {
            time_to_idle: Duration::from_secs(24 * 60 * 60),
            time_to_live: Duration::from_secs(30 * 60),
        }
    }
}
