//! Cache Module
//!
//! Fetch-through caching with time-to-idle and time-to-live expiration.

mod clock;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
pub(crate) mod test_utils;

// Re-export public types
pub use clock::{ElapsedTimeProvider, ManualClock, SystemClock};
pub use entry::{CacheEntry, ExpirationPolicy, Freshness};
pub use stats::CacheStats;
pub use store::{Cache, CacheBuilder};
