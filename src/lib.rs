//! Orca Cache - A fetch-through response cache
//!
//! Serves values from a pluggable `Storage`, fetching them through a
//! pluggable `Fetcher` when absent or expired by time-to-idle or time-to-live.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod shutdown;
pub mod storage;

pub use api::AppState;
pub use cache::{Cache, CacheBuilder, ElapsedTimeProvider, ExpirationPolicy, ManualClock};
pub use config::Config;
pub use error::{CacheError, FetchError, StorageError};
pub use fetcher::Fetcher;
pub use storage::Storage;
