//! Configuration Module
//!
//! Handles loading the lookup service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::ExpirationPolicy;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-idle in seconds
    pub time_to_idle: u64,
    /// Time-to-live in seconds
    pub time_to_live: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL values are fetched from (`{upstream_url}/{key}`)
    pub upstream_url: String,
    /// Upstream request timeout in seconds
    pub fetch_timeout: u64,
    /// Directory for disk-backed storage; in-memory storage when unset
    pub storage_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TIME_TO_IDLE` - Time-to-idle in seconds (default: 86400)
    /// - `TIME_TO_LIVE` - Time-to-live in seconds (default: 1800)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_URL` - Upstream base URL (default: http://localhost:8080)
    /// - `FETCH_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `STORAGE_DIR` - Storage directory (default: unset, in-memory)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            time_to_idle: parse_var("TIME_TO_IDLE").unwrap_or(defaults.time_to_idle),
            time_to_live: parse_var("TIME_TO_LIVE").unwrap_or(defaults.time_to_live),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_url: env::var("UPSTREAM_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_url),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            storage_dir: env::var("STORAGE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Expiration policy built from the configured thresholds.
    pub fn policy(&self) -> ExpirationPolicy {
        ExpirationPolicy::new(
            Duration::from_secs(self.time_to_idle),
            Duration::from_secs(self.time_to_live),
        )
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        let policy = ExpirationPolicy::default();
        Self {
            time_to_idle: policy.time_to_idle.as_secs(),
            time_to_live: policy.time_to_live.as_secs(),
            server_port: 3000,
            upstream_url: "http://localhost:8080".to_string(),
            fetch_timeout: 10,
            storage_dir: None,
        }
    }
}
