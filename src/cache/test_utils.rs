//! Fixtures shared by the cache tests.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{FetchError, StorageError};
use crate::fetcher::Fetcher;
use crate::storage::Storage;

pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n * 60)
}

// == Counting Fetcher ==
/// Answers `"{key}#{n}"` where `n` counts the fetches of that key, so every
/// fetched value is distinguishable from the previous one.
#[derive(Debug, Default)]
pub struct CountingFetcher {
    calls: Mutex<HashMap<String, usize>>,
    failing: Mutex<HashSet<String>>,
}

impl CountingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following fetch of `key` fail.
    pub fn fail_on(&self, key: &str) {
        self.failing.lock().insert(key.to_string());
    }

    pub fn recover(&self, key: &str) {
        self.failing.lock().remove(key);
    }

    pub fn calls_for(&self, key: &str) -> usize {
        self.calls.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl Fetcher<String, String> for CountingFetcher {
    async fn fetch(&self, key: &String) -> Result<String, FetchError> {
        let n = {
            let mut calls = self.calls.lock();
            let n = calls.entry(key.clone()).or_insert(0);
            *n += 1;
            *n
        };

        if self.failing.lock().contains(key) {
            return Err(FetchError::Transport(format!("{} is unreachable", key)));
        }
        Ok(format!("{}#{}", key, n))
    }
}

// == Failing Storage ==
/// Storage whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingStorage;

#[async_trait]
impl Storage<String, String> for FailingStorage {
    async fn store(&self, _key: &String, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }

    async fn contains(&self, _key: &String) -> Result<bool, StorageError> {
        Ok(false)
    }

    async fn get(&self, key: &String) -> Result<String, StorageError> {
        Err(StorageError::NotFound(key.clone()))
    }

    async fn remove(&self, _key: &String) -> Result<(), StorageError> {
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
