//! Cache Store Module
//!
//! The fetch-through cache: decides whether a value is served from `Storage`
//! or fetched again through the `Fetcher`, based on the expiration policy.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, CacheStats, ElapsedTimeProvider, ExpirationPolicy, Freshness, SystemClock,
};
use crate::error::{CacheError, Result};
use crate::fetcher::Fetcher;
use crate::storage::Storage;

// == Cache ==
/// Fetch-through cache with time-to-idle and time-to-live expiration.
///
/// Timestamps are tracked here, per key, so storage backends only ever deal
/// with values. Expired keys are evicted lazily, when `get` reaches them.
///
/// No per-key coordination is done: two concurrent `get`s for the same stale
/// key both fetch, and the last store wins.
pub struct Cache<K, V> {
    storage: Arc<dyn Storage<K, V>>,
    fetcher: Arc<dyn Fetcher<K, V>>,
    clock: Arc<dyn ElapsedTimeProvider>,
    policy: ExpirationPolicy,
    /// Access timestamps of the keys this cache stored
    entries: Mutex<HashMap<K, CacheEntry>>,
    stats: Mutex<CacheStats>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with the default policy and the system clock.
    pub fn new(
        storage: Arc<dyn Storage<K, V>>,
        fetcher: Arc<dyn Fetcher<K, V>>,
    ) -> Result<Self> {
        Self::builder(storage, fetcher).build()
    }

    /// Starts configuring a cache over `storage` and `fetcher`.
    pub fn builder(
        storage: Arc<dyn Storage<K, V>>,
        fetcher: Arc<dyn Fetcher<K, V>>,
    ) -> CacheBuilder<K, V> {
        CacheBuilder::new(storage, fetcher)
    }

    // == Get ==
    /// Returns the value for `key`, fetching it when absent or expired.
    ///
    /// Fetch and storage errors are returned as-is. An expired value is
    /// evicted before refetching and is never served as a fallback.
    pub async fn get(&self, key: &K) -> Result<V> {
        if !self.storage.contains(key).await? {
            debug!(?key, "Cache miss");
            self.stats.lock().record_miss();
            return self.remember(key).await;
        }

        let now = self.clock.elapsed();
        let freshness = self.policy.evaluate(self.entries.lock().get(key), now);

        if freshness.is_fresh() {
            let value = self.storage.get(key).await?;
            if let Some(entry) = self.entries.lock().get_mut(key) {
                entry.touch(now);
            }
            self.stats.lock().record_hit();
            debug!(?key, "Cache hit");
            return Ok(value);
        }

        {
            let mut stats = self.stats.lock();
            match freshness {
                Freshness::IdleExpired => stats.record_idle_expiration(),
                Freshness::LiveExpired => stats.record_live_expiration(),
                _ => stats.record_miss(),
            }
        }
        debug!(?key, ?freshness, "Cache entry is stale, refetching");

        self.evict(key).await?;
        self.remember(key).await
    }

    // == Put ==
    /// Stores `value` under `key` without fetching, resetting both timestamps.
    pub async fn put(&self, key: &K, value: V) -> Result<()> {
        self.storage.store(key, value).await?;
        self.mark(key);
        Ok(())
    }

    // == Remove ==
    /// Deletes `key` from storage. Absent keys are ignored.
    pub async fn remove(&self, key: &K) -> Result<()> {
        self.evict(key).await
    }

    // == Clear ==
    /// Deletes every stored value.
    pub async fn clear(&self) -> Result<()> {
        self.storage.clear().await?;
        self.entries.lock().clear();
        debug!("Cache cleared");
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.lock().clone();
        stats.set_total_entries(self.entries.lock().len());
        stats
    }

    pub fn policy(&self) -> ExpirationPolicy {
        self.policy
    }

    /// Returns the recorded timestamps of `key`, if tracked.
    pub fn entry(&self, key: &K) -> Option<CacheEntry> {
        self.entries.lock().get(key).copied()
    }

    /// Fetches `key`, stores the value and marks it as just created.
    async fn remember(&self, key: &K) -> Result<V> {
        let value = match self.fetcher.fetch(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(?key, error = %err, "Fetch failed");
                self.stats.lock().record_fetch_failure();
                return Err(err.into());
            }
        };

        self.storage.store(key, value.clone()).await?;
        self.mark(key);
        Ok(value)
    }

    fn mark(&self, key: &K) {
        let now = self.clock.elapsed();
        self.entries.lock().insert(key.clone(), CacheEntry::new(now));
    }

    async fn evict(&self, key: &K) -> Result<()> {
        self.entries.lock().remove(key);
        self.storage.remove(key).await?;
        Ok(())
    }
}

// == Cache Builder ==
/// Configures a [`Cache`].
pub struct CacheBuilder<K, V> {
    storage: Arc<dyn Storage<K, V>>,
    fetcher: Arc<dyn Fetcher<K, V>>,
    clock: Option<Arc<dyn ElapsedTimeProvider>>,
    policy: ExpirationPolicy,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(storage: Arc<dyn Storage<K, V>>, fetcher: Arc<dyn Fetcher<K, V>>) -> Self {
        Self {
            storage,
            fetcher,
            clock: None,
            policy: ExpirationPolicy::default(),
        }
    }

    pub fn time_to_idle(mut self, time_to_idle: Duration) -> Self {
        self.policy.time_to_idle = time_to_idle;
        self
    }

    pub fn time_to_live(mut self, time_to_live: Duration) -> Self {
        self.policy.time_to_live = time_to_live;
        self
    }

    pub fn policy(mut self, policy: ExpirationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the system clock, e.g. with a [`ManualClock`](crate::cache::ManualClock).
    pub fn clock(mut self, clock: impl ElapsedTimeProvider + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    // == Build ==
    /// Builds the cache. Zero thresholds are rejected since they would make
    /// every read a refetch.
    pub fn build(self) -> Result<Cache<K, V>> {
        if self.policy.time_to_idle.is_zero() {
            return Err(CacheError::InvalidConfig(
                "time-to-idle must be greater than zero".to_string(),
            ));
        }
        if self.policy.time_to_live.is_zero() {
            return Err(CacheError::InvalidConfig(
                "time-to-live must be greater than zero".to_string(),
            ));
        }

        Ok(Cache {
            storage: self.storage,
            fetcher: self.fetcher,
            clock: self
                .clock
                .unwrap_or_else(|| Arc::new(SystemClock::new())),
            policy: self.policy,
            entries: Mutex::new(HashMap::new()),
            stats: Mutex::new(CacheStats::new()),
        })
    }
}
