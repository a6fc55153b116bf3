//! Property-Based Tests for Cache Module
//!
//! Uses proptest to compare the cache against a reference model of the
//! expiration rules, with time driven by a `ManualClock`.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::test_utils::{minutes, CountingFetcher};
use crate::cache::{Cache, ManualClock};
use crate::error::CacheError;
use crate::storage::{InMemoryStorage, Storage};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Get { key: String },
    Put { key: String },
    Remove { key: String },
    Clear,
    Advance { minutes: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Put { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => Just(CacheOp::Clear),
        3 => (0u64..90).prop_map(|minutes| CacheOp::Advance { minutes }),
    ]
}

// == Reference Model ==
struct ModelEntry {
    value: String,
    created_at: Duration,
    last_accessed_at: Duration,
}

struct Fixture {
    cache: Cache<String, String>,
    storage: Arc<InMemoryStorage<String, String>>,
    fetcher: Arc<CountingFetcher>,
    clock: ManualClock,
}

fn fixture(time_to_idle: Duration, time_to_live: Duration) -> Fixture {
    let storage: Arc<InMemoryStorage<String, String>> = Arc::new(InMemoryStorage::new());
    let fetcher = Arc::new(CountingFetcher::new());
    let clock = ManualClock::new();
    let cache = Cache::builder(storage.clone(), fetcher.clone())
        .time_to_idle(time_to_idle)
        .time_to_live(time_to_live)
        .clock(clock.clone())
        .build()
        .unwrap();

    Fixture {
        cache,
        storage,
        fetcher,
        clock,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every get fetches exactly when the key is absent, idle for at least the
    // time-to-idle or alive for at least the time-to-live; otherwise it
    // returns the stored value. Covers miss, hit, both expirations, idle clock
    // reset on access, and refetch after remove or clear.
    #[test]
    fn prop_cache_matches_expiration_model(
        tti in 1u64..=60,
        ttl in 1u64..=120,
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let f = fixture(minutes(tti), minutes(ttl));
        let mut model: HashMap<String, ModelEntry> = HashMap::new();
        let mut now = Duration::ZERO;

        for op in ops {
            match op {
                CacheOp::Get { key } => {
                    let before = f.fetcher.calls_for(&key);
                    let value = tokio_test::block_on(f.cache.get(&key)).unwrap();
                    let fetched = f.fetcher.calls_for(&key) - before;

                    let stale = match model.get(&key) {
                        None => true,
                        Some(entry) => {
                            now - entry.last_accessed_at >= minutes(tti)
                                || now - entry.created_at >= minutes(ttl)
                        }
                    };

                    if stale {
                        prop_assert_eq!(fetched, 1, "stale or absent key must fetch once");
                        model.insert(key.clone(), ModelEntry {
                            value: value.clone(),
                            created_at: now,
                            last_accessed_at: now,
                        });
                    } else {
                        prop_assert_eq!(fetched, 0, "fresh key must not fetch");
                        let entry = model.get_mut(&key).unwrap();
                        prop_assert_eq!(&value, &entry.value);
                        entry.last_accessed_at = now;
                    }
                }
                CacheOp::Put { key } => {
                    let value = format!("put-{}", key);
                    tokio_test::block_on(f.cache.put(&key, value.clone())).unwrap();
                    model.insert(key, ModelEntry {
                        value,
                        created_at: now,
                        last_accessed_at: now,
                    });
                }
                CacheOp::Remove { key } => {
                    tokio_test::block_on(f.cache.remove(&key)).unwrap();
                    model.remove(&key);
                }
                CacheOp::Clear => {
                    tokio_test::block_on(f.cache.clear()).unwrap();
                    model.clear();
                }
                CacheOp::Advance { minutes: m } => {
                    f.clock.advance(minutes(m));
                    now += minutes(m);
                }
            }

            prop_assert_eq!(f.storage.len(), model.len());
        }
    }

    // A failing fetch on an absent key leaves nothing behind.
    #[test]
    fn prop_failed_fetch_stores_nothing(key in key_strategy()) {
        let f = fixture(minutes(30), minutes(60));
        f.fetcher.fail_on(&key);

        let result = tokio_test::block_on(f.cache.get(&key));

        prop_assert!(matches!(result, Err(CacheError::Fetch(_))));
        prop_assert!(!tokio_test::block_on(f.storage.contains(&key)).unwrap());
        prop_assert!(f.cache.entry(&key).is_none());
    }
}

// == Scenarios ==

#[tokio::test]
async fn test_scenario_idle_expiry_after_last_access() {
    let f = fixture(minutes(30), minutes(24 * 60));
    let key = "p1".to_string();
    f.cache.put(&key, "profile".to_string()).await.unwrap();

    f.clock.set(minutes(10));
    assert_eq!(f.cache.get(&key).await.unwrap(), "profile");
    assert_eq!(f.fetcher.calls_for("p1"), 0);

    // Idle since t=10min for 35min
    f.clock.set(minutes(45));
    assert_eq!(f.cache.get(&key).await.unwrap(), "p1#1");
    assert_eq!(f.fetcher.calls_for("p1"), 1);
}

#[tokio::test]
async fn test_scenario_live_expiry_despite_continuous_access() {
    let f = fixture(minutes(30), minutes(60));
    let key = "p2".to_string();
    f.cache.put(&key, "post".to_string()).await.unwrap();

    for t in (5..=55).step_by(5) {
        f.clock.set(minutes(t));
        assert_eq!(f.cache.get(&key).await.unwrap(), "post");
    }
    assert_eq!(f.fetcher.calls_for("p2"), 0);

    f.clock.set(minutes(65));
    assert_eq!(f.cache.get(&key).await.unwrap(), "p2#1");
    assert_eq!(f.fetcher.calls_for("p2"), 1);
    assert_eq!(f.cache.stats().live_expirations, 1);
}

#[tokio::test]
async fn test_scenario_first_fetch_failure_propagates() {
    let f = fixture(minutes(30), minutes(60));
    f.fetcher.fail_on("p3");

    let result = f.cache.get(&"p3".to_string()).await;

    assert!(matches!(result, Err(CacheError::Fetch(_))));
    assert!(f.storage.is_empty());
}
