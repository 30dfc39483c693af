//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the read/write contract of the cache over
//! generated keys and values.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cache::Cache;

// == Test Configuration ==
const TEST_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys, including the empty key
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{0,64}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

fn ttl_strategy() -> impl Strategy<Value = Duration> {
    (1u64..86_400).prop_map(Duration::from_secs)
}

/// Runs `f` against a fresh cache inside a single-threaded runtime.
fn with_cache<F, Fut, T>(f: F) -> T
where
    F: FnOnce(Cache<String>) -> Fut,
    Fut: std::future::Future<Output = T>,
{
    tokio_test::block_on(async move {
        let lifetime = CancellationToken::new();
        let cache = Cache::new(TEST_SWEEP_INTERVAL, lifetime.clone());
        let out = f(cache.clone()).await;
        lifetime.cancel();
        cache.sweeper_stopped().await;
        out
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // **Property 1: Insert-then-read**
    // Loading a value and immediately reading it back returns the same value.
    #[test]
    fn prop_insert_then_read(
        key in key_strategy(),
        value in value_strategy(),
        ttl in ttl_strategy()
    ) {
        let (inserted, contained, read) = with_cache(|cache| {
            let key = key.clone();
            let value = value.clone();
            async move {
                let inserted = cache.load(key.clone(), value, ttl).await;
                (inserted, cache.contains(&key).await, cache.get(&key).await)
            }
        });

        prop_assert!(inserted);
        prop_assert!(contained);
        prop_assert_eq!(read, Some(value));
    }

    // **Property 2: Insert-if-absent**
    // A second load under the same key is ignored; the first value and TTL stay.
    #[test]
    fn prop_insert_if_absent(
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy(),
        ttl1 in ttl_strategy(),
        ttl2 in ttl_strategy()
    ) {
        let (second_inserted, read, remaining) = with_cache(|cache| {
            let key = key.clone();
            let first = first.clone();
            async move {
                cache.load(key.clone(), first, ttl1).await;
                let second_inserted = cache.load(key.clone(), second, ttl2).await;
                (
                    second_inserted,
                    cache.get(&key).await,
                    cache.ttl_remaining(&key).await,
                )
            }
        });

        prop_assert!(!second_inserted);
        prop_assert_eq!(read, Some(first));
        let remaining = remaining.unwrap();
        prop_assert!(remaining <= ttl1, "TTL should come from the first load");
    }

    // **Property 3: Absence**
    // Keys that were never loaded are neither contained nor readable.
    #[test]
    fn prop_absence(
        loaded in prop::collection::hash_set(key_strategy(), 0..20),
        probe in key_strategy()
    ) {
        prop_assume!(!loaded.contains(&probe));

        let (contained, read) = with_cache(|cache| async move {
            for key in loaded {
                cache.load(key, "x".to_string(), TEST_TTL).await;
            }
            (cache.contains(&probe).await, cache.get(&probe).await)
        });

        prop_assert!(!contained);
        prop_assert_eq!(read, None);
    }

    // **Property 4: Table Size**
    // After any sequence of loads the table holds exactly one entry per
    // distinct key, each with the first value loaded under it.
    #[test]
    fn prop_first_load_wins_per_key(
        loads in prop::collection::vec((key_strategy(), value_strategy()), 1..50)
    ) {
        let mut expected: HashMap<String, String> = HashMap::new();
        for (key, value) in &loads {
            expected.entry(key.clone()).or_insert_with(|| value.clone());
        }
        let distinct: HashSet<String> = expected.keys().cloned().collect();

        let (len, reads, stats) = with_cache(|cache| async move {
            for (key, value) in loads {
                cache.load(key, value, TEST_TTL).await;
            }
            let mut reads = HashMap::new();
            for key in distinct {
                let value = cache.get(&key).await;
                reads.insert(key, value);
            }
            (cache.len().await, reads, cache.stats().await)
        });

        prop_assert_eq!(len, expected.len());
        prop_assert_eq!(stats.hits as usize, expected.len());
        prop_assert_eq!(stats.misses, 0);
        for (key, value) in expected {
            prop_assert_eq!(reads.get(&key).cloned().flatten(), Some(value));
        }
    }
}
