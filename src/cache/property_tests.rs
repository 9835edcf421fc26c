//! Property-Based Tests for Cache Module
//!
//! Uses proptest with a manual clock, so expiration is exercised without sleeping.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::AgedCache;
use crate::clock::ManualClock;

// == Strategies ==
/// Small key space so overwrites and re-inserts happen often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String, retention: i64 },
    Get { key: String },
    Advance { millis: i64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), -10i64..200).prop_map(|(key, value, retention)| {
            CacheOp::Put {
                key,
                value,
                retention,
            }
        }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        (0i64..120).prop_map(|millis| CacheOp::Advance { millis }),
    ]
}

fn cache_at(start: i64) -> (Arc<ManualClock>, AgedCache<String, String>) {
    let clock = Arc::new(ManualClock::new(start));
    let cache = AgedCache::with_clock(clock.clone());
    (clock, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Lookups, size and emptiness agree with a map of (value, retention, created_at)
    // evaluated with `now - created_at >= retention` meaning expired.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (clock, mut cache) = cache_at(1_000);
        let mut model: HashMap<String, (String, i64, i64)> = HashMap::new();
        let mut now = 1_000i64;

        for op in ops {
            match op {
                CacheOp::Put { key, value, retention } => {
                    cache.put(key.clone(), value.clone(), retention);
                    model.insert(key, (value, retention, now));
                }
                CacheOp::Get { key } => {
                    let expected = model
                        .get(&key)
                        .filter(|(_, retention, created)| now - created < *retention)
                        .map(|(value, _, _)| value.clone());
                    prop_assert_eq!(cache.get(&key).cloned(), expected);
                }
                CacheOp::Advance { millis } => {
                    clock.advance(millis);
                    now += millis;
                }
            }

            let live = model
                .values()
                .filter(|(_, retention, created)| now - created < *retention)
                .count();
            prop_assert_eq!(cache.size(), live);
            prop_assert_eq!(cache.is_empty(), live == 0);
        }
    }

    // A positive retention with no time advance always reads back.
    #[test]
    fn prop_fresh_put_reads_back(
        entries in prop::collection::vec((key_strategy(), value_strategy(), 1i64..10_000), 1..30)
    ) {
        let (_clock, mut cache) = cache_at(0);
        for (key, value, retention) in entries {
            cache.put(key.clone(), value.clone(), retention);
            prop_assert_eq!(cache.get(&key), Some(&value));
        }
    }

    // Overwrites never duplicate a key.
    #[test]
    fn prop_overwrite_keeps_single_entry(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
        retention1 in 1i64..500,
        retention2 in 1i64..500
    ) {
        let (_clock, mut cache) = cache_at(0);

        cache.put(key.clone(), value1, retention1);
        cache.put(key.clone(), value2.clone(), retention2);

        prop_assert_eq!(cache.size(), 1);
        prop_assert_eq!(cache.get(&key), Some(&value2));
    }

    // Past the largest retention nothing is counted.
    #[test]
    fn prop_everything_expires_past_max_retention(
        entries in prop::collection::vec((key_strategy(), value_strategy(), -5i64..1_000), 1..40)
    ) {
        let (clock, mut cache) = cache_at(0);
        let max_retention = entries.iter().map(|(_, _, r)| *r).max().unwrap_or(0).max(0);

        for (key, value, retention) in entries {
            cache.put(key, value, retention);
        }

        clock.advance(max_retention);
        prop_assert_eq!(cache.size(), 0);
        prop_assert!(cache.is_empty());
    }

    // Every sweep removal is counted exactly once.
    #[test]
    fn prop_expirations_account_for_removed_entries(
        keys in prop::collection::hash_set(key_strategy(), 1..20),
        retention in 1i64..100
    ) {
        let (clock, mut cache) = cache_at(0);
        let count = keys.len();
        for key in keys {
            cache.put(key, "v".to_string(), retention);
        }

        clock.advance(retention);
        prop_assert_eq!(cache.purge_expired(), count);
        prop_assert_eq!(cache.stats().expirations, count as u64);
        prop_assert_eq!(cache.purge_expired(), 0);
    }
}
