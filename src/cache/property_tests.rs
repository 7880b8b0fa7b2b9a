//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's storage, overwrite, clear and stats behavior.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::{CacheKey, CacheStore, ManualClock};
use crate::upstream::{Bill, BillQuery, Congress, SortOrder};

// == Strategies ==
fn congress_strategy() -> impl Strategy<Value = Congress> {
    (1u32..=130).prop_map(|n| Congress::new(n).unwrap())
}

fn query_strategy() -> impl Strategy<Value = BillQuery> {
    (0u32..400, prop::bool::ANY).prop_map(|(limit, asc)| BillQuery {
        limit,
        sort: if asc { SortOrder::Asc } else { SortOrder::Desc },
    })
}

fn key_strategy() -> impl Strategy<Value = CacheKey> {
    (congress_strategy(), query_strategy()).prop_map(|(c, q)| CacheKey::for_bills(c, &q))
}

fn bill_strategy() -> impl Strategy<Value = Bill> {
    (
        1u32..=130,
        prop::sample::select(vec!["HR", "S", "HRES", "SJRES"]),
        1u32..10_000,
        "[a-zA-Z0-9 ]{1,80}",
        prop::option::of("20[0-9]{2}-[01][0-9]-[0-3][0-9]"),
    )
        .prop_map(|(congress, bill_type, number, title, update_date)| Bill {
            congress,
            bill_type: bill_type.to_string(),
            number: number.to_string(),
            title,
            origin_chamber: None,
            latest_action: None,
            update_date,
            url: None,
        })
}

fn payload_strategy() -> impl Strategy<Value = Vec<Bill>> {
    prop::collection::vec(bill_strategy(), 0..25)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: CacheKey, payload: Vec<Bill> },
    Advance { secs: i64 },
    Clear,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (key_strategy(), payload_strategy())
            .prop_map(|(key, payload)| StoreOp::Set { key, payload }),
        2 => (0i64..5000).prop_map(|secs| StoreOp::Advance { secs }),
        1 => Just(StoreOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a payload and reading it back returns the same bills.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), payload in payload_strategy()) {
        let mut store = CacheStore::new();

        store.set(key.clone(), payload.clone());

        let entry = store.get(&key).unwrap();
        prop_assert_eq!(&entry.payload, &payload, "Round-trip payload mismatch");
        prop_assert_eq!(&entry.key, &key);
    }

    // A second set for the same key replaces the first; one entry remains.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        first in payload_strategy(),
        second in payload_strategy()
    ) {
        let mut store = CacheStore::new();

        store.set(key.clone(), first);
        store.set(key.clone(), second.clone());

        prop_assert_eq!(&store.get(&key).unwrap().payload, &second);
        prop_assert_eq!(store.len(), 1, "Should have exactly one entry after overwrite");
    }

    // Key derivation ignores differences that normalize away.
    #[test]
    fn prop_key_is_normalized(congress in congress_strategy(), query in query_strategy()) {
        prop_assert_eq!(
            CacheKey::for_bills(congress, &query),
            CacheKey::for_bills(congress, &query.normalized())
        );
    }

    // Entry count always equals the number of distinct keys set since the last clear,
    // and every reported age matches the clock.
    #[test]
    fn prop_stats_track_operations(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let clock = ManualClock::default();
        let mut store = CacheStore::with_clock(Arc::new(clock.clone()));
        let mut live_keys: HashSet<CacheKey> = HashSet::new();

        for op in ops {
            match op {
                StoreOp::Set { key, payload } => {
                    store.set(key.clone(), payload);
                    live_keys.insert(key);
                }
                StoreOp::Advance { secs } => clock.advance_secs(secs),
                StoreOp::Clear => {
                    let removed = store.clear();
                    prop_assert_eq!(removed, live_keys.len());
                    live_keys.clear();
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.entry_count, live_keys.len());
        prop_assert_eq!(stats.per_key_age.len(), live_keys.len());
        for entry in store.entries() {
            let age = stats.per_key_age[entry.key.as_str()];
            prop_assert_eq!(age, (store.now() - entry.stored_at).num_seconds() as u64);
        }
        prop_assert_eq!(
            stats.total_size_approx,
            store.entries().map(|e| e.size_bytes).sum::<usize>()
        );
    }

    // Clearing twice never fails and leaves the store empty.
    #[test]
    fn prop_clear_is_idempotent(keys in prop::collection::vec(key_strategy(), 0..20)) {
        let mut store = CacheStore::new();
        for key in keys {
            store.set(key, vec![]);
        }

        store.clear();
        prop_assert_eq!(store.clear(), 0);
        prop_assert!(store.is_empty());
        prop_assert_eq!(store.stats().entry_count, 0);
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Exercises shared access through Arc<RwLock<CacheStore>>

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Concurrent writers to the same key never corrupt the store: the surviving
    // payload is exactly one of the written payloads.
    #[test]
    fn prop_concurrent_last_write_wins(
        key in key_strategy(),
        payloads in prop::collection::vec(payload_strategy(), 2..10)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let store = CacheStore::new().into_shared();

            let mut handles = vec![];
            for payload in payloads.clone() {
                let store = Arc::clone(&store);
                let key = key.clone();
                handles.push(tokio::spawn(async move {
                    store.write().await.set(key, payload);
                }));
            }
            for handle in handles {
                handle.await.expect("Task should not panic");
            }

            let cache = store.read().await;
            prop_assert_eq!(cache.len(), 1);
            let stored = &cache.get(&key).unwrap().payload;
            prop_assert!(
                payloads.iter().any(|p| p == stored),
                "Stored payload should be one of the written payloads"
            );
            Ok(())
        })?;
    }
}
