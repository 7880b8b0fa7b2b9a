//! Cache Store Module
//!
//! Keyed storage of bill listings with timestamps and lookup counters.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::{CacheCounters, CacheEntry, CacheKey, CacheStats, Clock, SystemClock};
use crate::upstream::Bill;

/// Store shared between handlers, the orchestrator and background tasks.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Cache Store ==
/// In-memory bill listing store.
///
/// Holds at most one entry per key. There is no eviction; entries leave only
/// through [`CacheStore::clear`] or process exit.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-entry storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Lookup counters
    counters: CacheCounters,
    /// Time source for `stored_at` and ages
    clock: Arc<dyn Clock>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    // == Constructors ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::default(),
            clock,
        }
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // == Get ==
    /// Looks up an entry. Never touches the network or mutates the store.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Set ==
    /// Stores a payload under `key`, replacing any previous entry.
    ///
    /// `stored_at` is set to the current time (last write wins).
    pub fn set(&mut self, key: CacheKey, payload: Vec<Bill>) {
        let entry = CacheEntry::new(key.clone(), payload, self.clock.now());
        self.entries.insert(key, entry);
    }

    /// Inserts a pre-built entry, keeping its `stored_at`. Used on snapshot restore.
    pub fn insert_entry(&mut self, entry: CacheEntry) {
        self.entries.insert(entry.key.clone(), entry);
    }

    // == Clear ==
    /// Removes every entry and resets the counters.
    ///
    /// Returns the number of entries removed; clearing an empty store returns 0.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.counters = CacheCounters::default();
        removed
    }

    // == Stats ==
    /// Computes a point-in-time summary of the store.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let per_key_age = self
            .entries
            .values()
            .map(|entry| (entry.key.to_string(), entry.age_secs(now)))
            .collect();
        let total_size_approx = self.entries.values().map(|e| e.size_bytes).sum();

        CacheStats {
            entry_count: self.entries.len(),
            per_key_age,
            total_size_approx,
            counters: self.counters,
        }
    }

    // == Counters ==
    pub fn record_hit(&mut self) {
        self.counters.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.counters.misses += 1;
    }

    pub fn record_stale_served(&mut self) {
        self.counters.stale_served += 1;
    }

    pub fn record_upstream_fetch(&mut self) {
        self.counters.upstream_fetches += 1;
    }

    pub fn record_upstream_failure(&mut self) {
        self.counters.upstream_failures += 1;
    }

    // == Iteration ==
    /// Iterates over all entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
