//! Cache Statistics Module
//!
//! Lookup counters and the point-in-time summary reported by the admin surface.

use std::collections::BTreeMap;

use serde::Serialize;

// == Cache Counters ==
/// Running counters recorded by the fetch orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheCounters {
    /// Requests answered from a fresh entry
    pub hits: u64,
    /// Requests that needed an upstream fetch
    pub misses: u64,
    /// Requests answered from a stale entry after an upstream failure
    pub stale_served: u64,
    /// Successful upstream fetches
    pub upstream_fetches: u64,
    /// Failed upstream fetches
    pub upstream_failures: u64,
}

impl CacheCounters {
    /// Calculates the hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Cache Stats ==
/// Derived summary of the store, computed on demand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Current number of entries
    pub entry_count: usize,
    /// Age in seconds of each entry, keyed by cache key
    pub per_key_age: BTreeMap<String, u64>,
    /// Sum of the approximate payload sizes in bytes
    pub total_size_approx: usize,
    /// Lookup counters since start or last clear
    #[serde(flatten)]
    pub counters: CacheCounters,
}
