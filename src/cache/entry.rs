//! Cache Entry Module
//!
//! Defines the structure for individual cached bill listings.

use chrono::{DateTime, Utc};

use crate::cache::CacheKey;
use crate::upstream::Bill;

// == Cache Entry ==
/// A cached bill listing with the time it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Key the entry is stored under
    pub key: CacheKey,
    /// The cached bills, in upstream order
    pub payload: Vec<Bill>,
    /// When the payload was fetched
    pub stored_at: DateTime<Utc>,
    /// Approximate serialized size of the payload in bytes
    pub size_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stored at `stored_at`.
    pub fn new(key: CacheKey, payload: Vec<Bill>, stored_at: DateTime<Utc>) -> Self {
        let size_bytes = approx_size(&payload);
        Self {
            key,
            payload,
            stored_at,
            size_bytes,
        }
    }

    // == Age ==
    /// Whole seconds since the entry was stored, never negative.
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        (now - self.stored_at).num_seconds().max(0) as u64
    }

    // == Freshness ==
    /// Checks whether the entry is still within its TTL.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_secs: u64) -> bool {
        self.age_secs(now) < ttl_secs
    }
}

/// Serialized JSON length of the payload; 0 if serialization fails.
fn approx_size(payload: &[Bill]) -> usize {
    serde_json::to_vec(payload).map(|v| v.len()).unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn bill(number: &str) -> Bill {
        Bill {
            congress: 119,
            bill_type: "HR".to_string(),
            number: number.to_string(),
            title: format!("Bill {number}"),
            origin_chamber: None,
            latest_action: None,
            update_date: None,
            url: None,
        }
    }

    #[test]
    fn test_entry_creation() {
        let now = Utc::now();
        let entry = CacheEntry::new(CacheKey::from_raw("k"), vec![bill("1")], now);

        assert_eq!(entry.payload.len(), 1);
        assert_eq!(entry.stored_at, now);
        assert!(entry.size_bytes > 0);
    }

    #[test]
    fn test_empty_payload_size() {
        let entry = CacheEntry::new(CacheKey::from_raw("k"), vec![], Utc::now());
        // "[]"
        assert_eq!(entry.size_bytes, 2);
    }

    #[test]
    fn test_age_secs() {
        let stored = Utc::now();
        let entry = CacheEntry::new(CacheKey::from_raw("k"), vec![], stored);

        assert_eq!(entry.age_secs(stored), 0);
        assert_eq!(entry.age_secs(stored + Duration::seconds(100)), 100);
        // Clock skew never yields a negative age
        assert_eq!(entry.age_secs(stored - Duration::seconds(5)), 0);
    }

    #[test]
    fn test_freshness_boundary_condition() {
        let stored = Utc::now();
        let entry = CacheEntry::new(CacheKey::from_raw("k"), vec![], stored);

        assert!(entry.is_fresh(stored + Duration::seconds(3599), 3600));
        assert!(!entry.is_fresh(stored + Duration::seconds(3600), 3600));
        assert!(!entry.is_fresh(stored, 0));
    }
}
