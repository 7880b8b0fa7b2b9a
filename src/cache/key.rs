//! Cache Key Module
//!
//! Derives the storage key for a congress and its normalized listing options.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::upstream::{BillQuery, Congress};

/// Key of one cached bill listing, e.g. `bills:119:limit=20:sort=desc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds the key from a congress and query. The query is normalized
    /// first so equivalent requests share an entry.
    pub fn for_bills(congress: Congress, query: &BillQuery) -> Self {
        let query = query.normalized();
        Self(format!(
            "bills:{}:limit={}:sort={}",
            congress,
            query.limit,
            query.sort.as_str()
        ))
    }

    /// Wraps an arbitrary key string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
