//! Query Types
//!
//! Session identifiers and normalized listing options used to key the cache.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Largest page size the upstream API accepts.
pub const MAX_BILL_LIMIT: u32 = 250;

/// Page size used when a query does not specify one.
pub const DEFAULT_BILL_LIMIT: u32 = 20;

// == Congress ==
/// A two-year legislative session number (e.g. 119).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Congress(u32);

impl Congress {
    /// Creates a congress id, rejecting zero.
    pub fn new(number: u32) -> Result<Self> {
        if number == 0 {
            return Err(ServiceError::InvalidRequest(
                "congress must be a positive integer".to_string(),
            ));
        }
        Ok(Self(number))
    }

    /// Returns the session number.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for Congress {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        let number = s.trim().parse::<u32>().map_err(|_| {
            ServiceError::InvalidRequest(format!(
                "congress must be a positive integer, got '{}'",
                s
            ))
        })?;
        Self::new(number)
    }
}

impl fmt::Display for Congress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// == Sort Order ==
/// Ordering of bills by their last update date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently updated first
    #[default]
    Desc,
    /// Least recently updated first
    Asc,
}

impl SortOrder {
    /// Short label used inside cache keys.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }

    /// Value of the upstream `sort` query parameter.
    pub fn upstream_param(self) -> &'static str {
        match self {
            SortOrder::Desc => "updateDate desc",
            SortOrder::Asc => "updateDate asc",
        }
    }
}

// == Bill Query ==
/// Listing options for one upstream page of bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BillQuery {
    /// Number of bills to request
    pub limit: u32,
    /// Update-date ordering
    pub sort: SortOrder,
}

impl Default for BillQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_BILL_LIMIT,
            sort: SortOrder::Desc,
        }
    }
}

impl BillQuery {
    /// Creates a query with the given limit and default ordering.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
        .normalized()
    }

    /// Clamps the limit into `1..=MAX_BILL_LIMIT`.
    ///
    /// Two queries that normalize to the same value share a cache entry.
    pub fn normalized(self) -> Self {
        let limit = match self.limit {
            0 => DEFAULT_BILL_LIMIT,
            l => l.min(MAX_BILL_LIMIT),
        };
        Self { limit, ..self }
    }
}
