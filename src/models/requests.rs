//! Request DTOs for the bill cache API
//!
//! Defines the query strings accepted by the endpoints.

use serde::Deserialize;

use crate::error::{Result, ServiceError};
use crate::upstream::{BillQuery, Congress, MAX_BILL_LIMIT};

/// Query string for `GET /api/bills/recent`
///
/// Both fields are taken as raw strings so that malformed values produce the
/// service's JSON error body rather than the framework's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentBillsParams {
    /// Congress number, defaults to the configured congress
    #[serde(default)]
    pub congress: Option<String>,
    /// Page size, defaults to the configured limit
    #[serde(default)]
    pub limit: Option<String>,
}

impl RecentBillsParams {
    /// Resolves the congress, falling back to `default`.
    pub fn congress(&self, default: u32) -> Result<Congress> {
        match self.congress.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Congress::new(default),
        }
    }

    /// Resolves the listing options, falling back to `default_limit`.
    pub fn query(&self, default_limit: u32) -> Result<BillQuery> {
        let limit = match self.limit.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<u32>()
                .ok()
                .filter(|l| (1..=MAX_BILL_LIMIT).contains(l))
                .ok_or_else(|| {
                    ServiceError::InvalidRequest(format!(
                        "limit must be between 1 and {}, got '{}'",
                        MAX_BILL_LIMIT, raw
                    ))
                })?,
            _ => default_limit,
        };
        Ok(BillQuery::with_limit(limit))
    }
}

/// Query string for `/api/bills/prefetch`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefetchParams {
    /// Shared secret, required when one is configured
    #[serde(default)]
    pub secret: Option<String>,
}
