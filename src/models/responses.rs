//! Response DTOs for the bill cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::service::{FetchOutcome, PrefetchReport, SessionResult};
use crate::upstream::{Bill, Congress};

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Response body for `GET /api/bills/recent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBillsResponse {
    pub bills: Vec<Bill>,
    pub congress: Congress,
    pub from_cache: bool,
    /// Age of the served data in seconds
    pub cache_age: u64,
}

impl RecentBillsResponse {
    pub fn new(congress: Congress, outcome: FetchOutcome) -> Self {
        Self {
            bills: outcome.bills,
            congress,
            from_cache: outcome.from_cache,
            cache_age: outcome.cache_age,
        }
    }
}

/// Response body for `GET /api/bills/cache-stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Configured freshness window
    pub ttl_seconds: u64,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats, ttl_seconds: u64) -> Self {
        Self {
            success: true,
            hit_rate: stats.counters.hit_rate(),
            stats,
            ttl_seconds,
            timestamp: now_rfc3339(),
        }
    }
}

/// Response body for `DELETE /api/bills/cache-stats`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
    /// Number of entries removed
    pub cleared: usize,
    pub timestamp: String,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            success: true,
            message: format!("Cache cleared ({} entries removed)", cleared),
            cleared,
            timestamp: now_rfc3339(),
        }
    }
}

/// Response body for `GET|POST /api/bills/prefetch`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefetchResponse {
    /// True once the run completed, even if some congresses failed
    pub success: bool,
    /// Wall-clock duration in milliseconds
    pub duration: u64,
    pub congresses_prefetched: Vec<Congress>,
    pub results: Vec<SessionResult>,
    pub cache_stats: CacheStats,
    pub timestamp: String,
}

impl PrefetchResponse {
    pub fn new(report: PrefetchReport, cache_stats: CacheStats) -> Self {
        Self {
            success: true,
            duration: report.duration.as_millis() as u64,
            congresses_prefetched: report.results.iter().map(|r| r.congress).collect(),
            results: report.results,
            cache_stats,
            timestamp: now_rfc3339(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: now_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
