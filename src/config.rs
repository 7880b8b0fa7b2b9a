//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_TTL_SECS;

/// Default Congress.gov v3 API root.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.congress.gov/v3";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds a cached bill list stays fresh
    pub cache_ttl: u64,
    /// Root URL of the upstream bill API
    pub upstream_base_url: String,
    /// Congress.gov API key; requests fail with a configuration error without it
    pub congress_api_key: Option<String>,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Congress served when a request does not name one
    pub default_congress: u32,
    /// Bills per page when a request does not name a limit
    pub default_limit: u32,
    /// Congresses refreshed by the prefetch endpoint and the warm task
    pub prefetch_congresses: Vec<u32>,
    /// Shared secret required by the prefetch endpoint when set
    pub prefetch_secret: Option<String>,
    /// Maximum concurrent upstream fetches during prefetch
    pub prefetch_concurrency: usize,
    /// Interval of the in-process warm task in seconds, 0 = disabled
    pub warm_interval: u64,
    /// File the cache is persisted to across restarts
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL_SECS` - Freshness window in seconds (default: 3600)
    /// - `CONGRESS_API_BASE_URL` - Upstream root (default: Congress.gov v3)
    /// - `CONGRESS_API_KEY` - Upstream API key (no default)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream timeout (default: 15)
    /// - `DEFAULT_CONGRESS` - Congress when none is requested (default: 119)
    /// - `DEFAULT_BILL_LIMIT` - Page size when none is requested (default: 20)
    /// - `PREFETCH_CONGRESSES` - Comma separated list (default: "119,118")
    /// - `PREFETCH_SECRET` - Shared secret for the prefetch endpoint (no default)
    /// - `PREFETCH_CONCURRENCY` - Concurrent prefetch fetches (default: 2)
    /// - `WARM_INTERVAL_SECS` - Warm task interval, 0 disables (default: 0)
    /// - `CACHE_SNAPSHOT_PATH` - Snapshot file (no default)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl),
            upstream_base_url: non_empty_var("CONGRESS_API_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            congress_api_key: non_empty_var("CONGRESS_API_KEY"),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or(defaults.upstream_timeout),
            default_congress: parse_var("DEFAULT_CONGRESS")
                .filter(|c| *c > 0)
                .unwrap_or(defaults.default_congress),
            default_limit: parse_var("DEFAULT_BILL_LIMIT")
                .filter(|l| *l > 0)
                .unwrap_or(defaults.default_limit),
            prefetch_congresses: non_empty_var("PREFETCH_CONGRESSES")
                .map(|v| parse_congress_list(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or(defaults.prefetch_congresses),
            prefetch_secret: non_empty_var("PREFETCH_SECRET"),
            prefetch_concurrency: parse_var("PREFETCH_CONCURRENCY")
                .filter(|c| *c > 0)
                .unwrap_or(defaults.prefetch_concurrency),
            warm_interval: parse_var("WARM_INTERVAL_SECS").unwrap_or(defaults.warm_interval),
            snapshot_path: non_empty_var("CACHE_SNAPSHOT_PATH").map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_TTL_SECS,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            congress_api_key: None,
            upstream_timeout: 15,
            default_congress: 119,
            default_limit: 20,
            prefetch_congresses: vec![119, 118],
            prefetch_secret: None,
            prefetch_concurrency: 2,
            warm_interval: 0,
            snapshot_path: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}

/// Parses "119, 118,117" into congress numbers, skipping invalid items.
pub fn parse_congress_list(raw: &str) -> Vec<u32> {
    raw.split(',')
        .filter_map(|item| item.trim().parse::<u32>().ok())
        .filter(|c| *c > 0)
        .collect()
}
