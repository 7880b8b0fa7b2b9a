//! API Handlers
//!
//! HTTP request handlers for each bill cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::cache::{restore_snapshot, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    CacheStatsResponse, ClearCacheResponse, HealthResponse, PrefetchParams, PrefetchResponse,
    RecentBillsParams, RecentBillsResponse,
};
use crate::service::{prefetch_bills, BillFetcher};
use crate::upstream::{BillQuery, Congress, CongressApiClient};

/// Application state shared across all handlers.
///
/// Holds the shared store, the fetcher built on it and the server configuration.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Read-through fetcher over the store
    pub fetcher: Arc<BillFetcher>,
    /// Server configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new AppState around an existing fetcher.
    pub fn new(fetcher: BillFetcher, config: Config) -> Self {
        Self {
            cache: fetcher.cache(),
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the Congress.gov client and a fresh store, restoring the
    /// snapshot when one is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut store = CacheStore::new();
        if let Some(path) = &config.snapshot_path {
            restore_snapshot(&mut store, path);
        }

        let client = CongressApiClient::from_config(config)?;
        if config.congress_api_key.is_none() {
            warn!("CONGRESS_API_KEY is not set; upstream requests will fail");
        }

        let fetcher = BillFetcher::new(store.into_shared(), Arc::new(client), config.cache_ttl);
        Ok(Self::new(fetcher, config.clone()))
    }

    /// Congresses warmed by prefetch, skipping invalid configured values.
    pub fn prefetch_congresses(&self) -> Vec<Congress> {
        self.config
            .prefetch_congresses
            .iter()
            .filter_map(|n| Congress::new(*n).ok())
            .collect()
    }

    /// Listing options used when a request does not override them.
    pub fn default_query(&self) -> BillQuery {
        BillQuery::with_limit(self.config.default_limit)
    }
}

/// Checks `supplied` against the configured secret in constant time.
///
/// Passes when no secret is configured.
pub fn verify_secret(configured: Option<&str>, supplied: Option<&str>) -> Result<()> {
    let Some(expected) = configured else {
        return Ok(());
    };
    let supplied = supplied.unwrap_or_default();

    if expected.as_bytes().ct_eq(supplied.as_bytes()).unwrap_u8() == 1 {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized(
            "missing or invalid prefetch secret".to_string(),
        ))
    }
}

/// Handler for GET /api/bills/recent
///
/// Returns recent bills for a congress through the read-through cache.
pub async fn recent_bills_handler(
    State(state): State<AppState>,
    Query(params): Query<RecentBillsParams>,
) -> Result<Json<RecentBillsResponse>> {
    let congress = params.congress(state.config.default_congress)?;
    let query = params.query(state.config.default_limit)?;

    let outcome = state.fetcher.fetch_bills_with_cache(congress, &query).await?;

    Ok(Json(RecentBillsResponse::new(congress, outcome)))
}

/// Handler for GET and POST /api/bills/prefetch
///
/// Force-refreshes the configured congresses. Rejected with 401 before any
/// upstream call when the secret does not match.
pub async fn prefetch_handler(
    State(state): State<AppState>,
    Query(params): Query<PrefetchParams>,
) -> Result<Json<PrefetchResponse>> {
    verify_secret(
        state.config.prefetch_secret.as_deref(),
        params.secret.as_deref(),
    )?;

    let congresses = state.prefetch_congresses();
    info!(count = congresses.len(), "starting bill prefetch");

    let report = prefetch_bills(
        &state.fetcher,
        &congresses,
        &state.default_query(),
        state.config.prefetch_concurrency,
    )
    .await;

    let stats = state.cache.read().await.stats();
    Ok(Json(PrefetchResponse::new(report, stats)))
}

/// Handler for GET /api/bills/cache-stats
///
/// Returns current cache statistics.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    // Acquire read lock for stats
    let stats = state.cache.read().await.stats();

    Json(CacheStatsResponse::new(stats, state.fetcher.ttl_secs()))
}

/// Handler for DELETE /api/bills/cache-stats
///
/// Clears every cached listing. Clearing an empty cache succeeds.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.write().await.clear();
    info!(cleared, "bill cache cleared");

    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
