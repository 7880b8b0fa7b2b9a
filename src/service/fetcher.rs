//! Fetch-With-Cache Orchestrator
//!
//! Serves bill listings from the cache while fresh, refetches them upstream
//! once stale, and falls back to stale data when the upstream is down.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{CacheKey, SharedCache};
use crate::error::{Result, ServiceError};
use crate::upstream::{Bill, BillQuery, BillSource, Congress};

/// Result of a cached bill lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub bills: Vec<Bill>,
    /// True when the bills came from the cache (fresh or stale fallback)
    pub from_cache: bool,
    /// Age of the served data in seconds, 0 for a fresh upstream fetch
    pub cache_age: u64,
}

/// Read-through cache over a [`BillSource`].
///
/// The store lock is only held for lookups and writes, never across an
/// upstream request. Two concurrent misses for one key may both fetch;
/// the later write wins.
pub struct BillFetcher {
    cache: SharedCache,
    source: Arc<dyn BillSource>,
    ttl_secs: u64,
}

impl BillFetcher {
    /// Creates a fetcher over `cache` and `source` with the given TTL in seconds.
    pub fn new(cache: SharedCache, source: Arc<dyn BillSource>, ttl_secs: u64) -> Self {
        Self {
            cache,
            source,
            ttl_secs,
        }
    }

    /// Shared handle to the underlying store.
    pub fn cache(&self) -> SharedCache {
        Arc::clone(&self.cache)
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Returns bills for `congress`, from cache when fresh.
    ///
    /// When the upstream is unreachable or failing, a stale entry is served
    /// instead of the error. `NotFound` and `Configuration` errors always
    /// propagate, as does any error when no entry exists.
    pub async fn fetch_bills_with_cache(
        &self,
        congress: Congress,
        query: &BillQuery,
    ) -> Result<FetchOutcome> {
        let query = query.normalized();
        let key = CacheKey::for_bills(congress, &query);

        // Fresh hit: answer without touching the upstream
        let stale = {
            let mut cache = self.cache.write().await;
            let now = cache.now();
            let lookup = cache.get(&key).map(|entry| {
                (
                    entry.is_fresh(now, self.ttl_secs),
                    entry.age_secs(now),
                    entry.payload.clone(),
                )
            });

            match lookup {
                Some((true, age, bills)) => {
                    cache.record_hit();
                    debug!(%key, age, "bill cache hit");
                    return Ok(FetchOutcome {
                        bills,
                        from_cache: true,
                        cache_age: age,
                    });
                }
                Some((false, _, _)) => {
                    cache.record_miss();
                    debug!(%key, "bill cache entry is stale");
                    true
                }
                None => {
                    cache.record_miss();
                    debug!(%key, "bill cache miss");
                    false
                }
            }
        };

        match self.load_upstream(&key, congress, &query).await {
            Ok(bills) => Ok(FetchOutcome {
                bills,
                from_cache: false,
                cache_age: 0,
            }),
            Err(err @ ServiceError::Upstream { .. }) if stale => {
                self.serve_stale(&key, err).await
            }
            Err(err) => Err(err),
        }
    }

    /// Fetches upstream and stores the result regardless of freshness.
    ///
    /// No stale fallback: callers warming the cache need to see failures.
    pub async fn refresh(&self, congress: Congress, query: &BillQuery) -> Result<Vec<Bill>> {
        let query = query.normalized();
        let key = CacheKey::for_bills(congress, &query);
        self.load_upstream(&key, congress, &query).await
    }

    async fn load_upstream(
        &self,
        key: &CacheKey,
        congress: Congress,
        query: &BillQuery,
    ) -> Result<Vec<Bill>> {
        match self.source.fetch_bills(congress, query).await {
            Ok(bills) => {
                let mut cache = self.cache.write().await;
                cache.record_upstream_fetch();
                cache.set(key.clone(), bills.clone());
                info!(%key, count = bills.len(), "cached bills from upstream");
                Ok(bills)
            }
            Err(err) => {
                self.cache.write().await.record_upstream_failure();
                Err(err)
            }
        }
    }

    async fn serve_stale(&self, key: &CacheKey, err: ServiceError) -> Result<FetchOutcome> {
        let mut cache = self.cache.write().await;
        let now = cache.now();

        // The entry may have been cleared while the upstream call was in flight
        let Some((bills, age)) = cache
            .get(key)
            .map(|entry| (entry.payload.clone(), entry.age_secs(now)))
        else {
            return Err(err);
        };

        cache.record_stale_served();
        warn!(%key, age, error = %err, "upstream failed, serving stale bills");
        Ok(FetchOutcome {
            bills,
            from_cache: true,
            cache_age: age,
        })
    }
}
