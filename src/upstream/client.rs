//! Upstream Bill API Client
//!
//! Fetches one page of bills for a congress from the Congress.gov v3 API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::upstream::bill::{map_listing, Bill, RawBillListing};
use crate::upstream::query::{BillQuery, Congress};

// == Bill Source ==
/// Source of truth for bill listings.
///
/// The cache layer only talks to this trait, so tests can swap in a scripted
/// source without any network.
#[async_trait]
pub trait BillSource: Send + Sync {
    /// Fetches bills for a congress. Performs no caching of its own.
    async fn fetch_bills(&self, congress: Congress, query: &BillQuery) -> Result<Vec<Bill>>;
}

// == Congress API Client ==
/// Client for the Congress.gov `/bill/{congress}` listing.
#[derive(Clone)]
pub struct CongressApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CongressApiClient {
    /// Creates a client against `base_url` with the given request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Creates a client from server configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.upstream_base_url.clone(),
            config.congress_api_key.clone(),
            Duration::from_secs(config.upstream_timeout),
        )
    }
}

#[async_trait]
impl BillSource for CongressApiClient {
    async fn fetch_bills(&self, congress: Congress, query: &BillQuery) -> Result<Vec<Bill>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ServiceError::Configuration("CONGRESS_API_KEY is not set".to_string())
        })?;

        let query = query.normalized();
        let url = format!("{}/bill/{}", self.base_url, congress);
        let limit = query.limit.to_string();
        debug!(%congress, limit = query.limit, sort = query.sort.as_str(), "requesting bills upstream");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("limit", limit.as_str()),
                ("sort", query.sort.upstream_param()),
                ("api_key", api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("request failed: {}", e.without_url())
                };
                ServiceError::upstream(None, reason)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(format!(
                "no bills found for congress {}",
                congress
            )));
        }
        if !status.is_success() {
            warn!(%congress, status = status.as_u16(), "upstream bill API returned an error");
            return Err(ServiceError::upstream(
                Some(status.as_u16()),
                format!("bill API returned {}", status),
            ));
        }

        let listing: RawBillListing = response
            .json()
            .await
            .map_err(|e| {
                ServiceError::upstream(None, format!("invalid response body: {}", e.without_url()))
            })?;

        Ok(map_listing(listing))
    }
}
