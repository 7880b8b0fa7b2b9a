//! Prefetch/Warm Driver
//!
//! Refreshes a list of congresses ahead of user traffic.

use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::service::BillFetcher;
use crate::upstream::{BillQuery, Congress};

/// Outcome of refreshing one congress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub congress: Congress,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of a whole prefetch run.
#[derive(Debug, Clone)]
pub struct PrefetchReport {
    /// Wall-clock time of the run
    pub duration: Duration,
    /// One result per requested congress, in request order
    pub results: Vec<SessionResult>,
}

impl PrefetchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Force-refreshes every congress in `congresses`.
///
/// At most `concurrency` upstream requests run at once (minimum 1). A failing
/// congress is recorded and does not stop the others.
pub async fn prefetch_bills(
    fetcher: &BillFetcher,
    congresses: &[Congress],
    query: &BillQuery,
    concurrency: usize,
) -> PrefetchReport {
    let started = Instant::now();
    let concurrency = concurrency.max(1);

    let results: Vec<SessionResult> = stream::iter(congresses.iter().copied())
        .map(|congress| async move {
            match fetcher.refresh(congress, query).await {
                Ok(bills) => SessionResult {
                    congress,
                    success: true,
                    bill_count: Some(bills.len()),
                    error: None,
                },
                Err(err) => {
                    warn!(%congress, error = %err, "prefetch failed for congress");
                    SessionResult {
                        congress,
                        success: false,
                        bill_count: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .buffered(concurrency)
        .collect()
        .await;

    let report = PrefetchReport {
        duration: started.elapsed(),
        results,
    };
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        duration_ms = report.duration.as_millis() as u64,
        "bill prefetch complete"
    );
    report
}
