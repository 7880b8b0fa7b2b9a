//! Cache Warm Task
//!
//! Background task that periodically refreshes the configured congresses.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::service::{prefetch_bills, BillFetcher};
use crate::upstream::{BillQuery, Congress};

/// Spawns a background task that re-runs the prefetch on a fixed interval.
///
/// The first run happens immediately so the cache is warm before the first
/// request. Failures are logged by the prefetch driver and do not stop the loop.
///
/// # Arguments
/// * `fetcher` - Shared fetcher whose store is warmed
/// * `congresses` - Congresses refreshed on every run
/// * `query` - Listing options to warm
/// * `concurrency` - Upstream concurrency bound per run
/// * `interval_secs` - Seconds between runs
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_warm_task(
    fetcher: Arc<BillFetcher>,
    congresses: Vec<Congress>,
    query: BillQuery,
    concurrency: usize,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache warm task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        // A slow run pushes the next one back instead of firing missed runs in a burst
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;

            let report = prefetch_bills(&fetcher, &congresses, &query, concurrency).await;
            debug!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                "cache warm run finished"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::error::Result;
    use crate::upstream::{Bill, BillSource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BillSource for CountingSource {
        async fn fetch_bills(&self, _congress: Congress, _query: &BillQuery) -> Result<Vec<Bill>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    fn setup() -> (Arc<BillFetcher>, Arc<CountingSource>) {
        let source = Arc::new(CountingSource::default());
        let fetcher = BillFetcher::new(CacheStore::new().into_shared(), source.clone(), 3600);
        (Arc::new(fetcher), source)
    }

    #[tokio::test]
    async fn test_warm_task_runs_immediately() {
        let (fetcher, source) = setup();
        let congresses = vec![Congress::new(119).unwrap(), Congress::new(118).unwrap()];

        let handle = spawn_warm_task(fetcher.clone(), congresses, BillQuery::default(), 2, 3600);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetcher.cache().read().await.len(), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_warm_task_repeats_on_interval() {
        let (fetcher, source) = setup();

        let handle = spawn_warm_task(
            fetcher,
            vec![Congress::new(119).unwrap()],
            BillQuery::default(),
            1,
            1,
        );

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(source.calls.load(Ordering::SeqCst) >= 2);

        handle.abort();
    }

    /// First call takes longer than the warm interval, later calls return at once.
    #[derive(Default)]
    struct SlowFirstSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl BillSource for SlowFirstSource {
        async fn fetch_bills(&self, _congress: Congress, _query: &BillQuery) -> Result<Vec<Bill>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(2500)).await;
            }
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_slow_run_does_not_burst_missed_runs() {
        let source = Arc::new(SlowFirstSource::default());
        let fetcher = BillFetcher::new(CacheStore::new().into_shared(), source.clone(), 3600);

        let handle = spawn_warm_task(
            Arc::new(fetcher),
            vec![Congress::new(119).unwrap()],
            BillQuery::default(),
            1,
            1,
        );

        // Runs at 0s and 2.5s; the next one waits a full interval
        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test]
    async fn test_warm_task_can_be_aborted() {
        let (fetcher, _source) = setup();

        let handle = spawn_warm_task(fetcher, vec![], BillQuery::default(), 1, 1);

        // Abort immediately
        handle.abort();

        // Wait a bit and verify task is finished
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
