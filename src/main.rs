//! Bill Cache - A read-through cache server for Congress.gov bill listings
//!
//! Serves recent bills per congress with TTL freshness and prefetch warming.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bill_cache::api::create_router;
use bill_cache::cache::save_snapshot;
use bill_cache::{spawn_warm_task, AppState, Config};

/// Main entry point for the bill cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create cache store (restoring the snapshot if configured) and upstream client
/// 4. Start the background warm task if an interval is configured
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM stop the warm task and write the snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bill_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bill Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, ttl={}s, upstream={}, prefetch={:?}, warm_interval={}s",
        config.server_port,
        config.cache_ttl,
        config.upstream_base_url,
        config.prefetch_congresses,
        config.warm_interval
    );

    // Create application state with cache store and upstream client
    let state = AppState::from_config(&config).context("failed to initialize application state")?;
    info!("Cache store initialized");

    // Start background warm task
    let warm_handle = (config.warm_interval > 0).then(|| {
        info!("Background warm task started");
        spawn_warm_task(
            state.fetcher.clone(),
            state.prefetch_congresses(),
            state.default_query(),
            config.prefetch_concurrency,
            config.warm_interval,
        )
    });

    // Create router with all endpoints
    let app = create_router(state.clone());

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(warm_handle))
        .await
        .context("server error")?;

    if let Some(path) = &config.snapshot_path {
        let cache = state.cache.read().await;
        match save_snapshot(&cache, path) {
            Ok(count) => info!(path = %path.display(), entries = count, "cache snapshot written"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to write cache snapshot"),
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the warm task and allows graceful shutdown.
async fn shutdown_signal(warm_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the warm task
    if let Some(handle) = warm_handle {
        handle.abort();
        warn!("Warm task aborted");
    }
}
