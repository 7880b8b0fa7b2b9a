//! API Routes
//!
//! Configures the Axum router with all bill cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, health_handler, prefetch_handler,
    recent_bills_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/bills/recent` - Recent bills for a congress (cached)
/// - `GET|POST /api/bills/prefetch` - Warm the cache for configured congresses
/// - `GET /api/bills/cache-stats` - Cache statistics
/// - `DELETE /api/bills/cache-stats` - Clear the cache
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/bills/recent", get(recent_bills_handler))
        .route(
            "/api/bills/prefetch",
            get(prefetch_handler).post(prefetch_handler),
        )
        .route(
            "/api/bills/cache-stats",
            get(cache_stats_handler).delete(clear_cache_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
