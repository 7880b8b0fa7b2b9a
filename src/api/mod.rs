//! API Module
//!
//! HTTP handlers and routing for the bill cache REST API.
//!
//! # Endpoints
//! - `GET /api/bills/recent?congress=<id>` - Recent bills, served read-through
//! - `GET|POST /api/bills/prefetch?secret=<secret>` - Warm the cache
//! - `GET /api/bills/cache-stats` - Cache statistics
//! - `DELETE /api/bills/cache-stats` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
