//! Bill Cache - A read-through cache server for Congress.gov bill listings
//!
//! Serves recent bills per congress with TTL freshness, stale fallback,
//! prefetch warming and an administration surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ServiceError};
pub use tasks::spawn_warm_task;
