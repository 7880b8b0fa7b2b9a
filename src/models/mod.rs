//! Request and Response models for the bill cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! parsing query strings and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{PrefetchParams, RecentBillsParams};
pub use responses::{
    CacheStatsResponse, ClearCacheResponse, ErrorResponse, HealthResponse, PrefetchResponse,
    RecentBillsResponse,
};
