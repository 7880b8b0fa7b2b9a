//! Cache Module
//!
//! Provides in-memory storage of bill listings with timestamps and TTL freshness.

mod clock;
mod entry;
mod key;
mod snapshot;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use snapshot::{load_snapshot, restore_snapshot, save_snapshot, Snapshot, SnapshotRecord};
pub use stats::{CacheCounters, CacheStats};
pub use store::{CacheStore, SharedCache};

// == Public Constants ==
/// Default freshness window in seconds
pub const DEFAULT_TTL_SECS: u64 = 3600;
