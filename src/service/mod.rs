//! Service Module
//!
//! The read-through bill fetcher and the prefetch driver built on top of it.

mod fetcher;
mod prefetch;

pub use fetcher::{BillFetcher, FetchOutcome};
pub use prefetch::{prefetch_bills, PrefetchReport, SessionResult};
