//! Upstream Module
//!
//! Bill types, query normalization and the client for the external bill API.

mod bill;
mod client;
mod query;

pub use bill::{map_listing, Bill, LatestAction, RawBillListing, RawUpstreamBill};
pub use client::{BillSource, CongressApiClient};
pub use query::{BillQuery, Congress, SortOrder, DEFAULT_BILL_LIMIT, MAX_BILL_LIMIT};
