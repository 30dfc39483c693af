//! Cache Module
//!
//! Provides the in-process key/value table with TTL expiration and
//! periodic sweeping.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::Cache;

pub(crate) use store::CacheInner;

// == Public Constants ==
/// Shortest sweep interval a cache will run with
pub const MIN_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);
