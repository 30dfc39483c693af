//! TTL Cache - An in-process key/value cache with time-based expiration
//!
//! Values are stored under string keys with a per-entry TTL. A background
//! sweep task bound to a cancellation token periodically purges expired
//! entries.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::{CacheConfig, Freshness};
pub use error::CacheError;
pub use tokio_util::sync::CancellationToken;
