//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use tokio::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Monotonic insertion time
    pub created_at: Instant,
    /// Lifetime measured from `created_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiration against a caller-supplied instant.
    ///
    /// Boundary condition: an entry is expired once the elapsed time since
    /// creation is greater than or equal to its TTL, so a zero TTL is
    /// expired immediately.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or zero once the TTL has elapsed.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl_remaining_at(Instant::now())
    }

    pub fn ttl_remaining_at(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.created_at))
    }
}
