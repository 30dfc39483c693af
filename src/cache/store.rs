//! Cache Store Module
//!
//! Main cache engine: a string-keyed table behind one reader/writer lock,
//! plus the handle to its background sweep task.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::warn;

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, MIN_SWEEP_INTERVAL};
use crate::config::{CacheConfig, Freshness};
use crate::tasks::spawn_sweep_task;

// == Shared Table ==
/// State shared between cache handles and the sweep task.
pub(crate) struct CacheInner<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    stats: StatsRecorder,
    freshness: Freshness,
}

impl<V> CacheInner<V> {
    fn new(freshness: Freshness) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsRecorder::default(),
            freshness,
        }
    }

    /// Filters out entries that must read as absent under the freshness policy.
    fn visible<'a>(&self, entry: Option<&'a CacheEntry<V>>) -> Option<&'a CacheEntry<V>> {
        match self.freshness {
            Freshness::Lazy => entry,
            Freshness::Strict => entry.filter(|entry| !entry.is_expired()),
        }
    }

    // == Remove Expired ==
    /// Removes every entry whose TTL has elapsed.
    ///
    /// The write lock is held for the whole scan. Returns the number of
    /// entries removed.
    pub(crate) async fn remove_expired(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write().await;
            let now = Instant::now();
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        self.stats.record_sweep(removed);
        removed
    }
}

// == Cache ==
/// In-process TTL cache with a background sweeper.
///
/// Handles are cheap to clone and all refer to the same table. The sweep
/// task stops when the lifetime token is cancelled, or at its next cycle
/// once every handle has been dropped.
pub struct Cache<V> {
    inner: Arc<CacheInner<V>>,
    sweeper: TaskTracker,
    sweep_interval: Duration,
    default_ttl: Duration,
}

impl<V> Cache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// Uses the default TTL and read policy from [`CacheConfig::default`].
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(sweep_interval: Duration, lifetime: CancellationToken) -> Self {
        let config = CacheConfig {
            sweep_interval,
            ..CacheConfig::default()
        };
        Self::with_config(&config, lifetime)
    }

    /// Creates an empty cache from a full configuration and starts its
    /// sweep task.
    ///
    /// Intervals shorter than [`MIN_SWEEP_INTERVAL`] are raised to it.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_config(config: &CacheConfig, lifetime: CancellationToken) -> Self {
        let sweep_interval = if config.sweep_interval < MIN_SWEEP_INTERVAL {
            warn!(
                requested = ?config.sweep_interval,
                "Sweep interval too short, using {:?}",
                MIN_SWEEP_INTERVAL
            );
            MIN_SWEEP_INTERVAL
        } else {
            config.sweep_interval
        };

        let inner = Arc::new(CacheInner::new(config.freshness));
        let sweeper = TaskTracker::new();
        spawn_sweep_task(&sweeper, Arc::downgrade(&inner), sweep_interval, lifetime);
        sweeper.close();

        Self {
            inner,
            sweeper,
            sweep_interval,
            default_ttl: config.default_ttl,
        }
    }
}

impl<V> Cache<V> {
    // == Load ==
    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// An existing entry is left untouched, even if its TTL has elapsed and
    /// it is only waiting for the sweeper. Returns `true` if the value was
    /// inserted.
    pub async fn load(&self, key: impl Into<String>, value: V, ttl: Duration) -> bool {
        let mut entries = self.inner.entries.write().await;
        match entries.entry(key.into()) {
            hash_map::Entry::Occupied(_) => {
                self.inner.stats.record_rejected_load();
                false
            }
            hash_map::Entry::Vacant(slot) => {
                slot.insert(CacheEntry::new(value, ttl));
                true
            }
        }
    }

    /// Same as [`Cache::load`] with the configured default TTL.
    pub async fn load_default(&self, key: impl Into<String>, value: V) -> bool {
        self.load(key, value, self.default_ttl).await
    }

    // == Contains ==
    /// Returns whether `key` is currently readable.
    ///
    /// Under [`Freshness::Lazy`] any entry still in the table counts, expired
    /// or not. Under [`Freshness::Strict`] expired entries do not.
    pub async fn contains(&self, key: &str) -> bool {
        let entries = self.inner.entries.read().await;
        self.inner.visible(entries.get(key)).is_some()
    }

    /// Remaining lifetime of a readable entry.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let entries = self.inner.entries.read().await;
        self.inner
            .visible(entries.get(key))
            .map(CacheEntry::ttl_remaining)
    }

    // == Sweep ==
    /// Runs one sweep immediately, independent of the background task.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        self.inner.remove_expired().await
    }

    // == Length ==
    /// Returns the number of entries in the table, including expired ones
    /// not yet swept.
    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.inner.stats.snapshot(total_entries)
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn freshness(&self) -> Freshness {
        self.inner.freshness
    }

    // == Sweeper Lifecycle ==
    /// Returns `true` while the background sweep task is running.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_empty()
    }

    /// Waits until the background sweep task has exited.
    pub async fn sweeper_stopped(&self) {
        self.sweeper.wait().await;
    }
}

impl<V: Clone> Cache<V> {
    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns `None` when the key is absent, or expired under
    /// [`Freshness::Strict`].
    pub async fn get(&self, key: &str) -> Option<V> {
        let value = {
            let entries = self.inner.entries.read().await;
            self.inner
                .visible(entries.get(key))
                .map(|entry| entry.value.clone())
        };

        match value {
            Some(_) => self.inner.stats.record_hit(),
            None => self.inner.stats.record_miss(),
        }
        value
    }
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            sweeper: self.sweeper.clone(),
            sweep_interval: self.sweep_interval,
            default_ttl: self.default_ttl,
        }
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("sweep_interval", &self.sweep_interval)
            .field("default_ttl", &self.default_ttl)
            .field("freshness", &self.inner.freshness)
            .field("sweeping", &self.is_sweeping())
            .finish()
    }
}
