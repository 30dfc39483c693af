//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use crate::cache::CacheInner;

/// Spawns the sweep task for one cache on `tracker`.
///
/// Each cycle waits one `interval`, then takes the table's write lock just
/// long enough to drop expired entries. The wait races against `lifetime`,
/// so cancellation is observed without sleeping out the interval. The task
/// only holds a weak reference to the table and exits on its own once the
/// cache has been dropped.
pub(crate) fn spawn_sweep_task<V>(
    tracker: &TaskTracker,
    cache: Weak<CacheInner<V>>,
    interval: Duration,
    lifetime: CancellationToken,
)
where
    V: Send + Sync + 'static,
{
    tracker.spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        loop {
            tokio::select! {
                biased;
                _ = lifetime.cancelled() => {
                    info!("TTL sweep task cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let Some(cache) = cache.upgrade() else {
                debug!("Cache dropped, stopping TTL sweep task");
                break;
            };

            let removed = cache.remove_expired().await;
            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    });
}
