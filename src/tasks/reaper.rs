//! Expiration Reaper Task
//!
//! Background task that periodically sweeps expired entries out of a shared
//! cache. Lookups already sweep on access; the reaper only bounds how long
//! expired entries hold memory while a cache sits idle.

use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::AgedCache;
use crate::config::ReaperConfig;
use crate::error::Result;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task sleeps for the configured interval between passes and holds the
/// cache lock only for the duration of a sweep. It keeps a weak handle, so
/// it exits on its own once every other owner has dropped the cache.
///
/// # Arguments
/// * `cache` - Shared handle to the cache; only downgraded, never retained
/// * `config` - Reaper settings; rejected before spawning if invalid
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort it.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Mutex::new(AgedCache::<String, String>::new()));
/// let reaper = spawn_reaper_task(&cache, &ReaperConfig::from_env())?;
/// // Later, during shutdown:
/// reaper.abort();
/// ```
pub fn spawn_reaper_task<K, V>(
    cache: &Arc<Mutex<AgedCache<K, V>>>,
    config: &ReaperConfig,
) -> Result<JoinHandle<()>>
where
    K: Send + 'static,
    V: Send + 'static,
{
    config.validate()?;
    let interval = config.interval();
    let interval_ms = config.interval_ms;
    let weak_cache: Weak<Mutex<AgedCache<K, V>>> = Arc::downgrade(cache);

    Ok(tokio::spawn(async move {
        info!(interval_ms, "Starting expiration reaper task");

        loop {
            tokio::time::sleep(interval).await;

            let Some(cache) = weak_cache.upgrade() else {
                info!("Cache dropped, stopping expiration reaper task");
                break;
            };
            let removed = {
                let mut guard = cache.lock().await;
                guard.purge_expired()
            };

            if removed > 0 {
                info!(removed, "Reaper: removed expired entries");
            } else {
                debug!("Reaper: no expired entries found");
            }
        }
    }))
}
