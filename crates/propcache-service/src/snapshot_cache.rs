//! Cache-aside access to the full listing snapshot.

use crate::cache::{cache_keys, CacheInterface};
use crate::telemetry::{CacheTelemetry, SnapshotOutcome};
use propcache_core::{Listing, PropcacheResult};
use propcache_repository::ListingRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Serves "all listings" from the cache, falling back to the record store.
///
/// The snapshot is either absent or the result of exactly one committed
/// store read. It is never patched in place; writes only delete it.
pub struct SnapshotCache {
    cache: Arc<dyn CacheInterface>,
    repository: Arc<dyn ListingRepository>,
    ttl: Duration,
    key: String,
}

impl SnapshotCache {
    /// Creates a snapshot cache with the given lifetime.
    #[must_use]
    pub fn new(
        cache: Arc<dyn CacheInterface>,
        repository: Arc<dyn ListingRepository>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            repository,
            ttl,
            key: cache_keys::all_listings(),
        }
    }

    /// Returns every listing in store order.
    ///
    /// A cache lookup error or timeout reads the store directly and skips the
    /// write-back. A store error is returned as-is and nothing is cached.
    pub async fn get_all_listings(&self) -> PropcacheResult<Vec<Listing>> {
        match self.cache.get_raw(&self.key).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Listing>>(&json) {
                Ok(listings) => {
                    debug!("Snapshot hit ({} listings)", listings.len());
                    CacheTelemetry::snapshot_lookup(SnapshotOutcome::Hit);
                    Ok(listings)
                }
                Err(e) => {
                    warn!("Discarding undecodable snapshot: {}", e);
                    CacheTelemetry::snapshot_lookup(SnapshotOutcome::Corrupt);
                    self.populate().await
                }
            },
            Ok(None) => {
                debug!("Snapshot miss");
                CacheTelemetry::snapshot_lookup(SnapshotOutcome::Miss);
                self.populate().await
            }
            Err(e) => {
                warn!("Cache unavailable, reading listings from store: {}", e);
                CacheTelemetry::snapshot_lookup(SnapshotOutcome::Bypass);
                self.repository.find_all().await
            }
        }
    }

    /// Deletes the snapshot. Returns true if one was present.
    pub async fn invalidate(&self) -> PropcacheResult<bool> {
        self.cache.delete(&self.key).await
    }

    /// Returns the snapshot lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn populate(&self) -> PropcacheResult<Vec<Listing>> {
        let listings = self.repository.find_all().await?;

        match serde_json::to_string(&listings) {
            Ok(json) => {
                if let Err(e) = self.cache.set_raw(&self.key, &json, self.ttl).await {
                    warn!("Failed to store listing snapshot: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode listing snapshot: {}", e),
        }

        Ok(listings)
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
