//! Record store observer that drops the listing snapshot on every write.

use crate::cache::{cache_keys, CacheInterface};
use crate::telemetry::CacheTelemetry;
use async_trait::async_trait;
use propcache_core::ListingChange;
use propcache_repository::ListingObserver;
use std::sync::Arc;
use tracing::{debug, warn};

/// Deletes the snapshot key whenever a listing changes.
///
/// The store owns its observers, so this must not hold the store (or a
/// [`SnapshotCache`](crate::SnapshotCache), which does).
pub struct SnapshotInvalidator {
    cache: Arc<dyn CacheInterface>,
    key: String,
}

impl SnapshotInvalidator {
    /// Creates an invalidator for the listing snapshot.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            cache,
            key: cache_keys::all_listings(),
        }
    }
}

#[async_trait]
impl ListingObserver for SnapshotInvalidator {
    async fn on_change(&self, change: &ListingChange) {
        match self.cache.delete(&self.key).await {
            Ok(existed) => {
                debug!(change = %change, existed, "Invalidated listing snapshot");
                CacheTelemetry::snapshot_invalidated(true);
            }
            Err(e) => {
                // The committed write stands; the snapshot TTL bounds staleness.
                warn!(change = %change, "Failed to invalidate listing snapshot: {}", e);
                CacheTelemetry::snapshot_invalidated(false);
            }
        }
    }
}

impl std::fmt::Debug for SnapshotInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotInvalidator")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
