//! On-demand cache effectiveness report.

use crate::cache::CacheInterface;
use crate::dto::{CacheMetrics, CacheMetricsError, CacheMetricsReport};
use std::sync::Arc;
use tracing::{error, info};

/// Reads the backend's keyspace counters and derives the hit ratio.
///
/// Never retries and never fails: backend errors become
/// [`CacheMetricsReport::Unavailable`].
pub struct MetricsReporter {
    cache: Arc<dyn CacheInterface>,
}

impl MetricsReporter {
    /// Creates a reporter over the given backend.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }

    /// Computes a fresh report.
    pub async fn get_cache_metrics(&self) -> CacheMetricsReport {
        match self.cache.stats().await {
            Ok(stats) => {
                let metrics = CacheMetrics::from_stats(stats);
                info!(
                    backend = self.cache.backend(),
                    hits = metrics.keyspace_hits,
                    misses = metrics.keyspace_misses,
                    hit_ratio = metrics.hit_ratio,
                    "Cache metrics computed"
                );
                CacheMetricsReport::Available(metrics)
            }
            Err(e) => {
                error!(backend = self.cache.backend(), "Failed to read cache metrics: {}", e);
                CacheMetricsReport::Unavailable(CacheMetricsError {
                    error: e.to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for MetricsReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsReporter")
            .field("backend", &self.cache.backend())
            .finish()
    }
}
