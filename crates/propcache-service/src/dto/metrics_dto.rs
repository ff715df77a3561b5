//! Cache metrics DTOs.

use crate::cache::CacheStats;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Hit/miss counters and the derived ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CacheMetrics {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    /// `hits / total`, or 0 when there have been no lookups.
    pub hit_ratio: f64,
}

impl CacheMetrics {
    /// Derives metrics from raw counters.
    #[must_use]
    pub fn from_stats(stats: CacheStats) -> Self {
        let total_requests = stats.hits.saturating_add(stats.misses);
        Self {
            keyspace_hits: stats.hits,
            keyspace_misses: stats.misses,
            total_requests,
            hit_ratio: hit_ratio(stats.hits, total_requests),
        }
    }
}

/// Returns `hits / total`, or 0 when `total` is 0.
#[must_use]
pub fn hit_ratio(hits: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Reported when the metrics backend could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CacheMetricsError {
    pub error: String,
}

/// Either computed metrics or the reason they are unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CacheMetricsReport {
    Available(CacheMetrics),
    Unavailable(CacheMetricsError),
}

impl CacheMetricsReport {
    /// Returns true if the report carries an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
