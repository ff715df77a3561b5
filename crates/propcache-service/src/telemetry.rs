//! Prometheus counters for cache behaviour.
//!
//! These are operational counters scraped from `/metrics`. They are separate
//! from the backend keyspace counters the cache metrics endpoint reports.

use metrics::{counter, describe_counter};

/// Metric names for the caching layer.
pub mod names {
    /// Snapshot lookups, labelled by outcome.
    pub const SNAPSHOT_LOOKUPS_TOTAL: &str = "propcache_snapshot_lookups_total";
    /// Snapshot invalidations, labelled by result.
    pub const SNAPSHOT_INVALIDATIONS_TOTAL: &str = "propcache_snapshot_invalidations_total";
    /// Response cache decisions, labelled by outcome.
    pub const RESPONSE_CACHE_TOTAL: &str = "propcache_response_cache_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        names::SNAPSHOT_LOOKUPS_TOTAL,
        "Listing snapshot lookups by outcome (hit, miss, bypass, corrupt)"
    );
    describe_counter!(
        names::SNAPSHOT_INVALIDATIONS_TOTAL,
        "Listing snapshot invalidations by result (ok, error)"
    );
    describe_counter!(
        names::RESPONSE_CACHE_TOTAL,
        "Response cache decisions by outcome (hit, miss, bypass)"
    );
}

/// How a snapshot lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Served from the cache.
    Hit,
    /// Read from the store and written back.
    Miss,
    /// Cache unreachable; read from the store without write-back.
    Bypass,
    /// Cached value could not be decoded; treated as a miss.
    Corrupt,
}

impl SnapshotOutcome {
    /// Returns the label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Bypass => "bypass",
            Self::Corrupt => "corrupt",
        }
    }
}

/// How the response cache handled a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Hit,
    Miss,
    Bypass,
}

impl ResponseOutcome {
    /// Returns the label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Bypass => "bypass",
        }
    }
}

/// Cache metrics recorder.
#[derive(Clone)]
pub struct CacheTelemetry;

impl CacheTelemetry {
    /// Record a snapshot lookup.
    pub fn snapshot_lookup(outcome: SnapshotOutcome) {
        counter!(names::SNAPSHOT_LOOKUPS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }

    /// Record a snapshot invalidation attempt.
    pub fn snapshot_invalidated(succeeded: bool) {
        let result = if succeeded { "ok" } else { "error" };
        counter!(names::SNAPSHOT_INVALIDATIONS_TOTAL, "result" => result).increment(1);
    }

    /// Record a response cache decision.
    pub fn response_cache(outcome: ResponseOutcome) {
        counter!(names::RESPONSE_CACHE_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }
}
