//! # Propcache Service
//!
//! Cache-aside services for property listings: the snapshot cache, the
//! write-path invalidator, the HTTP response cache, and the cache metrics
//! reporter.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod invalidation;
pub mod listing_service;
pub mod metrics_reporter;
pub mod response_cache;
pub mod seeder;
pub mod snapshot_cache;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use cache::*;
pub use dto::*;
pub use invalidation::SnapshotInvalidator;
pub use listing_service::ListingService;
pub use metrics_reporter::MetricsReporter;
pub use r#impl::ListingServiceImpl;
pub use response_cache::{CachedResponse, ResponseCache};
pub use seeder::{random_draft, ListingSeeder, SeedReport};
pub use snapshot_cache::SnapshotCache;
pub use telemetry::{register_metrics, CacheTelemetry, ResponseOutcome, SnapshotOutcome};
