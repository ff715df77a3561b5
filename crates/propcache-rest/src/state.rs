//! Application state for Axum handlers.

use propcache_repository::DatabasePoolInterface;
use propcache_service::{CacheInterface, ListingService, MetricsReporter, ResponseCache};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<dyn ListingService>,
    pub metrics_reporter: Arc<MetricsReporter>,
    pub response_cache: Arc<ResponseCache>,
    pub cache: Arc<dyn CacheInterface>,
    /// Absent when the in-memory record store is in use.
    pub database: Option<Arc<dyn DatabasePoolInterface>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        listing_service: Arc<dyn ListingService>,
        metrics_reporter: Arc<MetricsReporter>,
        response_cache: Arc<ResponseCache>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            listing_service,
            metrics_reporter,
            response_cache,
            cache,
            database: None,
        }
    }

    /// Attaches the database pool used by the readiness probe.
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabasePoolInterface>) -> Self {
        self.database = Some(database);
        self
    }
}
