//! OpenAPI documentation configuration.

use crate::controllers::{HealthResponse, ReadinessResponse};
use crate::responses::ErrorBody;
use propcache_core::{ErrorResponse, FieldError, ListingId};
use propcache_service::{
    CacheMetrics, CacheMetricsError, ListingListResponse, ListingRequest, ListingResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Propcache API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Propcache API",
        version = "1.0.0",
        description = "Property listings served through a cache-aside layer"
    ),
    paths(
        crate::controllers::listing_controller::list_listings,
        crate::controllers::listing_controller::create_listing,
        crate::controllers::listing_controller::get_listing,
        crate::controllers::listing_controller::update_listing,
        crate::controllers::listing_controller::delete_listing,
        crate::controllers::metrics_controller::cache_metrics,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ListingId,
            ErrorResponse,
            FieldError,
            ErrorBody,
            ListingRequest,
            ListingResponse,
            ListingListResponse,
            CacheMetrics,
            CacheMetricsError,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "properties", description = "Property listing endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/properties",
            "/properties/{id}",
            "/properties/cache-metrics",
            "/health",
            "/ready",
            "/live",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }
}
