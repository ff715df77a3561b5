//! Cache metrics controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use propcache_service::CacheMetricsReport;

/// Creates the cache metrics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/properties/cache-metrics", get(cache_metrics))
}

/// Report cache hit/miss counters and the hit ratio.
#[utoipa::path(
    get,
    path = "/properties/cache-metrics",
    tag = "properties",
    responses(
        (status = 200, description = "Cache counters", body = propcache_service::CacheMetrics),
        (status = 503, description = "Cache backend unreachable", body = propcache_service::CacheMetricsError)
    )
)]
pub async fn cache_metrics(State(state): State<AppState>) -> Response {
    let report = state.metrics_reporter.get_cache_metrics().await;

    let status = match report {
        CacheMetricsReport::Available(_) => StatusCode::OK,
        CacheMetricsReport::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(report)).into_response()
}
