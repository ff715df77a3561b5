//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`.
    pub status: String,
    /// `up`, `down`, or `in_memory`.
    pub database: String,
    /// `up` or `down`. A down cache does not make the service unready.
    pub cache: String,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Record store is unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = match &state.database {
        Some(pool) => match pool.health_check().await {
            Ok(()) => Some(true),
            Err(e) => {
                warn!("Readiness: database check failed: {}", e);
                Some(false)
            }
        },
        None => None,
    };

    // INFO does not touch the keyspace counters, unlike a key probe.
    let cache_up = match state.cache.stats().await {
        Ok(_) => true,
        Err(e) => {
            warn!("Readiness: cache check failed: {}", e);
            false
        }
    };

    let ready = database_up != Some(false);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        database: match database_up {
            Some(true) => "up",
            Some(false) => "down",
            None => "in_memory",
        }
        .to_string(),
        cache: if cache_up { "up" } else { "down" }.to_string(),
    };

    (status, Json(body))
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
