//! API response types.

use propcache_core::{ErrorResponse, PropcacheError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always false.
    pub success: bool,
    pub error: ErrorResponse,
}

impl ErrorBody {
    /// Wraps an error response.
    pub fn new(error: ErrorResponse) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub PropcacheError);

impl From<PropcacheError> for AppError {
    fn from(err: PropcacheError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ErrorBody::new(error_response));

        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
///
/// Payloads are returned bare; only errors use the envelope.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
