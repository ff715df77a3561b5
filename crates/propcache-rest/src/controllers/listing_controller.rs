//! Listing controller.

use crate::{
    extractors::ValidatedJson,
    middleware::response_cache_layer,
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use propcache_core::{ListingId, PropcacheError};
use propcache_service::{ListingListResponse, ListingRequest, ListingResponse};
use tracing::debug;

/// Creates the listing router.
///
/// Only the collection GET goes through the response cache.
pub fn router(state: &AppState) -> Router<AppState> {
    let cached_list = get(list_listings).layer(middleware::from_fn_with_state(
        state.response_cache.clone(),
        response_cache_layer,
    ));

    Router::new()
        .route("/properties", cached_list.post(create_listing))
        .route(
            "/properties/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

/// List every property.
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    responses(
        (status = 200, description = "All listings in store order", body = ListingListResponse),
        (status = 500, description = "Record store unavailable", body = crate::responses::ErrorBody)
    )
)]
pub async fn list_listings(State(state): State<AppState>) -> ApiResult<ListingListResponse> {
    debug!("List listings request");

    let response = state.listing_service.list_listings().await?;
    ok(response)
}

/// Create a property.
#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    request_body = ListingRequest,
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Invalid request", body = crate::responses::ErrorBody)
    )
)]
pub async fn create_listing(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), AppError> {
    debug!("Create listing request: {}", request.title);

    let response = state.listing_service.create_listing(request).await?;
    Ok(created(response))
}

/// Get a property by ID.
#[utoipa::path(
    get,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = u64, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing found", body = ListingResponse),
        (status = 404, description = "Listing not found", body = crate::responses::ErrorBody)
    )
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ListingResponse> {
    debug!("Get listing request: {}", id);

    let listing_id = parse_listing_id(&id)?;
    let response = state.listing_service.get_listing(listing_id).await?;
    ok(response)
}

/// Replace a property's editable fields.
#[utoipa::path(
    put,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = u64, Path, description = "Listing ID")),
    request_body = ListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = ListingResponse),
        (status = 400, description = "Invalid request", body = crate::responses::ErrorBody),
        (status = 404, description = "Listing not found", body = crate::responses::ErrorBody)
    )
)]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ListingRequest>,
) -> ApiResult<ListingResponse> {
    debug!("Update listing request: {}", id);

    let listing_id = parse_listing_id(&id)?;
    let response = state.listing_service.update_listing(listing_id, request).await?;
    ok(response)
}

/// Delete a property.
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    tag = "properties",
    params(("id" = u64, Path, description = "Listing ID")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 404, description = "Listing not found", body = crate::responses::ErrorBody)
    )
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete listing request: {}", id);

    let listing_id = parse_listing_id(&id)?;
    state.listing_service.delete_listing(listing_id).await?;
    Ok(no_content())
}

fn parse_listing_id(id: &str) -> Result<ListingId, AppError> {
    id.parse::<ListingId>()
        .ok()
        .filter(|id| id.into_inner() > 0)
        .ok_or_else(|| AppError(PropcacheError::validation(format!("Invalid listing ID: {}", id))))
}
