//! Response cache middleware for the listing collection route.
//!
//! Serves stored 200 responses to GET requests and stores fresh ones. Cache
//! backend errors degrade to pass-through.

use axum::{
    body::Body,
    extract::State,
    http::{header::CACHE_CONTROL, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use propcache_service::{CacheTelemetry, CachedResponse, ResponseCache, ResponseOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Largest body that is stored in the cache. Bigger bodies are served uncached.
const MAX_CACHED_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Middleware that caches successful GET responses.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn response_cache_layer(
    State(cache): State<Arc<ResponseCache>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let path_and_query = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path(), |pq| pq.as_str())
        .to_string();
    let key = cache.request_key(request.method().as_str(), &path_and_query);

    match cache.serve(&key).await {
        Ok(Some(cached)) => {
            debug!(outcome = "hit", "Serving cached response");
            CacheTelemetry::response_cache(ResponseOutcome::Hit);
            return build_response(cached);
        }
        Ok(None) => {
            debug!(outcome = "miss", "Cache miss, executing handler");
            CacheTelemetry::response_cache(ResponseOutcome::Miss);
        }
        Err(e) => {
            warn!("Response cache unavailable, passing through: {}", e);
            CacheTelemetry::response_cache(ResponseOutcome::Bypass);
            let mut response = next.run(request).await;
            if response.status() == StatusCode::OK {
                set_max_age(response.headers_mut(), cache.ttl());
            }
            return response;
        }
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            warn!("Failed to buffer response body: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    set_max_age(&mut parts.headers, cache.ttl());

    if bytes.len() > MAX_CACHED_BODY_BYTES {
        debug!(size = bytes.len(), "Not caching oversized body");
        return Response::from_parts(parts, Body::from(bytes));
    }

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let cached = CachedResponse {
                status: parts.status.as_u16(),
                headers: parts
                    .headers
                    .iter()
                    .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
                    .collect(),
                body: text.to_string(),
            };
            if let Err(e) = cache.store(&key, &cached).await {
                warn!("Failed to store response: {}", e);
            }
        }
        Err(_) => debug!("Not caching non-UTF-8 body"),
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn set_max_age(headers: &mut HeaderMap, ttl: Duration) {
    if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", ttl.as_secs())) {
        headers.insert(CACHE_CONTROL, value);
    }
}

/// Build a response from cached data.
fn build_response(cached: CachedResponse) -> Response {
    let mut builder = Response::builder().status(cached.status);

    for (name, value) in cached.headers {
        if let Ok(header_value) = HeaderValue::from_str(&value) {
            builder = builder.header(name, header_value);
        }
    }

    builder
        .body(Body::from(cached.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
