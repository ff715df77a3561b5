//! Router tests over the in-memory record store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use propcache_config::ServerConfig;
use propcache_core::{PropcacheError, PropcacheResult};
use propcache_repository::{InMemoryListingRepository, ListingRepository};
use propcache_rest::{create_router, AppState};
use propcache_service::{
    CacheInterface, CacheStats, InMemoryCacheService, ListingServiceImpl, MetricsReporter,
    ResponseCache, SnapshotCache, SnapshotInvalidator,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct DownCache;

#[async_trait]
impl CacheInterface for DownCache {
    async fn get_raw(&self, _key: &str) -> PropcacheResult<Option<String>> {
        Err(PropcacheError::cache("Connection refused"))
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> PropcacheResult<()> {
        Err(PropcacheError::cache("Connection refused"))
    }

    async fn delete(&self, _key: &str) -> PropcacheResult<bool> {
        Err(PropcacheError::cache("Connection refused"))
    }

    async fn exists(&self, _key: &str) -> PropcacheResult<bool> {
        Err(PropcacheError::cache("Connection refused"))
    }

    async fn stats(&self) -> PropcacheResult<CacheStats> {
        Err(PropcacheError::cache("Connection refused"))
    }

    fn backend(&self) -> &'static str {
        "down"
    }
}

struct TestApp {
    router: Router,
    repo: Arc<InMemoryListingRepository>,
}

impl TestApp {
    fn with_cache(cache: Arc<dyn CacheInterface>) -> Self {
        let repo = Arc::new(InMemoryListingRepository::new());
        repo.subscribe(Arc::new(SnapshotInvalidator::new(cache.clone())));

        let snapshot = Arc::new(SnapshotCache::new(
            cache.clone(),
            repo.clone(),
            Duration::from_secs(3600),
        ));
        let state = AppState::new(
            Arc::new(ListingServiceImpl::new(repo.clone(), snapshot)),
            Arc::new(MetricsReporter::new(cache.clone())),
            Arc::new(ResponseCache::new(cache.clone(), Duration::from_secs(900))),
            cache,
        );

        Self {
            router: create_router(state, &ServerConfig::default()),
            repo,
        }
    }

    fn new() -> Self {
        Self::with_cache(Arc::new(InMemoryCacheService::new()))
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, header::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, header::HeaderMap, Value) {
        self.send(Method::GET, uri, None).await
    }
}

fn listing_body(title: &str, price: &str) -> Value {
    json!({
        "title": title,
        "description": "Close to shops and public transport.",
        "price": price,
        "location": "Accra",
    })
}

#[tokio::test]
async fn test_empty_store_lists_no_properties() {
    let app = TestApp::new();

    let (status, headers, body) = app.get("/properties").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "properties": [] }));
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=900");
}

#[tokio::test]
async fn test_create_then_fetch_listing() {
    let app = TestApp::new();

    let (status, _, created) = app
        .send(Method::POST, "/properties", Some(listing_body("Cozy Loft", "30000")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], "30000.00");

    let id = created["id"].as_u64().unwrap();
    let (status, _, fetched) = app.get(&format!("/properties/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_response_cache_serves_stale_list_until_expiry() {
    let app = TestApp::new();
    app.get("/properties").await;

    app.send(Method::POST, "/properties", Some(listing_body("Villa", "1.00")))
        .await;

    let (_, headers, cached) = app.get("/properties").await;
    assert_eq!(cached, json!({ "properties": [] }));
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=900");

    // A different query string is a different request identity.
    let (_, _, fresh) = app.get("/properties?fresh=1").await;
    assert_eq!(fresh["properties"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_visible_through_uncached_request() {
    let app = TestApp::new();
    let (_, _, created) = app
        .send(Method::POST, "/properties", Some(listing_body("Studio", "30000.00")))
        .await;
    let id = created["id"].as_u64().unwrap();

    let (status, _, updated) = app
        .send(
            Method::PUT,
            &format!("/properties/{}", id),
            Some(listing_body("Studio", "31000.00")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (_, _, listed) = app.get("/properties?after=update").await;
    assert_eq!(listed["properties"][0]["price"], "31000.00");
}

#[tokio::test]
async fn test_delete_listing() {
    let app = TestApp::new();
    let (_, _, created) = app
        .send(Method::POST, "/properties", Some(listing_body("Condo", "5.00")))
        .await;
    let uri = format!("/properties/{}", created["id"]);

    let (status, _, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(app.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_body_is_rejected_with_field_errors() {
    let app = TestApp::new();

    let (status, _, body) = app
        .send(Method::POST, "/properties", Some(listing_body("Loft", "-3")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "price");
    assert_eq!(app.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new();

    let (status, _, body) = app.get("/properties/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cache_metrics_after_traffic() {
    let app = TestApp::new();
    app.get("/properties").await;
    app.get("/properties").await;

    let (status, _, body) = app.get("/properties/cache-metrics").await;

    assert_eq!(status, StatusCode::OK);
    let hits = body["keyspace_hits"].as_u64().unwrap();
    let misses = body["keyspace_misses"].as_u64().unwrap();
    assert_eq!(body["total_requests"].as_u64().unwrap(), hits + misses);
    assert!(hits >= 1);
    assert!(body["hit_ratio"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_unreachable_cache_still_serves_listings() {
    let app = TestApp::with_cache(Arc::new(DownCache));

    let (status, _, created) = app
        .send(Method::POST, "/properties", Some(listing_body("Bungalow", "30000.00")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, headers, listed) = app.get("/properties").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["properties"][0]["id"], created["id"]);
    assert_eq!(listed["properties"][0]["price"], "30000.00");
    assert_eq!(headers[header::CACHE_CONTROL], "max-age=900");

    let (status, _, metrics) = app.get("/properties/cache-metrics").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(metrics["error"].as_str().unwrap().contains("Connection refused"));
    assert!(metrics.get("hit_ratio").is_none());
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let (status, _, health) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, _, ready) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["database"], "in_memory");
    assert_eq!(ready["cache"], "up");

    let (status, _, _) = app.get("/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();

    let (status, _, doc) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/properties/cache-metrics"].is_object());
}
