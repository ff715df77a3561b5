//! Integration tests for RedisCacheService.
//!
//! These tests run against a real Redis server using testcontainers.
//! Requires Docker to be available on the system.

use propcache_config::RedisConfig;
use propcache_core::{ListingDraft, Price};
use propcache_repository::{InMemoryListingRepository, ListingRepository};
use propcache_service::{
    cache_keys, create_redis_pool, CacheInterface, CacheMetricsReport, MetricsReporter,
    RedisCacheService, SnapshotCache, SnapshotInvalidator,
};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};

struct TestRedis {
    _container: ContainerAsync<Redis>,
    cache: Arc<RedisCacheService>,
}

impl TestRedis {
    async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");
        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            url: format!("redis://127.0.0.1:{}/0", port),
            ..RedisConfig::default()
        };
        let pool = create_redis_pool(&config).expect("Failed to create pool");

        Self {
            _container: container,
            cache: Arc::new(RedisCacheService::new(
                Arc::new(pool),
                Duration::from_secs(2),
            )),
        }
    }
}

#[tokio::test]
async fn test_set_get_delete() {
    let redis = TestRedis::new().await;
    let cache = &redis.cache;

    cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();
    assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));

    assert!(cache.delete("k").await.unwrap());
    assert!(!cache.delete("k").await.unwrap());
    assert_eq!(cache.get_raw("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_metrics_read_keyspace_counters() {
    let redis = TestRedis::new().await;
    let cache = redis.cache.clone();
    cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();
    cache.get_raw("k").await.unwrap();
    cache.get_raw("absent").await.unwrap();

    let report = MetricsReporter::new(cache).get_cache_metrics().await;

    let CacheMetricsReport::Available(metrics) = report else {
        panic!("expected metrics, got {:?}", report);
    };
    assert_eq!(metrics.keyspace_hits, 1);
    assert_eq!(metrics.keyspace_misses, 1);
    assert_eq!(metrics.total_requests, 2);
    assert_eq!(metrics.hit_ratio, 0.5);
}

#[tokio::test]
async fn test_snapshot_round_trip_through_redis() {
    let redis = TestRedis::new().await;
    let cache: Arc<dyn CacheInterface> = redis.cache.clone();
    let repo = Arc::new(InMemoryListingRepository::new());
    repo.subscribe(Arc::new(SnapshotInvalidator::new(cache.clone())));
    let snapshot = SnapshotCache::new(cache.clone(), repo.clone(), Duration::from_secs(3600));

    repo.save(&ListingDraft::new("Villa in Ho #1234", "", Price::from_cents(3_000_000), "Ho"))
        .await
        .unwrap();

    let cold = snapshot.get_all_listings().await.unwrap();
    assert!(cache.exists(&cache_keys::all_listings()).await.unwrap());
    let warm = snapshot.get_all_listings().await.unwrap();
    assert_eq!(cold, warm);
    assert_eq!(warm[0].price.to_string(), "30000.00");

    repo.delete_all().await.unwrap();
    assert!(!cache.exists(&cache_keys::all_listings()).await.unwrap());
    assert!(snapshot.get_all_listings().await.unwrap().is_empty());
}
