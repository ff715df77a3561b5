//! Redis-based cache implementation.

use super::{CacheInterface, CacheStats};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use propcache_config::RedisConfig;
use propcache_core::{with_timeout, PropcacheError, PropcacheResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Builds a Redis connection pool from configuration.
///
/// Connections are opened lazily, so this succeeds even when Redis is down.
pub fn create_redis_pool(config: &RedisConfig) -> PropcacheResult<Pool> {
    info!("Creating Redis connection pool (size {})", config.pool_size);

    let mut pool_config = Config::from_url(&config.url);
    pool_config.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size));

    pool_config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| PropcacheError::Configuration(format!("Invalid Redis configuration: {}", e)))
}

/// Extracts `keyspace_hits` and `keyspace_misses` from an `INFO stats` reply.
///
/// Missing fields count as zero; a malformed number is an error.
pub fn parse_keyspace_stats(info: &str) -> PropcacheResult<CacheStats> {
    let mut stats = CacheStats::default();

    for line in info.lines() {
        let Some((field, value)) = line.trim().split_once(':') else {
            continue;
        };
        let slot = match field {
            "keyspace_hits" => &mut stats.hits,
            "keyspace_misses" => &mut stats.misses,
            _ => continue,
        };
        *slot = value
            .trim()
            .parse()
            .map_err(|_| PropcacheError::cache(format!("Malformed {} value '{}'", field, value)))?;
    }

    Ok(stats)
}

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Arc<Pool>,
    /// Upper bound for every Redis round-trip, including connection checkout.
    op_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> PropcacheResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| PropcacheError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get_raw(&self, key: &str) -> PropcacheResult<Option<String>> {
        let value: Option<String> = with_timeout(self.op_timeout, "redis GET", async {
            let mut conn = self.get_conn().await?;
            conn.get(key)
                .await
                .map_err(|e| PropcacheError::Cache(format!("Failed to get key '{}': {}", key, e)))
        })
        .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PropcacheResult<()> {
        let ttl_secs = ttl.as_secs().max(1);

        with_timeout(self.op_timeout, "redis SETEX", async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| PropcacheError::Cache(format!("Failed to set key '{}': {}", key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> PropcacheResult<bool> {
        let deleted: i64 = with_timeout(self.op_timeout, "redis DEL", async {
            let mut conn = self.get_conn().await?;
            conn.del(key)
                .await
                .map_err(|e| PropcacheError::Cache(format!("Failed to delete key '{}': {}", key, e)))
        })
        .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> PropcacheResult<bool> {
        with_timeout(self.op_timeout, "redis EXISTS", async {
            let mut conn = self.get_conn().await?;
            conn.exists(key)
                .await
                .map_err(|e| PropcacheError::Cache(format!("Failed to check key '{}': {}", key, e)))
        })
        .await
    }

    async fn stats(&self) -> PropcacheResult<CacheStats> {
        let info: String = with_timeout(self.op_timeout, "redis INFO", async {
            let mut conn = self.get_conn().await?;
            deadpool_redis::redis::cmd("INFO")
                .arg("stats")
                .query_async(&mut conn)
                .await
                .map_err(|e| PropcacheError::Cache(format!("Failed to read INFO stats: {}", e)))
        })
        .await?;

        parse_keyspace_stats(&info)
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}
