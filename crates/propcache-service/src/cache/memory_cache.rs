//! In-process cache used when Redis is disabled.

use super::{CacheInterface, CacheStats};
use async_trait::async_trait;
use parking_lot::RwLock;
use propcache_core::PropcacheResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Single-process TTL cache with Redis-style keyspace counters.
///
/// Every `get_raw` counts as either a hit or a miss, mirroring
/// `keyspace_hits`/`keyspace_misses`.
#[derive(Default)]
pub struct InMemoryCacheService {
    entries: RwLock<HashMap<String, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get_raw(&self, key: &str) -> PropcacheResult<Option<String>> {
        let now = Instant::now();
        let value = self
            .entries
            .read()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone());

        match &value {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key '{}'", key);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for key '{}'", key);
            }
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> PropcacheResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        entries.retain(|_, e| e.is_live(now));
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> PropcacheResult<bool> {
        let now = Instant::now();
        let removed = self.entries.write().remove(key);
        Ok(removed.is_some_and(|e| e.is_live(now)))
    }

    async fn exists(&self, key: &str) -> PropcacheResult<bool> {
        let now = Instant::now();
        Ok(self.entries.read().get(key).is_some_and(|e| e.is_live(now)))
    }

    async fn stats(&self) -> PropcacheResult<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.read().len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCacheService::new();
        cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
        assert!(cache.exists("k").await.unwrap());
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookups_feed_counters() {
        let cache = InMemoryCacheService::new();
        cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();

        cache.get_raw("k").await.unwrap();
        cache.get_raw("k").await.unwrap();
        cache.get_raw("missing").await.unwrap();

        assert_eq!(
            cache.stats().await.unwrap(),
            CacheStats { hits: 2, misses: 1 }
        );
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = InMemoryCacheService::new();
        cache.set_raw("k", "v", Duration::from_millis(20)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(!cache.exists("k").await.unwrap());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().await.unwrap().misses, 1);
    }
}
