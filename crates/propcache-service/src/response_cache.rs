//! Short-lived cache of rendered HTTP responses.
//!
//! Sits in front of the snapshot cache. It has no invalidation hook, so a
//! write becomes visible here only once the entry expires.

use crate::cache::{cache_keys, CacheInterface};
use propcache_core::PropcacheResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A stored response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CachedResponse {
    /// Only 200 responses are cacheable.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        self.status == 200
    }
}

/// Response cache over the shared cache backend.
pub struct ResponseCache {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a response cache with the given lifetime.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Returns the entry lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Derives the request key from method and path with query.
    #[must_use]
    pub fn request_key(&self, method: &str, path_and_query: &str) -> String {
        cache_keys::response(method, path_and_query)
    }

    /// Looks up a stored response.
    ///
    /// An entry that fails to decode counts as a miss. Backend errors are
    /// returned so the caller can pass the request through.
    pub async fn serve(&self, key: &str) -> PropcacheResult<Option<CachedResponse>> {
        let Some(json) = self.cache.get_raw(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(response) => {
                debug!("Serving cached response for '{}'", key);
                Ok(Some(response))
            }
            Err(e) => {
                warn!("Ignoring undecodable cached response for '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Stores a response. Non-200 responses are ignored.
    pub async fn store(&self, key: &str, response: &CachedResponse) -> PropcacheResult<()> {
        if !response.is_cacheable() {
            debug!("Not caching status {} for '{}'", response.status, key);
            return Ok(());
        }

        let json = serde_json::to_string(response)?;
        self.cache.set_raw(key, &json, self.ttl).await
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
