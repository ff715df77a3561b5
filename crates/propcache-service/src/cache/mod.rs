//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation and an in-process
//! fallback used when Redis is disabled.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface, CacheStats};
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{create_redis_pool, parse_keyspace_stats, RedisCacheService};
