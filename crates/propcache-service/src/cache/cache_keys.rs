//! Cache key generators for consistent key naming.

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "propcache:cache";

/// Key holding the full listing snapshot.
#[must_use]
pub fn all_listings() -> String {
    format!("{}:listings:all", CACHE_PREFIX)
}

/// Key for a cached HTTP response, derived from method, path and query.
#[must_use]
pub fn response(method: &str, path_and_query: &str) -> String {
    format!(
        "{}:response:{}:{}",
        CACHE_PREFIX,
        method.to_uppercase(),
        path_and_query
    )
}
