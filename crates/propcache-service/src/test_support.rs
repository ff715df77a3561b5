//! Shared fakes for service tests.

use crate::cache::{CacheInterface, CacheStats};
use async_trait::async_trait;
use propcache_core::{
    Listing, ListingDraft, ListingId, Price, PropcacheError, PropcacheResult,
};
use propcache_repository::{InMemoryListingRepository, ListingObserver, ListingRepository};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cache backend whose every call fails, like an unreachable Redis.
#[derive(Default)]
pub struct FailingCache {
    pub calls: AtomicUsize,
}

impl FailingCache {
    fn fail<T>(&self) -> PropcacheResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PropcacheError::cache("Connection refused"))
    }
}

#[async_trait]
impl CacheInterface for FailingCache {
    async fn get_raw(&self, _key: &str) -> PropcacheResult<Option<String>> {
        self.fail()
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> PropcacheResult<()> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> PropcacheResult<bool> {
        self.fail()
    }

    async fn exists(&self, _key: &str) -> PropcacheResult<bool> {
        self.fail()
    }

    async fn stats(&self) -> PropcacheResult<CacheStats> {
        self.fail()
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Cache backend that reports fixed counters.
pub struct FixedStatsCache(pub CacheStats);

#[async_trait]
impl CacheInterface for FixedStatsCache {
    async fn get_raw(&self, _key: &str) -> PropcacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> PropcacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> PropcacheResult<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> PropcacheResult<bool> {
        Ok(false)
    }

    async fn stats(&self) -> PropcacheResult<CacheStats> {
        Ok(self.0)
    }

    fn backend(&self) -> &'static str {
        "fixed"
    }
}

/// In-memory store that counts full scans and can be told to fail them.
#[derive(Default)]
pub struct CountingRepository {
    inner: InMemoryListingRepository,
    pub find_all_calls: AtomicUsize,
    pub fail_reads: AtomicBool,
}

impl CountingRepository {
    pub fn scans(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingRepository for CountingRepository {
    async fn find_all(&self) -> PropcacheResult<Vec<Listing>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PropcacheError::Database("Lost connection to MySQL".to_string()));
        }
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: ListingId) -> PropcacheResult<Option<Listing>> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, draft: &ListingDraft) -> PropcacheResult<Listing> {
        self.inner.save(draft).await
    }

    async fn update(&self, listing: &Listing) -> PropcacheResult<Listing> {
        self.inner.update(listing).await
    }

    async fn delete(&self, id: ListingId) -> PropcacheResult<bool> {
        self.inner.delete(id).await
    }

    async fn delete_all(&self) -> PropcacheResult<u64> {
        self.inner.delete_all().await
    }

    async fn count(&self) -> PropcacheResult<u64> {
        self.inner.count().await
    }

    fn subscribe(&self, observer: Arc<dyn ListingObserver>) {
        self.inner.subscribe(observer);
    }
}

pub fn draft(title: &str, price: &str) -> ListingDraft {
    ListingDraft::new(title, "Nice", price.parse::<Price>().unwrap(), "Accra")
}
