//! In-process listing store.
//!
//! Used when `database.enabled` is false and throughout the service tests.
//! Shares the observer contract with the MySQL store.

use crate::{ChangeNotifier, ListingObserver, ListingRepository};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use propcache_core::{Listing, ListingChange, ListingDraft, ListingId, PropcacheError, PropcacheResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Listing store backed by an ordered map.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    state: RwLock<State>,
    notifier: ChangeNotifier,
}

#[derive(Debug, Default)]
struct State {
    listings: BTreeMap<ListingId, Listing>,
    last_id: u64,
}

impl InMemoryListingRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn find_all(&self) -> PropcacheResult<Vec<Listing>> {
        Ok(self.state.read().listings.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ListingId) -> PropcacheResult<Option<Listing>> {
        Ok(self.state.read().listings.get(&id).cloned())
    }

    async fn save(&self, draft: &ListingDraft) -> PropcacheResult<Listing> {
        let listing = {
            let mut state = self.state.write();
            state.last_id += 1;
            let id = ListingId::new(state.last_id);
            let listing = draft.clone().into_listing(id, Utc::now());
            state.listings.insert(id, listing.clone());
            listing
        };

        debug!("Saved listing {} in memory", listing.id);
        self.notifier.notify(ListingChange::Created(listing.id)).await;
        Ok(listing)
    }

    async fn update(&self, listing: &Listing) -> PropcacheResult<Listing> {
        let updated = {
            let mut state = self.state.write();
            let stored = state
                .listings
                .get_mut(&listing.id)
                .ok_or_else(|| PropcacheError::not_found("Listing", listing.id))?;
            stored.apply(ListingDraft::new(
                listing.title.clone(),
                listing.description.clone(),
                listing.price,
                listing.location.clone(),
            ));
            stored.clone()
        };

        self.notifier.notify(ListingChange::Updated(updated.id)).await;
        Ok(updated)
    }

    async fn delete(&self, id: ListingId) -> PropcacheResult<bool> {
        let removed = self.state.write().listings.remove(&id).is_some();
        if removed {
            self.notifier.notify(ListingChange::Deleted(id)).await;
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> PropcacheResult<u64> {
        let removed = {
            let mut state = self.state.write();
            let removed = state.listings.len() as u64;
            state.listings.clear();
            removed
        };

        self.notifier.notify(ListingChange::Cleared { removed }).await;
        Ok(removed)
    }

    async fn count(&self) -> PropcacheResult<u64> {
        Ok(self.state.read().listings.len() as u64)
    }

    fn subscribe(&self, observer: Arc<dyn ListingObserver>) {
        self.notifier.subscribe(observer);
    }
}
