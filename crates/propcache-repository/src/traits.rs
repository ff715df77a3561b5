//! Repository trait definitions.

use async_trait::async_trait;
use propcache_core::{Interface, Listing, ListingChange, ListingDraft, ListingId, PropcacheResult};
use std::sync::Arc;

/// Receives record store change notifications.
///
/// Observers run after the change is committed and before the writing call
/// returns. They cannot fail the write.
#[async_trait]
pub trait ListingObserver: Send + Sync {
    /// Called once per committed change.
    async fn on_change(&self, change: &ListingChange);
}

/// Listing record store.
///
/// Every successful mutation emits exactly one [`ListingChange`] to the
/// subscribed observers.
#[async_trait]
pub trait ListingRepository: Interface + Send + Sync {
    /// Returns every listing, ordered by ID.
    async fn find_all(&self) -> PropcacheResult<Vec<Listing>>;

    /// Finds a listing by ID.
    async fn find_by_id(&self, id: ListingId) -> PropcacheResult<Option<Listing>>;

    /// Inserts a new listing. The store assigns `id` and `created_at`.
    async fn save(&self, draft: &ListingDraft) -> PropcacheResult<Listing>;

    /// Replaces the editable fields of an existing listing.
    ///
    /// Returns `NotFound` when the listing does not exist.
    async fn update(&self, listing: &Listing) -> PropcacheResult<Listing>;

    /// Deletes a listing by ID. Returns false if nothing was removed.
    async fn delete(&self, id: ListingId) -> PropcacheResult<bool>;

    /// Deletes every listing and returns how many were removed.
    async fn delete_all(&self) -> PropcacheResult<u64>;

    /// Counts all listings.
    async fn count(&self) -> PropcacheResult<u64>;

    /// Registers an observer for subsequent changes.
    fn subscribe(&self, observer: Arc<dyn ListingObserver>);
}
