//! Listing service trait definition.

use crate::dto::{ListingListResponse, ListingRequest, ListingResponse};
use async_trait::async_trait;
use propcache_core::{Interface, ListingId, PropcacheResult};

/// Listing service trait.
#[async_trait]
pub trait ListingService: Interface + Send + Sync {
    /// Lists every listing, served through the snapshot cache.
    async fn list_listings(&self) -> PropcacheResult<ListingListResponse>;

    /// Gets a listing by ID from the record store.
    async fn get_listing(&self, id: ListingId) -> PropcacheResult<ListingResponse>;

    /// Creates a new listing.
    async fn create_listing(&self, request: ListingRequest) -> PropcacheResult<ListingResponse>;

    /// Replaces the editable fields of a listing.
    async fn update_listing(
        &self,
        id: ListingId,
        request: ListingRequest,
    ) -> PropcacheResult<ListingResponse>;

    /// Deletes a listing.
    async fn delete_listing(&self, id: ListingId) -> PropcacheResult<()>;
}
