//! Listing service implementation.

use crate::dto::{ListingListResponse, ListingRequest, ListingResponse};
use crate::listing_service::ListingService;
use crate::snapshot_cache::SnapshotCache;
use async_trait::async_trait;
use propcache_core::{ListingId, PropcacheError, PropcacheResult, ValidateExt};
use propcache_repository::ListingRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Listing service backed by the record store and the snapshot cache.
///
/// Writes go straight to the store; snapshot invalidation happens in the
/// store's observer, not here.
pub struct ListingServiceImpl {
    repository: Arc<dyn ListingRepository>,
    snapshot: Arc<SnapshotCache>,
}

impl ListingServiceImpl {
    /// Creates a new listing service.
    #[must_use]
    pub fn new(repository: Arc<dyn ListingRepository>, snapshot: Arc<SnapshotCache>) -> Self {
        Self {
            repository,
            snapshot,
        }
    }
}

#[async_trait]
impl ListingService for ListingServiceImpl {
    async fn list_listings(&self) -> PropcacheResult<ListingListResponse> {
        debug!("Listing all properties");

        let listings = self.snapshot.get_all_listings().await?;
        Ok(ListingListResponse::from(listings))
    }

    async fn get_listing(&self, id: ListingId) -> PropcacheResult<ListingResponse> {
        debug!("Getting listing: {}", id);

        let listing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PropcacheError::not_found("Listing", id))?;

        Ok(ListingResponse::from(listing))
    }

    async fn create_listing(&self, request: ListingRequest) -> PropcacheResult<ListingResponse> {
        debug!("Creating listing: {}", request.title);

        request.validate_request()?;
        let draft = request.into_draft()?;

        let listing = self.repository.save(&draft).await?;

        info!("Listing created: {}", listing.id);
        Ok(ListingResponse::from(listing))
    }

    async fn update_listing(
        &self,
        id: ListingId,
        request: ListingRequest,
    ) -> PropcacheResult<ListingResponse> {
        debug!("Updating listing: {}", id);

        request.validate_request()?;
        let draft = request.into_draft()?;

        let mut listing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PropcacheError::not_found("Listing", id))?;
        listing.apply(draft);

        let updated = self.repository.update(&listing).await?;

        info!("Listing updated: {}", id);
        Ok(ListingResponse::from(updated))
    }

    async fn delete_listing(&self, id: ListingId) -> PropcacheResult<()> {
        debug!("Deleting listing: {}", id);

        if !self.repository.delete(id).await? {
            return Err(PropcacheError::not_found("Listing", id));
        }

        info!("Listing deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ListingServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingServiceImpl").finish_non_exhaustive()
    }
}
