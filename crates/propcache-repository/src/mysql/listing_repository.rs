//! MySQL listing repository implementation.

use crate::{ChangeNotifier, DatabasePoolInterface, ListingObserver, ListingRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use propcache_core::{
    Listing, ListingChange, ListingDraft, ListingId, Price, PropcacheError, PropcacheResult,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, price_cents, location, created_at FROM listings";

/// MySQL listing repository implementation.
pub struct MySqlListingRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    notifier: ChangeNotifier,
}

impl MySqlListingRepository {
    /// Creates a new MySQL listing repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            notifier: ChangeNotifier::new(),
        }
    }
}

/// Database row representation of a listing.
#[derive(Debug, FromRow)]
struct ListingRow {
    id: u64,
    title: String,
    description: String,
    price_cents: u64,
    location: String,
    created_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Listing {
            id: ListingId::new(row.id),
            title: row.title,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            location: row.location,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn find_all(&self) -> PropcacheResult<Vec<Listing>> {
        debug!("Reading all listings");

        let rows = sqlx::query_as::<_, ListingRow>(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn find_by_id(&self, id: ListingId) -> PropcacheResult<Option<Listing>> {
        debug!("Finding listing by id: {}", id);

        let row = sqlx::query_as::<_, ListingRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Listing::from))
    }

    async fn save(&self, draft: &ListingDraft) -> PropcacheResult<Listing> {
        debug!("Saving new listing: {}", draft.title);

        // MySQL doesn't support RETURNING, so insert then select
        let result = sqlx::query(
            r#"
            INSERT INTO listings (title, description, price_cents, location)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.price.cents())
        .bind(&draft.location)
        .execute(self.pool.inner())
        .await?;

        // The row is committed; observers run before the re-read can fail.
        let id = ListingId::new(result.last_insert_id());
        self.notifier.notify(ListingChange::Created(id)).await;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| PropcacheError::Internal("Failed to fetch inserted listing".to_string()))
    }

    async fn update(&self, listing: &Listing) -> PropcacheResult<Listing> {
        debug!("Updating listing: {}", listing.id);

        sqlx::query(
            r#"
            UPDATE listings
            SET title = ?, description = ?, price_cents = ?, location = ?
            WHERE id = ?
            "#,
        )
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price.cents())
        .bind(&listing.location)
        .bind(listing.id.into_inner())
        .execute(self.pool.inner())
        .await?;

        self.notifier.notify(ListingChange::Updated(listing.id)).await;

        // rows_affected is 0 for a no-op update, so existence is checked by re-reading
        self.find_by_id(listing.id)
            .await?
            .ok_or_else(|| PropcacheError::not_found("Listing", listing.id))
    }

    async fn delete(&self, id: ListingId) -> PropcacheResult<bool> {
        debug!("Deleting listing: {}", id);

        let result = sqlx::query("DELETE FROM listings WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            self.notifier.notify(ListingChange::Deleted(id)).await;
        }
        Ok(deleted)
    }

    async fn delete_all(&self) -> PropcacheResult<u64> {
        debug!("Deleting all listings");

        let result = sqlx::query("DELETE FROM listings")
            .execute(self.pool.inner())
            .await?;

        let removed = result.rows_affected();
        self.notifier.notify(ListingChange::Cleared { removed }).await;
        Ok(removed)
    }

    async fn count(&self) -> PropcacheResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM listings")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }

    fn subscribe(&self, observer: Arc<dyn ListingObserver>) {
        self.notifier.subscribe(observer);
    }
}

impl std::fmt::Debug for MySqlListingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlListingRepository")
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}
