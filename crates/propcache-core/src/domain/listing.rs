//! Property listing entity.

use super::Price;
use crate::ListingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property listing as committed to the record store.
///
/// The record store owns the authoritative instance; caches only ever hold
/// read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Store-assigned identifier.
    pub id: ListingId,

    /// Short headline.
    pub title: String,

    /// Free-form description.
    pub description: String,

    /// Asking price.
    pub price: Price,

    /// City or area.
    pub location: String,

    /// Store-assigned creation timestamp, immutable after creation.
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Applies editable fields, leaving `id` and `created_at` untouched.
    pub fn apply(&mut self, draft: ListingDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.price = draft.price;
        self.location = draft.location;
    }
}

/// The caller-supplied fields of a listing, before the store assigns
/// an ID and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl ListingDraft {
    /// Creates a new draft.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            location: location.into(),
        }
    }

    /// Materializes the draft with store-assigned fields.
    #[must_use]
    pub fn into_listing(self, id: ListingId, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            created_at,
        }
    }
}
