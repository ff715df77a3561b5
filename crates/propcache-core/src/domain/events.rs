//! Record store change notifications.

use crate::ListingId;
use std::fmt;

/// A committed mutation of the listing record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingChange {
    /// A listing was inserted.
    Created(ListingId),
    /// A listing's editable fields were replaced.
    Updated(ListingId),
    /// A listing was removed.
    Deleted(ListingId),
    /// Every listing was removed in one statement.
    Cleared { removed: u64 },
}

impl ListingChange {
    /// Returns the event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => "listing.created",
            Self::Updated(_) => "listing.updated",
            Self::Deleted(_) => "listing.deleted",
            Self::Cleared { .. } => "listing.cleared",
        }
    }

    /// Returns the affected listing, if the change targets a single record.
    #[must_use]
    pub const fn listing_id(&self) -> Option<ListingId> {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Deleted(id) => Some(*id),
            Self::Cleared { .. } => None,
        }
    }
}

impl fmt::Display for ListingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.listing_id() {
            Some(id) => write!(f, "{}({})", self.event_type(), id),
            None => write!(f, "{}", self.event_type()),
        }
    }
}
