//! Listing DTOs.

use chrono::SecondsFormat;
use propcache_core::validation::rules;
use propcache_core::{Listing, ListingDraft, ListingId, Price, PropcacheResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ListingRequest {
    #[validate(
        length(max = 200, message = "Title cannot exceed 200 characters"),
        custom(function = "rules::not_blank", message = "Title is required")
    )]
    #[schema(example = "Cozy Apartment in Accra #1234")]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Decimal string with at most two fraction digits.
    #[validate(custom(
        function = "rules::valid_price",
        message = "Price must be a non-negative amount with at most 2 decimals"
    ))]
    #[schema(example = "30000.00")]
    pub price: String,

    #[validate(
        length(max = 100, message = "Location cannot exceed 100 characters"),
        custom(function = "rules::not_blank", message = "Location is required")
    )]
    #[schema(example = "Accra")]
    pub location: String,
}

impl ListingRequest {
    /// Converts a validated request into a draft.
    pub fn into_draft(self) -> PropcacheResult<ListingDraft> {
        let price: Price = self.price.parse()?;
        Ok(ListingDraft::new(
            self.title.trim(),
            self.description,
            price,
            self.location.trim(),
        ))
    }
}

/// Listing response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListingResponse {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    /// Exact decimal with two fraction digits.
    #[schema(example = "30000.00")]
    pub price: String,
    pub location: String,
    /// ISO-8601 timestamp.
    #[schema(example = "2024-05-01T10:15:30.000000+00:00")]
    pub created_at: String,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            price: listing.price.to_string(),
            location: listing.location,
            created_at: listing
                .created_at
                .to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

/// Full listing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListingListResponse {
    pub properties: Vec<ListingResponse>,
}

impl From<Vec<Listing>> for ListingListResponse {
    fn from(listings: Vec<Listing>) -> Self {
        Self {
            properties: listings.into_iter().map(ListingResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use propcache_core::ValidateExt;

    fn request(title: &str, price: &str, location: &str) -> ListingRequest {
        ListingRequest {
            title: title.to_string(),
            description: "Nice".to_string(),
            price: price.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn test_response_normalizes_price_and_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 30).unwrap();
        let listing = ListingDraft::new("X", "Nice", Price::from_cents(3_000_000), "Accra")
            .into_listing(ListingId::new(1), created_at);

        let response = ListingResponse::from(listing);

        assert_eq!(response.price, "30000.00");
        assert_eq!(response.created_at, "2024-05-01T10:15:30.000000+00:00");
    }

    #[test]
    fn test_empty_list_serializes_with_properties_key() {
        let json = serde_json::to_string(&ListingListResponse::from(Vec::new())).unwrap();
        assert_eq!(json, r#"{"properties":[]}"#);
    }

    #[test]
    fn test_valid_request_converts_to_draft() {
        let req = request("  Loft  ", "45000.5", "Tema");
        req.validate_request().unwrap();

        let draft = req.into_draft().unwrap();
        assert_eq!(draft.title, "Loft");
        assert_eq!(draft.price.to_string(), "45000.50");
    }

    #[test]
    fn test_invalid_request_lists_fields() {
        let err = request(" ", "-5", "Ho").validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("price"));
        assert!(message.contains("title"));
        assert!(!message.contains("location"));
    }
}
