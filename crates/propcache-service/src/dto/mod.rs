//! Data Transfer Objects (DTOs).

mod listing_dto;
mod metrics_dto;

pub use listing_dto::*;
pub use metrics_dto::*;
