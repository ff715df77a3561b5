//! MySQL repository implementations.

mod listing_repository;

pub use listing_repository::*;
