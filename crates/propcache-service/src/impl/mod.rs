//! Listing service implementations.
//!
//! Trait definitions live in the parent module (e.g. `listing_service.rs`).

pub mod listing_service_impl;

pub use listing_service_impl::ListingServiceImpl;
