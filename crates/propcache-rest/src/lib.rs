//! # Propcache REST
//!
//! REST API layer using Axum for Propcache.
//! Provides the listing endpoints, the response cache middleware, cache
//! metrics, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
