//! # Propcache Server Library
//!
//! Dependency wiring and startup utilities shared by the server and seed
//! binaries.

pub mod di;
pub mod startup;
