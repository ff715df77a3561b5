//! # Propcache Core
//!
//! Core types, domain model, and error definitions for Propcache.
//! Every other crate in the workspace builds on the abstractions here.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod timeout;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use timeout::*;
pub use validation::*;

// Re-export shaku for component interfaces
pub use shaku::Interface;
