//! Result type aliases for Propcache.

use crate::PropcacheError;

/// A specialized `Result` type for Propcache operations.
pub type PropcacheResult<T> = Result<T, PropcacheError>;
