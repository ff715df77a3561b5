//! Validation utilities.

use crate::{FieldError, PropcacheError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PropcacheError` on failure.
    fn validate_request(&self) -> Result<(), PropcacheError> {
        self.validate().map_err(validation_errors_to_propcache_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `PropcacheError`.
#[must_use]
pub fn validation_errors_to_propcache_error(errors: ValidationErrors) -> PropcacheError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    PropcacheError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use crate::Price;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a string is a non-negative decimal with at most two fraction digits.
    pub fn valid_price(value: &str) -> Result<(), ValidationError> {
        value
            .parse::<Price>()
            .map(|_| ())
            .map_err(|_| ValidationError::new("invalid_price"))
    }
}
