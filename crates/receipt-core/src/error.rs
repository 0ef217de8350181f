//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── PriceError       - Malformed monetary text                        │
//! │  └── CoreError        - Price + validation failures                    │
//! │                                                                         │
//! │  receipt-store errors (separate crate)                                 │
//! │  └── StoreError       - NotFound / Internal                            │
//! │                                                                         │
//! │  receipt-api errors (in app)                                           │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: PriceError → CoreError ──┐                                       │
//! │        StoreError ──────────────┴─► ApiError → Client                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::validation::FieldErrors;

// =============================================================================
// Price Error
// =============================================================================

/// Raised when monetary text does not match the price grammar.
///
/// ## When This Occurs
/// - The value is not a quoted string (`2.25` instead of `"2.25"`)
/// - The string is not a plain decimal numeral (`"$2.25"`, `"1e3"`, `"abc"`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("invalid price format")]
    InvalidFormat,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price or total could not be parsed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// One or more receipt fields failed validation.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /v1/receipts/process
    ///      │
    ///      ▼
    /// validate_receipt() → { "purchaseDate": "must be in the format YYYY-MM-DD" }
    ///      │
    ///      ▼
    /// 422 Unprocessable Entity (receipt is never stored)
    /// ```
    #[error("receipt failed validation: {0}")]
    Validation(FieldErrors),
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::Validation(errors)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_error_message() {
        assert_eq!(PriceError::InvalidFormat.to_string(), "invalid price format");
    }

    #[test]
    fn test_price_error_converts_to_core_error() {
        let core_err: CoreError = PriceError::InvalidFormat.into();
        assert!(matches!(core_err, CoreError::Price(_)));
        assert_eq!(core_err.to_string(), "invalid price format");
    }

    #[test]
    fn test_field_errors_convert_to_core_error() {
        let mut errors = FieldErrors::default();
        errors.insert("retailer", "must be provided");

        let core_err: CoreError = errors.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "receipt failed validation: retailer: must be provided"
        );
    }
}
