//! # Validation Module
//!
//! Field-level validation of candidate receipts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Decoding (serde)                                             │
//! │  ├── JSON syntax, field types                                          │
//! │  └── Price grammar (quoted decimal strings only)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, length limits                                    │
//! │  ├── Date/time formats                                                 │
//! │  └── Positive prices and total                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Points engine                                                │
//! │  └── Still scores malformed dates/times as 0 instead of failing        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule runs; nothing short-circuits. A field key keeps the first
//! message recorded for it, so a zero total reports "must be provided"
//! rather than "must be positive".
//!
//! ## Usage
//! ```rust
//! use receipt_core::validation::{validate_receipt, Validator};
//! use receipt_core::CandidateReceipt;
//!
//! let candidate = CandidateReceipt::default();
//! let mut v = Validator::new();
//! validate_receipt(&mut v, &candidate);
//!
//! assert!(!v.is_valid());
//! assert_eq!(v.errors().get("retailer"), Some("must be provided"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{parse_purchase_date, parse_purchase_time, CandidateReceipt};
use crate::MAX_RETAILER_BYTES;

// =============================================================================
// Field Errors
// =============================================================================

/// Field name → human-readable violation message.
///
/// Serialized as a plain JSON object so it can be returned to clients as is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Records a message unless the field already has one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Accumulates field errors across independent checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    /// Records `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: impl Into<String>, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: &str) {
        self.errors.insert(field, message);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

// =============================================================================
// Receipt Rules
// =============================================================================

const PROVIDED: &str = "must be provided";
const POSITIVE: &str = "must be positive";

/// Runs every receipt rule and writes failures into `v`.
///
/// ## Rules
/// - `retailer`: non-empty, at most 500 bytes
/// - `purchaseDate`: `YYYY-MM-DD` and a real calendar date
/// - `purchaseTime`: `HH:MM` and a real 24-hour time
/// - `items`: present; each item has a description and a positive price
/// - `total`: positive
pub fn validate_receipt(v: &mut Validator, receipt: &CandidateReceipt) {
    v.check(!receipt.retailer.is_empty(), "retailer", PROVIDED);
    v.check(
        receipt.retailer.len() <= MAX_RETAILER_BYTES,
        "retailer",
        "must not be more than 500 bytes long",
    );

    v.check(
        parse_purchase_date(&receipt.purchase_date).is_some(),
        "purchaseDate",
        "must be in the format YYYY-MM-DD",
    );
    v.check(
        parse_purchase_time(&receipt.purchase_time).is_some(),
        "purchaseTime",
        "must be in the format HH:MM",
    );

    match &receipt.items {
        None => v.add_error("items", PROVIDED),
        Some(items) => {
            for (i, item) in items.iter().enumerate() {
                v.check(
                    !item.short_description.is_empty(),
                    format!("items[{i}].shortDescription"),
                    PROVIDED,
                );
                v.check(!item.price.is_zero(), format!("items[{i}].price"), PROVIDED);
                v.check(item.price.is_positive(), format!("items[{i}].price"), POSITIVE);
            }
        }
    }

    v.check(!receipt.total.is_zero(), "total", PROVIDED);
    v.check(receipt.total.is_positive(), "total", POSITIVE);
}

impl CandidateReceipt {
    /// Validates this candidate.
    ///
    /// ## Errors
    /// `CoreError::Validation` carrying every failing field.
    pub fn validate(&self) -> CoreResult<()> {
        let mut v = Validator::new();
        validate_receipt(&mut v, self);

        if v.is_valid() {
            Ok(())
        } else {
            Err(CoreError::Validation(v.into_errors()))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn field_errors(candidate: &CandidateReceipt) -> FieldErrors {
        match candidate.validate() {
            Err(CoreError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    fn valid_candidate() -> CandidateReceipt {
        CandidateReceipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: Some(vec![
                Item::new("Mountain Dew 12PK", "6.49".parse().unwrap()),
                Item::new("Emils Cheese Pizza", "12.25".parse().unwrap()),
            ]),
            total: "18.74".parse().unwrap(),
        }
    }

    #[test]
    fn test_valid_receipt() {
        assert!(valid_candidate().validate().is_ok());
    }

    #[test]
    fn test_empty_item_list_is_allowed() {
        let candidate = CandidateReceipt {
            items: Some(vec![]),
            ..valid_candidate()
        };
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn test_reports_every_failing_field() {
        let errors = field_errors(&CandidateReceipt::default());

        assert_eq!(errors.get("retailer"), Some("must be provided"));
        assert_eq!(errors.get("purchaseDate"), Some("must be in the format YYYY-MM-DD"));
        assert_eq!(errors.get("purchaseTime"), Some("must be in the format HH:MM"));
        assert_eq!(errors.get("items"), Some("must be provided"));
        assert_eq!(errors.get("total"), Some("must be provided"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_retailer_length_limit() {
        let candidate = CandidateReceipt {
            retailer: "A".repeat(MAX_RETAILER_BYTES),
            ..valid_candidate()
        };
        assert!(candidate.validate().is_ok());

        let candidate = CandidateReceipt {
            retailer: "A".repeat(MAX_RETAILER_BYTES + 1),
            ..valid_candidate()
        };
        let errors = field_errors(&candidate);
        assert_eq!(errors.get("retailer"), Some("must not be more than 500 bytes long"));
    }

    #[test]
    fn test_retailer_limit_counts_bytes() {
        // 'é' is two bytes in UTF-8
        let candidate = CandidateReceipt {
            retailer: "é".repeat(251),
            ..valid_candidate()
        };
        assert!(field_errors(&candidate).contains("retailer"));
    }

    #[test]
    fn test_invalid_date_and_time() {
        let candidate = CandidateReceipt {
            purchase_date: "2022-02-30".to_string(),
            purchase_time: "25:00".to_string(),
            ..valid_candidate()
        };
        let errors = field_errors(&candidate);
        assert!(errors.contains("purchaseDate"));
        assert!(errors.contains("purchaseTime"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_every_bad_item_is_reported() {
        let candidate = CandidateReceipt {
            items: Some(vec![
                Item::new("", "1.00".parse().unwrap()),
                Item::new("Gum", "0.00".parse().unwrap()),
                Item::new("Refund", "-2.00".parse().unwrap()),
            ]),
            ..valid_candidate()
        };
        let errors = field_errors(&candidate);

        assert_eq!(errors.get("items[0].shortDescription"), Some("must be provided"));
        assert_eq!(errors.get("items[1].price"), Some("must be provided"));
        assert_eq!(errors.get("items[2].price"), Some("must be positive"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_total_must_be_positive() {
        let candidate = CandidateReceipt {
            total: "-5.00".parse().unwrap(),
            ..valid_candidate()
        };
        let errors = field_errors(&candidate);
        assert_eq!(errors.get("total"), Some("must be positive"));
    }

    #[test]
    fn test_validator_keeps_first_message() {
        let mut v = Validator::new();
        v.add_error("total", "first");
        v.add_error("total", "second");
        assert_eq!(v.errors().get("total"), Some("first"));
    }

    #[test]
    fn test_field_errors_serialize_as_object() {
        let mut errors = FieldErrors::default();
        errors.insert("total", "must be positive");
        errors.insert("retailer", "must be provided");

        assert_eq!(
            serde_json::to_string(&errors).unwrap(),
            r#"{"retailer":"must be provided","total":"must be positive"}"#
        );
        assert_eq!(
            errors.to_string(),
            "retailer: must be provided; total: must be positive"
        );
    }
}
