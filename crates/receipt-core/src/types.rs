//! # Domain Types
//!
//! Core domain types used throughout the receipt processor.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐         ┌─────────────────────┐               │
//! │  │  CandidateReceipt   │ insert  │      Receipt        │               │
//! │  │  ─────────────────  │ ──────► │  ─────────────────  │               │
//! │  │  retailer           │         │  id (UUID, server)  │               │
//! │  │  purchaseDate       │         │  created_at (server)│               │
//! │  │  purchaseTime       │         │  retailer ... total │               │
//! │  │  items: [Item]?     │         │  points (server)    │               │
//! │  │  total: Price       │         │  version (server)   │               │
//! │  └─────────────────────┘         └─────────────────────┘               │
//! │                                                                         │
//! │  ┌─────────────────────┐                                               │
//! │  │        Item         │   shortDescription + price                    │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Client vs. Server Fields
//! A candidate carries only what a client may supply. `id`, `points` and
//! `version` have no slot on it, so values a client sends for them are
//! dropped during decoding and the store fills in its own.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::price::Price;
use crate::{PURCHASE_DATE_FORMAT, PURCHASE_TIME_FORMAT};

// =============================================================================
// Item
// =============================================================================

/// One receipt line.
///
/// A non-empty description and a positive price are enforced by the
/// validator, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub price: Price,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: Price) -> Self {
        Item {
            short_description: short_description.into(),
            price,
        }
    }
}

// =============================================================================
// Candidate Receipt
// =============================================================================

/// A client-submitted receipt that has not been validated or stored.
///
/// Every field defaults when absent, so a missing `retailer` decodes to an
/// empty string and is reported by the validator as "must be provided".
/// `items` stays `None` when the key is missing, which is distinct from an
/// explicit empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReceipt {
    #[serde(default)]
    pub retailer: String,

    #[serde(default)]
    pub purchase_date: String,

    #[serde(default)]
    pub purchase_time: String,

    #[serde(default)]
    pub items: Option<Vec<Item>>,

    #[serde(default)]
    pub total: Price,
}

/// Strips every server-managed field from a stored receipt.
impl From<Receipt> for CandidateReceipt {
    fn from(receipt: Receipt) -> Self {
        CandidateReceipt {
            retailer: receipt.retailer,
            purchase_date: receipt.purchase_date,
            purchase_time: receipt.purchase_time,
            items: Some(receipt.items),
            total: receipt.total,
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A scored receipt as held by the store.
///
/// ## Field Ownership
/// ```text
/// id, created_at, points, version  ← assigned by the store at insert
/// everything else                  ← copied from the candidate
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: Uuid,

    /// Server-side insertion instant; never part of the wire form.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,

    pub retailer: String,

    /// `YYYY-MM-DD`
    pub purchase_date: String,

    /// `HH:MM`, 24-hour clock
    pub purchase_time: String,

    /// Order is preserved as submitted.
    pub items: Vec<Item>,

    pub total: Price,

    pub points: i64,

    /// Revision counter, 1 on first insert.
    pub version: u32,
}

// =============================================================================
// Purchase Date / Time Parsing
// =============================================================================

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// ## Example
/// ```rust
/// use receipt_core::types::parse_purchase_date;
///
/// assert!(parse_purchase_date("2022-01-01").is_some());
/// assert!(parse_purchase_date("2022-02-30").is_none()); // not a real date
/// assert!(parse_purchase_date("2022-1-1").is_none());   // not zero-padded
/// ```
pub fn parse_purchase_date(text: &str) -> Option<NaiveDate> {
    if !matches_digit_shape(text, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(text, PURCHASE_DATE_FORMAT).ok()
}

/// Parses a strict 24-hour `HH:MM` time of day.
///
/// ## Example
/// ```rust
/// use receipt_core::types::parse_purchase_time;
///
/// assert!(parse_purchase_time("14:33").is_some());
/// assert!(parse_purchase_time("24:00").is_none());
/// assert!(parse_purchase_time("2:30").is_none());
/// ```
pub fn parse_purchase_time(text: &str) -> Option<NaiveTime> {
    if !matches_digit_shape(text, "dd:dd") {
        return None;
    }
    NaiveTime::parse_from_str(text, PURCHASE_TIME_FORMAT).ok()
}

/// `d` in the shape matches one ASCII digit; any other byte must match literally.
///
/// chrono accepts unpadded and over-long numeric fields, so the layout is
/// pinned here first.
fn matches_digit_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(t, s)| match s {
            b'd' => t.is_ascii_digit(),
            _ => t == s,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_candidate_decodes_camel_case() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
            "total": "6.49"
        }"#;

        let candidate: CandidateReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.retailer, "Target");
        assert_eq!(candidate.purchase_date, "2022-01-01");
        assert_eq!(candidate.purchase_time, "13:01");
        let items = candidate.items.unwrap();
        assert_eq!(items[0].short_description, "Mountain Dew 12PK");
        assert_eq!(items[0].price.format(), "6.49");
        assert_eq!(candidate.total.format(), "6.49");
    }

    #[test]
    fn test_candidate_missing_fields_default() {
        let candidate: CandidateReceipt = serde_json::from_str("{}").unwrap();
        assert!(candidate.retailer.is_empty());
        assert!(candidate.items.is_none());
        assert!(candidate.total.is_zero());

        let candidate: CandidateReceipt = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(candidate.items, Some(vec![]));
    }

    #[test]
    fn test_candidate_ignores_server_fields() {
        let json = r#"{
            "id": "7fb1377b-b223-49d9-a31a-5a02701dd310",
            "points": 9999,
            "version": 42,
            "retailer": "Target",
            "total": "1.00"
        }"#;

        let candidate: CandidateReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.retailer, "Target");
    }

    #[test]
    fn test_candidate_rejects_numeric_price() {
        let json = r#"{ "retailer": "Target", "total": 35.35 }"#;
        assert!(serde_json::from_str::<CandidateReceipt>(json).is_err());
    }

    #[test]
    fn test_receipt_serializes_without_created_at() {
        let receipt = Receipt {
            retailer: "Target".to_string(),
            total: "35.35".parse().unwrap(),
            points: 28,
            version: 1,
            ..Receipt::default()
        };

        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["total"], "35.35");
        assert_eq!(value["points"], 28);
        assert_eq!(value["version"], 1);
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert!(value.get("createdAt").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_receipt_into_candidate_drops_server_fields() {
        let receipt = Receipt {
            id: Uuid::new_v4(),
            retailer: "Walgreens".to_string(),
            items: vec![Item::new("Pepsi - 12-oz", "1.25".parse().unwrap())],
            points: 15,
            version: 3,
            ..Receipt::default()
        };

        let candidate = CandidateReceipt::from(receipt.clone());
        assert_eq!(candidate.retailer, receipt.retailer);
        assert_eq!(candidate.items, Some(receipt.items));
    }

    #[test]
    fn test_parse_purchase_date() {
        let date = parse_purchase_date("2022-03-21").unwrap();
        assert_eq!(date.day(), 21);

        assert!(parse_purchase_date("").is_none());
        assert!(parse_purchase_date("2022-13-01").is_none());
        assert!(parse_purchase_date("2023-02-29").is_none());
        assert!(parse_purchase_date("22-01-01").is_none());
        assert!(parse_purchase_date("2022/01/01").is_none());
        assert!(parse_purchase_date("2022-01-01T00:00").is_none());
    }

    #[test]
    fn test_parse_purchase_time() {
        let time = parse_purchase_time("15:59").unwrap();
        assert_eq!(time.hour(), 15);
        assert_eq!(time.minute(), 59);

        assert!(parse_purchase_time("").is_none());
        assert!(parse_purchase_time("12:60").is_none());
        assert!(parse_purchase_time("1:05 PM").is_none());
        assert!(parse_purchase_time("13:01:00").is_none());
    }
}
