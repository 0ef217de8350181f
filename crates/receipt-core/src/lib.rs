//! # receipt-core: Pure Business Logic for the Receipt Processor
//!
//! This crate is the **heart** of the receipt processor. It contains the
//! data model, the validation rules and the points engine as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Processor Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    receipt-api (axum)                           │   │
//! │  │    decode JSON ──► validate ──► store.insert ──► respond        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ receipt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │  points   │  │ validation│  │   │
//! │  │   │  Receipt  │  │   Price   │  │  7 rules  │  │ Validator │  │   │
//! │  │   │   Item    │  │ (decimal) │  │ breakdown │  │FieldErrors│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 receipt-store (RwLock<HashMap>)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, CandidateReceipt, Receipt)
//! - [`price`] - Exact decimal `Price` with the two-decimal string contract
//! - [`points`] - The points engine: seven independent rules and their sum
//! - [`validation`] - Field-level receipt validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same receipt in, same points out
//! 2. **Exact Money**: every monetary value is a `rust_decimal::Decimal`, never a float
//! 3. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::points::calculate_points;
//! use receipt_core::{Item, Price, Receipt};
//!
//! let receipt = Receipt {
//!     retailer: "M&M Corner Market".to_string(),
//!     purchase_date: "2022-03-20".to_string(),
//!     purchase_time: "14:33".to_string(),
//!     items: vec![
//!         Item::new("Gatorade", "2.25".parse().unwrap()),
//!         Item::new("Gatorade", "2.25".parse().unwrap()),
//!         Item::new("Gatorade", "2.25".parse().unwrap()),
//!         Item::new("Gatorade", "2.25".parse().unwrap()),
//!     ],
//!     total: "9.00".parse::<Price>().unwrap(),
//!     ..Receipt::default()
//! };
//!
//! assert_eq!(calculate_points(&receipt), 109);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod points;
pub mod price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, PriceError};
pub use points::{calculate_points, PointsBreakdown};
pub use price::Price;
pub use types::*;
pub use validation::{validate_receipt, FieldErrors, Validator};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a retailer name, in bytes.
pub const MAX_RETAILER_BYTES: usize = 500;

/// chrono format for `purchaseDate` (`YYYY-MM-DD`).
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// chrono format for `purchaseTime` (`HH:MM`, 24-hour).
pub const PURCHASE_TIME_FORMAT: &str = "%H:%M";
