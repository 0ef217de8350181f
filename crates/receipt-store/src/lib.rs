//! # receipt-store: Concurrent In-Memory Receipt Store
//!
//! This crate holds every scored receipt for the lifetime of the process.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Processor Data Flow                         │
//! │                                                                         │
//! │  HTTP handler (process_receipt)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  receipt-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   insert ──► write lock ──► new id ──► score ──► HashMap        │   │
//! │  │   get    ──► read lock  ──► clone                               │   │
//! │  │   get_all──► read lock  ──► clone all                           │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipt-core::points (pure, called under the write lock)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `ReceiptStore` and identifier parsing
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use receipt_core::CandidateReceipt;
//! use receipt_store::ReceiptStore;
//!
//! let store = ReceiptStore::new();
//! let stored = store.insert(CandidateReceipt {
//!     retailer: "Target".to_string(),
//!     total: "35.35".parse().unwrap(),
//!     ..CandidateReceipt::default()
//! })?;
//!
//! assert_eq!(stored.version, 1);
//! assert_eq!(store.get(stored.id)?.points, 6);
//! # Ok::<(), receipt_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{parse_receipt_id, ReceiptStore};
