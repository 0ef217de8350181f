//! # Receipt Store
//!
//! ## Receipt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Receipt Lifecycle                                 │
//! │                                                                         │
//! │  absent ──insert()──► stored                                           │
//! │                                                                         │
//! │  No update, no delete: a stored receipt is never rescored.             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! One `RwLock` guards the whole map. `insert` holds the write lock while it
//! picks an id, scores the receipt and stores it, so two inserts can never
//! race on an id. Readers share the read lock. Nothing under the lock does
//! I/O; scoring is pure CPU work.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use html_escape::decode_html_entities;
use tracing::{debug, error};
use uuid::Uuid;

use receipt_core::{calculate_points, CandidateReceipt, Receipt};

use crate::error::{StoreError, StoreResult};

/// Thread-safe in-memory store of scored receipts.
///
/// Callers only ever receive clones; the canonical copy stays in the map.
#[derive(Debug, Default)]
pub struct ReceiptStore {
    receipts: RwLock<HashMap<Uuid, Receipt>>,
}

impl ReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ReceiptStore::default()
    }

    /// Scores and stores a candidate receipt.
    ///
    /// ## What the store assigns
    /// - `id`: fresh random UUID, never reused
    /// - `created_at`: now
    /// - `points`: computed by the points engine
    /// - `version`: 1
    ///
    /// HTML entities in the retailer name are decoded before scoring, so
    /// `"M&amp;M"` is stored and scored as `"M&M"`. Only `;`-terminated
    /// entities are decoded; a bare `"M&amp M"` is stored unchanged.
    ///
    /// ## Returns
    /// The stored receipt, including the server-assigned fields.
    pub fn insert(&self, candidate: CandidateReceipt) -> StoreResult<Receipt> {
        let mut receipts = self.receipts.write().map_err(|e| poisoned("insert", e))?;

        let id = loop {
            let id = Uuid::new_v4();
            if !id.is_nil() && !receipts.contains_key(&id) {
                break id;
            }
        };

        let mut receipt = Receipt {
            id,
            created_at: Utc::now(),
            retailer: decode_html_entities(&candidate.retailer).into_owned(),
            purchase_date: candidate.purchase_date,
            purchase_time: candidate.purchase_time,
            items: candidate.items.unwrap_or_default(),
            total: candidate.total,
            points: 0,
            version: 1,
        };
        receipt.points = calculate_points(&receipt);

        debug!(
            id = %receipt.id,
            retailer = %receipt.retailer,
            items = receipt.items.len(),
            points = receipt.points,
            "Inserting receipt"
        );

        receipts.insert(id, receipt.clone());
        Ok(receipt)
    }

    /// Gets a receipt by id.
    ///
    /// The nil UUID is reported as not found without taking the lock.
    pub fn get(&self, id: Uuid) -> StoreResult<Receipt> {
        if id.is_nil() {
            return Err(StoreError::not_found(id.to_string()));
        }

        let receipts = self.receipts.read().map_err(|e| poisoned("get", e))?;
        receipts.get(&id).cloned().ok_or_else(|| {
            debug!(%id, "Receipt not found");
            StoreError::not_found(id.to_string())
        })
    }

    /// Returns every stored receipt, in no particular order.
    pub fn get_all(&self) -> StoreResult<Vec<Receipt>> {
        let receipts = self.receipts.read().map_err(|e| poisoned("get_all", e))?;
        Ok(receipts.values().cloned().collect())
    }

    /// Number of stored receipts.
    pub fn len(&self) -> usize {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses a caller-supplied identifier into a store key.
///
/// Anything that is not a non-nil UUID cannot name a stored receipt, so it
/// is reported as `NotFound` rather than as a separate error.
pub fn parse_receipt_id(text: &str) -> StoreResult<Uuid> {
    match Uuid::parse_str(text) {
        Ok(id) if !id.is_nil() => Ok(id),
        _ => Err(StoreError::not_found(text)),
    }
}

fn poisoned<T>(operation: &str, err: PoisonError<T>) -> StoreError {
    error!(operation, "Receipt store lock poisoned");
    StoreError::Internal(err.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
