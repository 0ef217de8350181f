//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Missing id / bad id / nil id ──► StoreError::NotFound ──► 404         │
//! │                                                                         │
//! │  Poisoned lock (a writer panicked) ──► StoreError::Internal ──► 500    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Receipt store errors.
///
/// `NotFound` is kept apart from every other fault so callers can map it to
/// a not-found response without inspecting messages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No receipt with this identifier.
    ///
    /// ## When This Occurs
    /// - The id was never issued by this process
    /// - The id text is not a UUID
    /// - The id is the nil UUID
    #[error("receipt not found: {id}")]
    NotFound { id: String },

    /// Unexpected internal failure.
    #[error("internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a NotFound error for an id.
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
