//! # Receipt API
//!
//! HTTP service that scores and stores receipts.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Receipt API                                   │
//! │                                                                         │
//! │  GET  /v1/healthcheck            → status, environment, version        │
//! │  POST /v1/receipts/process       → 201 { "receipt": {...} }            │
//! │  GET  /v1/receipts               → { "receipts": [...] }               │
//! │  GET  /v1/receipts/{id}          → { "receipt": {...} }                │
//! │  GET  /v1/receipts/{id}/points   → { "points": n }                     │
//! │                                                                         │
//! │  Errors: { "error": "message" } or { "error": { field: message } }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Flags, with environment variable fallbacks:
//! - `--port` / `PORT` - listen port (default: 8080)
//! - `--env` / `APP_ENV` - development | staging | production
//! - `--request-timeout-secs` / `REQUEST_TIMEOUT_SECS` (default: 10)
//! - `--max-body-bytes` / `MAX_BODY_BYTES` (default: 1 MiB)

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use receipt_store::ReceiptStore;

// Re-exports
pub use config::{ApiConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;

/// Version reported by the healthcheck.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state.
#[derive(Debug)]
pub struct AppState {
    pub store: ReceiptStore,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        AppState {
            store: ReceiptStore::new(),
            config,
        }
    }
}
