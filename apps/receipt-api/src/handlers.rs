//! HTTP handlers.
//!
//! Handlers are thin: decode, validate, call the store, wrap the result in a
//! named JSON envelope. All failures flow through [`ApiError`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use receipt_core::CandidateReceipt;
use receipt_store::parse_receipt_id;

use crate::body::{body_rejection, read_json};
use crate::error::{ApiError, ApiResult};
use crate::{AppState, VERSION};

// =============================================================================
// Health
// =============================================================================

/// `GET /v1/healthcheck`
pub async fn healthcheck(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "available",
        "system_info": {
            "environment": state.config.environment.as_str(),
            "version": VERSION,
        }
    }))
}

// =============================================================================
// Receipts
// =============================================================================

/// `POST /v1/receipts/process`
///
/// Responds 201 with the stored receipt and a `Location` header pointing at
/// it. Any `id`, `points` or `version` sent by the client is ignored.
pub async fn process_receipt(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<impl IntoResponse> {
    let body = body.map_err(|rejection| body_rejection(rejection, state.config.max_body_bytes))?;
    let candidate: CandidateReceipt = read_json(&body)?;

    candidate.validate()?;

    let receipt = state.store.insert(candidate)?;
    info!(
        receipt_id = %receipt.id,
        retailer = %receipt.retailer,
        points = receipt.points,
        "Receipt processed"
    );

    let location = format!("/v1/receipts/{}", receipt.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(json!({ "receipt": receipt })),
    ))
}

/// `GET /v1/receipts`
pub async fn list_receipts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let receipts = state.store.get_all()?;
    debug!(count = receipts.len(), "Listing receipts");
    Ok(Json(json!({ "receipts": receipts })))
}

/// `GET /v1/receipts/{id}`
pub async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_receipt_id(&id)?;
    let receipt = state.store.get(id)?;
    Ok(Json(json!({ "receipt": receipt })))
}

/// `GET /v1/receipts/{id}/points`
pub async fn get_receipt_points(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_receipt_id(&id)?;
    let receipt = state.store.get(id)?;
    Ok(Json(json!({ "points": receipt.points })))
}

// =============================================================================
// Fallbacks
// =============================================================================

/// Unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Known route, unsupported method.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
