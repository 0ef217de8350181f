//! # API Error Type
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Receipt API                        │
//! │                                                                         │
//! │  Decode body ─── bad JSON / bad price ──► BadRequest     ──► 400        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validate ────── FieldErrors ───────────► Validation     ──► 422        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store ───────── StoreError::NotFound ──► NotFound       ──► 404        │
//! │       │          StoreError::Internal ──► Internal       ──► 500        │
//! │       ▼                                                                 │
//! │  Success ──────────────────────────────────────────────────► 200/201    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error body is `{"error": ...}`. Internal details are logged and
//! never sent to the client.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use receipt_core::{CoreError, FieldErrors};
use receipt_store::StoreError;

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const INTERNAL_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

/// Errors returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// One or more fields failed validation.
    #[error("receipt failed validation: {0}")]
    Validation(FieldErrors),

    /// Unknown route, unknown receipt or malformed receipt id.
    #[error("the requested resource could not be found")]
    NotFound,

    #[error("the {0} method is not supported for this resource")]
    MethodNotAllowed(Method),

    /// Unexpected failure; the message is logged, not returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Validation(errors) => json!({ "error": errors }),
            ApiError::NotFound => json!({ "error": NOT_FOUND_MESSAGE }),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                json!({ "error": INTERNAL_MESSAGE })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Price(e) => ApiError::BadRequest(e.to_string()),
            CoreError::Validation(errors) => ApiError::Validation(errors),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound,
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::PriceError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Validation(FieldErrors::default()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed(Method::DELETE).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::NotFound.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(
            ApiError::MethodNotAllowed(Method::PUT).to_string(),
            "the PUT method is not supported for this resource"
        );
    }

    #[test]
    fn test_core_errors_map() {
        assert!(matches!(
            ApiError::from(CoreError::Price(PriceError::InvalidFormat)),
            ApiError::BadRequest(msg) if msg == "invalid price format"
        ));

        let mut errors = FieldErrors::default();
        errors.insert("total", "must be provided");
        let err = ApiError::from(CoreError::Validation(errors));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(matches!(err, ApiError::Validation(e) if e.get("total") == Some("must be provided")));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_store_errors_map() {
        assert!(matches!(
            ApiError::from(StoreError::not_found("abc")),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(StoreError::Internal("poisoned".into())),
            ApiError::Internal(_)
        ));
    }

    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let response = ApiError::Internal("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_body_is_field_map() {
        let mut errors = FieldErrors::default();
        errors.insert("total", "must be positive");

        let response = ApiError::Validation(errors).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["total"], "must be positive");
    }
}
