//! Router assembly.
//!
//! ```text
//! request ──► TraceLayer ──► CatchPanicLayer ──► TimeoutLayer ──► body limit ──► handler
//! ```

use std::any::Any;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::handlers;
use crate::AppState;

/// Builds the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    Router::new()
        .route("/v1/healthcheck", get(handlers::healthcheck))
        .route("/v1/receipts", get(handlers::list_receipts))
        .route("/v1/receipts/process", post(handlers::process_receipt))
        .route("/v1/receipts/{id}", get(handlers::get_receipt))
        .route("/v1/receipts/{id}/points", get(handlers::get_receipt_points))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
