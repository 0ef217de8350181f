//! Request body decoding.
//!
//! Bodies are buffered as bytes and decoded here rather than through
//! `axum::Json`, so that every decode failure becomes a 400 with a message
//! the client can act on:
//!
//! ```text
//! ""                     → body must not be empty
//! {"retailer": "Tar      → body contains badly-formed JSON
//! {"retailer" "x"}       → body contains badly-formed JSON (at line 1, column 13)
//! {"total": 35.35}       → invalid price format at line 1 column 15
//! {} {}                  → body must only contain a single JSON value
//! > max_body_bytes       → body must not be larger than N bytes
//! ```
//!
//! No Content-Type header is required.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::ApiError;

/// Decodes exactly one JSON value of type `T` from `body`.
pub fn read_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest("body must not be empty".to_string()));
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = T::deserialize(&mut de).map_err(decode_error)?;

    de.end().map_err(|_| {
        ApiError::BadRequest("body must only contain a single JSON value".to_string())
    })?;

    Ok(value)
}

/// Maps a failure to buffer the body into a client-facing error.
pub fn body_rejection(rejection: BytesRejection, max_body_bytes: usize) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(format!(
            "body must not be larger than {max_body_bytes} bytes"
        ))
    } else {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn decode_error(err: serde_json::Error) -> ApiError {
    let message = match err.classify() {
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {}, column {})",
            err.line(),
            err.column()
        ),
        Category::Eof => "body contains badly-formed JSON".to_string(),
        Category::Data => err.to_string(),
        Category::Io => format!("body could not be read: {err}"),
    };
    ApiError::BadRequest(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::CandidateReceipt;

    fn bad_request_message(body: &str) -> String {
        match read_json::<CandidateReceipt>(body.as_bytes()) {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_decodes_single_value() {
        let candidate: CandidateReceipt =
            read_json(br#"{"retailer": "Target", "total": "1.25"}"#).unwrap();
        assert_eq!(candidate.retailer, "Target");
        assert_eq!(candidate.total.format(), "1.25");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(bad_request_message(""), "body must not be empty");
        assert_eq!(bad_request_message("  \n"), "body must not be empty");
    }

    #[test]
    fn test_truncated_json() {
        assert_eq!(
            bad_request_message(r#"{"retailer": "Tar"#),
            "body contains badly-formed JSON"
        );
    }

    #[test]
    fn test_syntax_error_has_position() {
        let msg = bad_request_message(r#"{"retailer" "Target"}"#);
        assert!(msg.starts_with("body contains badly-formed JSON (at line 1, column"), "{msg}");
    }

    #[test]
    fn test_bad_price() {
        let msg = bad_request_message(r#"{"total": 35.35}"#);
        assert!(msg.contains("invalid price format"), "{msg}");
    }

    #[test]
    fn test_wrong_field_type() {
        let msg = bad_request_message(r#"{"retailer": 42}"#);
        assert!(msg.contains("invalid type"), "{msg}");
    }

    #[test]
    fn test_multiple_values() {
        assert_eq!(
            bad_request_message("{} {}"),
            "body must only contain a single JSON value"
        );
    }
}
