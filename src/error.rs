//! Unified API error handling.
//!
//! `ApiError` implements `IntoResponse` so handlers return `ApiResult<T>`
//! instead of assembling `(StatusCode, Json<...>)` tuples by hand. The JSON
//! shape is `{"error": ..., "details": ...}` with `details` omitted when
//! absent.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 500 - no Ghostscript binary was found at startup.
    #[error("Ghostscript not available on server")]
    GhostscriptUnavailable,

    /// 400 - request rejected before compression started.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 500 - a Ghostscript run failed or timed out.
    #[error("Compression error: {details}")]
    Compression { details: String },

    /// 500 - target-size search exhausted every candidate and the
    /// fallback run failed too.
    #[error("Compression failed: {details}")]
    CompressionExhausted { details: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::GhostscriptUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Ghostscript not available on server"),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::Compression { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Compression error").with_details(details),
            ),
            ApiError::CompressionExhausted { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Compression failed").with_details(details),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_omits_absent_details() {
        let body = serde_json::to_string(&ErrorResponse::new("No file part")).unwrap();
        assert_eq!(body, r#"{"error":"No file part"}"#);
    }

    #[test]
    fn error_response_includes_details() {
        let body = serde_json::to_string(
            &ErrorResponse::new("Compression error").with_details("exit status 1"),
        )
        .unwrap();
        assert_eq!(
            body,
            r#"{"error":"Compression error","details":"exit status 1"}"#
        );
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = ApiError::bad_request("No selected file").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn ghostscript_unavailable_maps_to_500() {
        let response = ApiError::GhostscriptUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
