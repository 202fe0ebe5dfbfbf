//! JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error returned by the JSON endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request parameters (400).
    BadRequest(String),
    /// Anything else (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::InvalidInput(msg) | crate::Error::InvalidExpiry(msg) => {
                ApiError::BadRequest(msg)
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
