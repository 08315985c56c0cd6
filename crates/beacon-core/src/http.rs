//! JSON error body shared by the auth middleware and the API handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
///
/// ```json
/// {"status":403,"message":"Access denied","path":"/api/hello","timestamp":"...","errors":{}}
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Client-safe message.
    pub message: String,
    /// Request path that failed.
    pub path: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Per-field messages, empty unless a request field was rejected.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ApiError {
    /// Build an error body for `status` with no field errors.
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            path: path.into(),
            timestamp: Utc::now(),
            errors: BTreeMap::new(),
        }
    }

    /// 403 for requests without a valid token, and for paths outside the API.
    pub fn forbidden(path: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Access denied", path)
    }

    /// 500 with a generic message. Log the cause before calling this.
    pub fn internal(path: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred",
            path,
        )
    }

    /// Attach a per-field message.
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(field.into(), message.into());
        self
    }

    /// The status as an [`http::StatusCode`](axum::http::StatusCode).
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
