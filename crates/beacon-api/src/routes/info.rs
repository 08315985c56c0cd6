//! Greeting and version endpoints.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of `GET /api/hello`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Greeting text.
    pub message: String,
}

/// Body of `GET /api/version`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Configured application version.
    pub version: String,
}

/// `GET /api/hello`
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from Beacon!".to_string(),
    })
}

/// `GET /api/version`
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: state.version.clone(),
    })
}
