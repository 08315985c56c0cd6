//! Actuator-style health endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use beacon_core::ServiceState;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of `GET /actuator/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `UP`, `OUT_OF_SERVICE` or `DOWN`.
    pub status: String,
    /// Reason for a degraded or failed state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&ServiceState> for HealthResponse {
    fn from(state: &ServiceState) -> Self {
        Self {
            status: state.health_label().to_string(),
            detail: state.detail().map(str::to_string),
        }
    }
}

/// `GET /actuator/health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let current = state.health.state();
    let code = if current.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(HealthResponse::from(&current)))
}
