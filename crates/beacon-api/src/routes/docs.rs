//! OpenAPI document endpoint.

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// `GET /v3/api-docs`
pub async fn api_docs(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.openapi.as_ref().clone())
}
