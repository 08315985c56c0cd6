//! Server status endpoints.

use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use beacon_auth::AuthenticatedClient;
use beacon_core::ApiError;

use crate::state::AppState;
use crate::status::{ServerStatusResponse, UptimeResponse};

/// `GET /api/server-status`
pub async fn server_status(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    uri: Uri,
) -> Result<Json<ServerStatusResponse>, ApiError> {
    tracing::debug!(principal = %client.principal, "Server status requested");
    state.status.status().map(Json).map_err(|err| {
        tracing::error!(error = %err, path = %uri.path(), "Failed to read server status");
        ApiError::internal(uri.path())
    })
}

/// `GET /api/server-status/uptime`
pub async fn uptime(State(state): State<AppState>, client: AuthenticatedClient) -> Json<UptimeResponse> {
    tracing::debug!(principal = %client.principal, "Server uptime requested");
    Json(UptimeResponse {
        uptime: state.status.uptime_ms(),
    })
}
