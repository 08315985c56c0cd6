//! HTTP routes.
//!
//! | Path                          | Auth     |
//! |-------------------------------|----------|
//! | `GET /api/server-status`        | bearer |
//! | `GET /api/server-status/uptime` | bearer |
//! | `GET /api/hello`                | bearer |
//! | `GET /api/version`              | bearer |
//! | `GET /api/auth/check`           | public |
//! | `POST /api/auth/validate`       | public |
//! | `GET /actuator/health`          | public |
//! | `GET /v3/api-docs`              | public |
//!
//! Every other path is answered with 403.

pub mod auth;
pub mod docs;
pub mod health;
pub mod info;
pub mod status;

use std::sync::Arc;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;
use beacon_auth::AuthLayer;
use beacon_core::ApiError;

use crate::middleware::trace_requests;
use crate::state::AppState;

/// Assemble the full router.
pub fn router(state: AppState) -> Router {
    let auth_layer = AuthLayer::new(Arc::clone(&state.validator), state.auth.clone());

    let protected = Router::new()
        .route("/api/server-status", get(status::server_status))
        .route("/api/server-status/uptime", get(status::uptime))
        .route("/api/hello", get(info::hello))
        .route("/api/version", get(info::version))
        .route_layer(auth_layer);

    Router::new()
        .route("/api/auth/check", get(auth::check))
        .route("/api/auth/validate", post(auth::validate))
        .route("/actuator/health", get(health::health))
        .route("/v3/api-docs", get(docs::api_docs))
        .merge(protected)
        .fallback(deny_all)
        .layer(axum::middleware::from_fn(trace_requests))
        .with_state(state)
}

async fn deny_all(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "Denied request to unmapped path");
    ApiError::forbidden(uri.path())
}
