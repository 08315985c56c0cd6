//! Shared handler state.

use std::sync::Arc;

use beacon_auth::{AuthConfig, StaticTokenValidator};
use beacon_core::{BeaconConfig, ServiceHandle};

use crate::openapi;
use crate::status::StatusSource;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Status snapshots and uptime.
    pub status: Arc<dyn StatusSource>,
    /// Version reported by `/api/version`.
    pub version: String,
    /// Server lifecycle, read by the health endpoint.
    pub health: ServiceHandle,
    /// Token validator shared by the middleware and the auth endpoints.
    pub validator: Arc<StaticTokenValidator>,
    /// Token configuration.
    pub auth: AuthConfig,
    /// Pre-rendered OpenAPI document.
    pub openapi: Arc<serde_json::Value>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: &BeaconConfig, status: Arc<dyn StatusSource>, health: ServiceHandle) -> Self {
        Self {
            status,
            version: config.app.version.clone(),
            health,
            validator: Arc::new(StaticTokenValidator),
            auth: AuthConfig::from(&config.auth),
            openapi: Arc::new(openapi::document(&config.app.name, &config.app.version)),
        }
    }
}
