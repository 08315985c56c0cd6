//! `beacon serve`: run the HTTP API.

use beacon_api::Server;
use beacon_core::BeaconConfig;

use crate::Result;

/// Apply `--host`/`--port` on top of the loaded configuration.
pub fn apply_overrides(config: &mut BeaconConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}

/// Run the server until Ctrl-C.
pub async fn cmd_serve(config: BeaconConfig) -> Result<()> {
    if config.auth.enabled && config.auth.secret_key.trim().is_empty() && config.auth.allowed_tokens.is_empty() {
        tracing::warn!("Authentication is enabled but no tokens are configured; every protected request will be rejected");
    }
    if !config.auth.enabled {
        tracing::warn!("Authentication is disabled; protected endpoints are open");
    }
    Server::new(config).run().await?;
    Ok(())
}
