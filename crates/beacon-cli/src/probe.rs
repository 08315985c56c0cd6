//! `beacon probe`: fetch the status of a running server.

use beacon_core::BeaconConfig;
use serde_json::Value;

use crate::{Error, Result};

/// Path probed on the target server.
pub const STATUS_PATH: &str = "/api/server-status";

/// Base URL of the server described by `config`.
///
/// Wildcard listen addresses are replaced by loopback.
pub fn default_url(config: &BeaconConfig) -> String {
    let host = match config.server.host.as_str() {
        "0.0.0.0" | "" => "127.0.0.1",
        "::" => "[::1]",
        other => other,
    };
    format!("http://{host}:{}", config.server.port)
}

/// GET `<base_url>/api/server-status` and return the parsed body.
pub async fn fetch_status(
    client: &reqwest::Client,
    base_url: &str,
    token: Option<&str>,
) -> Result<Value> {
    let url = format!("{}{STATUS_PATH}", base_url.trim_end_matches('/'));
    tracing::debug!(%url, with_token = token.is_some(), "Probing server");

    let mut request = client.get(&url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Run the probe command and print the status as pretty JSON.
pub async fn cmd_probe(config: &BeaconConfig, url: Option<&str>, token: Option<&str>) -> Result<()> {
    let base_url = url.map_or_else(|| default_url(config), str::to_string);
    let token = token
        .map(str::to_string)
        .or_else(|| Some(config.auth.secret_key.clone()).filter(|t| !t.trim().is_empty()));

    let client = reqwest::Client::new();
    let body = fetch_status(&client, &base_url, token.as_deref()).await?;
    let pretty = serde_json::to_string_pretty(&body).map_err(beacon_core::Error::from)?;
    println!("{pretty}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_uses_configured_host() {
        let mut config = BeaconConfig::default();
        config.server.host = "status.internal".to_string();
        config.server.port = 9090;
        assert_eq!(default_url(&config), "http://status.internal:9090");
    }

    #[test]
    fn test_default_url_replaces_wildcard() {
        let mut config = BeaconConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        assert_eq!(default_url(&config), "http://127.0.0.1:8080");
    }
}
