//! Beacon configuration.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `BEACON_*` environment variables. Command-line flags are applied on
//! top by the binary.
//!
//! ```toml
//! [app]
//! name = "beacon"
//! version = "0.1.0"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [auth]
//! enabled = true
//! secret_key = "change-me"
//! allowed_tokens = ["ci-token", "dashboard-token"]
//!
//! [logging]
//! level = "info"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Project name used for the config directory and file name.
pub const PROJECT_NAME: &str = "beacon";

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "BEACON";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BEACON_CONFIG";

const APP_NAME: &str = "BEACON_APP_NAME";
const APP_VERSION: &str = "BEACON_APP_VERSION";
const SERVER_HOST: &str = "BEACON_SERVER_HOST";
const SERVER_PORT: &str = "BEACON_SERVER_PORT";
const AUTH_ENABLED: &str = "BEACON_AUTH_ENABLED";
const AUTH_SECRET_KEY: &str = "BEACON_AUTH_SECRET_KEY";
const AUTH_ALLOWED_TOKENS: &str = "BEACON_AUTH_ALLOWED_TOKENS";
const LOG_LEVEL: &str = "BEACON_LOG_LEVEL";

// ============================================================================
// Sections
// ============================================================================

/// Top-level Beacon configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    /// Application identity reported by the API.
    pub app: AppSection,
    /// Listener settings.
    pub server: ServerSection,
    /// Bearer token settings.
    pub auth: AuthSection,
    /// Log filter settings.
    pub logging: LoggingSection,
}

/// Application identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Service name, used in the OpenAPI document and logs.
    pub name: String,
    /// Version string returned by `/api/version` and the status endpoint.
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: PROJECT_NAME.to_string(),
            version: "0.1.0".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Interface to bind.
    pub host: String,
    /// Port to bind. `0` picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Static bearer token settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// When false every request is treated as an anonymous client.
    pub enabled: bool,
    /// Primary accepted token. Empty disables it.
    pub secret_key: String,
    /// Additional accepted tokens.
    pub allowed_tokens: Vec<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            enabled: true,
            secret_key: String::new(),
            allowed_tokens: Vec::new(),
        }
    }
}

impl fmt::Debug for AuthSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AuthSection")
            .field("enabled", &self.enabled)
            .field("secret_key", &secret)
            .field("allowed_tokens", &self.allowed_tokens.len())
            .finish()
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl BeaconConfig {
    /// Project name used in messages and paths.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// Platform default location: `<config dir>/beacon/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolve which config file to use.
    ///
    /// Checks in order:
    /// 1. The explicit path, if given
    /// 2. `BEACON_CONFIG`
    /// 3. [`Self::default_config_path`]
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load configuration: defaults, then the resolved file if it exists,
    /// then `BEACON_*` environment variables.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    // ------------------------------------------------------------------------
    // Environment overrides
    // ------------------------------------------------------------------------

    /// Apply `BEACON_*` overrides from an iterator of `(name, value)` pairs.
    ///
    /// Unknown `BEACON_*` names are ignored. Malformed booleans or ports are
    /// reported with the variable name.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars.into_iter().filter(|(key, _)| is_beacon_var(key)) {
            match key.as_str() {
                APP_NAME => self.app.name = value,
                APP_VERSION => self.app.version = value,
                SERVER_HOST => self.server.host = value,
                SERVER_PORT => {
                    self.server.port = value.trim().parse().map_err(|_| {
                        Error::config(format!("{SERVER_PORT} must be a port number, got '{value}'"))
                    })?;
                }
                AUTH_ENABLED => self.auth.enabled = parse_bool(AUTH_ENABLED, &value)?,
                AUTH_SECRET_KEY => self.auth.secret_key = value,
                AUTH_ALLOWED_TOKENS => self.auth.allowed_tokens = split_token_list(&value),
                LOG_LEVEL => self.logging.level = value,
                _ => {}
            }
        }
        Ok(())
    }

    /// Export the configuration as `BEACON_*` variables, the inverse of
    /// [`Self::apply_env`].
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![
            (APP_NAME.to_string(), self.app.name.clone()),
            (APP_VERSION.to_string(), self.app.version.clone()),
            (SERVER_HOST.to_string(), self.server.host.clone()),
            (SERVER_PORT.to_string(), self.server.port.to_string()),
            (AUTH_ENABLED.to_string(), self.auth.enabled.to_string()),
            (AUTH_SECRET_KEY.to_string(), self.auth.secret_key.clone()),
            (
                AUTH_ALLOWED_TOKENS.to_string(),
                self.auth.allowed_tokens.join(","),
            ),
            (LOG_LEVEL.to_string(), self.logging.level.clone()),
        ])
    }
}

/// Whether `name` is in the `BEACON_*` namespace.
pub fn is_beacon_var(name: &str) -> bool {
    name.strip_prefix(ENV_PREFIX)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('_'))
}

/// Split a comma-separated token list, trimming entries and dropping empties.
pub fn split_token_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::config(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Defaults and parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_defaults() {
        let config = BeaconConfig::default();
        assert_eq!(config.app.version, "0.1.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.auth.enabled);
        assert!(config.auth.secret_key.is_empty());
        assert!(config.auth.allowed_tokens.is_empty());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BeaconConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.app.name, "beacon");
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            [app]
            version = "2.3.4"

            [auth]
            secret_key = "demo-secret"
            allowed_tokens = ["a", "b"]
        "#;
        let config = BeaconConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.app.version, "2.3.4");
        assert_eq!(config.auth.secret_key, "demo-secret");
        assert_eq!(config.auth.allowed_tokens, vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = BeaconConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = BeaconConfig::default();
        config.auth.allowed_tokens = vec!["x".to_string()];
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[server]"));
        assert_eq!(BeaconConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[app]\nversion = \"9.9.9\"\n").unwrap();

        let config = BeaconConfig::from_file(&path).unwrap();
        assert_eq!(config.app.version, "9.9.9");
    }

    #[test]
    fn test_from_file_missing() {
        let err = BeaconConfig::from_file(Path::new("/nonexistent/beacon.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let err = BeaconConfig::load(Some("/nonexistent/beacon/config.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let path = BeaconConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    // ------------------------------------------------------------------------
    // Environment overrides
    // ------------------------------------------------------------------------

    #[test]
    fn test_apply_env_overrides() {
        let mut config = BeaconConfig::default();
        config
            .apply_env(vars(&[
                ("BEACON_SERVER_PORT", "3000"),
                ("BEACON_AUTH_SECRET_KEY", "s3cret"),
                ("BEACON_AUTH_ALLOWED_TOKENS", " one, two ,,three "),
                ("BEACON_AUTH_ENABLED", "false"),
                ("BEACON_APP_VERSION", "1.0.0"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.secret_key, "s3cret");
        assert_eq!(config.auth.allowed_tokens, vec!["one", "two", "three"]);
        assert!(!config.auth.enabled);
        assert_eq!(config.app.version, "1.0.0");
    }

    #[test]
    fn test_apply_env_ignores_unrelated() {
        let mut config = BeaconConfig::default();
        config
            .apply_env(vars(&[("PATH", "/usr/bin"), ("BEACON_TOKEN", "abc")]))
            .unwrap();
        assert_eq!(config, BeaconConfig::default());
    }

    #[test]
    fn test_is_beacon_var() {
        assert!(is_beacon_var("BEACON_SERVER_PORT"));
        assert!(is_beacon_var(CONFIG_PATH_ENV));
        assert!(!is_beacon_var("BEACON"));
        assert!(!is_beacon_var("BEACON_"));
        assert!(!is_beacon_var("BEACONX_PORT"));
        assert!(!is_beacon_var("PATH"));
    }

    #[test]
    fn test_exported_vars_are_namespaced() {
        let vars = BeaconConfig::default().to_env_vars().unwrap();
        assert!(vars.iter().all(|(name, _)| is_beacon_var(name)));
    }

    #[test]
    fn test_apply_env_bad_port() {
        let mut config = BeaconConfig::default();
        let err = config
            .apply_env(vars(&[("BEACON_SERVER_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("BEACON_SERVER_PORT"));
    }

    #[test]
    fn test_apply_env_bad_bool() {
        let mut config = BeaconConfig::default();
        let err = config
            .apply_env(vars(&[("BEACON_AUTH_ENABLED", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("BEACON_AUTH_ENABLED"));
    }

    #[test]
    fn test_env_export_is_inverse_of_apply() {
        let mut original = BeaconConfig::default();
        original.auth.secret_key = "k".to_string();
        original.auth.allowed_tokens = vec!["a".to_string(), "b".to_string()];
        original.server.port = 1234;

        let mut restored = BeaconConfig {
            app: AppSection {
                name: "other".to_string(),
                version: "0.0.0".to_string(),
            },
            ..BeaconConfig::default()
        };
        restored.apply_env(original.to_env_vars().unwrap()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_split_token_list() {
        assert_eq!(split_token_list("a,b"), vec!["a", "b"]);
        assert_eq!(split_token_list(" a , , b "), vec!["a", "b"]);
        assert!(split_token_list("").is_empty());
        assert!(split_token_list(" , ").is_empty());
    }

    #[test]
    fn test_auth_debug_redacts_secret() {
        let auth = AuthSection {
            secret_key: "do-not-print".to_string(),
            ..AuthSection::default()
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("do-not-print"));
        assert!(debug.contains("redacted"));
    }
}
