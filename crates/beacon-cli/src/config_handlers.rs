//! Handlers for `beacon config` subcommands.
//!
//! Values are addressed by dotted keys matching the TOML layout, e.g.
//! `server.port` or `auth.allowed_tokens`.

use std::path::{Path, PathBuf};

use beacon_core::{BeaconConfig, Error, Result};

use crate::cli::ConfigAction;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = cmd_config_path(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "(file does not exist, run `{} config init` to create it)",
                    BeaconConfig::project_name()
                );
            }
        }
        ConfigAction::Get { key } => println!("{}", cmd_config_get(config_path, key)?),
        ConfigAction::Set { key, value } => {
            let path = cmd_config_set(config_path, key, value)?;
            println!("Set {key} = {value} in {}", path.display());
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref().or(config_path), *force)?;
            println!("Config file created at {}", path.display());
        }
        ConfigAction::Export { docker_env } => {
            let config = BeaconConfig::load(config_path)?;
            for line in cmd_config_export(&config, *docker_env)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Command handlers
// ============================================================================

/// Resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<PathBuf> {
    BeaconConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Value at a dotted key of the effective configuration, formatted for display.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = BeaconConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a dotted key in the config file and return the file path.
///
/// The edited document must still parse as a [`BeaconConfig`]; otherwise the
/// file is left untouched.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<PathBuf> {
    let path = cmd_config_path(config_path)?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            BeaconConfig::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    let defaults = toml::Value::try_from(BeaconConfig::default())
        .map_err(|e| Error::config(e.to_string()))?;
    let current = get_nested_value(&doc, key).or_else(|| get_nested_value(&defaults, key));
    let new_value = coerce_value(current, value);
    set_nested_value(&mut doc, key, new_value)?;

    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    BeaconConfig::from_toml_str(&rendered)
        .map_err(|e| Error::config(format!("Refusing to set {key} = {value}: {e}")))?;
    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Write a default config file and return its path.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => BeaconConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    write_default(&path)?;
    Ok(path)
}

fn write_default(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    let toml_str = BeaconConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

/// Configuration as `KEY=VALUE` lines, or `--env KEY=VALUE` for `docker run`.
pub fn cmd_config_export(config: &BeaconConfig, docker_env: bool) -> Result<Vec<String>> {
    let lines = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    if key.is_empty() || key.split('.').any(str::is_empty) {
        return Err(Error::config(format!("Invalid key '{key}'")));
    }

    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Convert a command-line value to the TOML type of the value it replaces.
///
/// Strings stay strings and arrays take a comma-separated list (a single
/// entry becomes a one-element array). Other or unknown targets fall back
/// to [`parse_value`].
pub fn coerce_value(current: Option<&toml::Value>, raw: &str) -> toml::Value {
    match current {
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        Some(toml::Value::Array(_)) => toml::Value::Array(
            beacon_core::config::split_token_list(raw)
                .into_iter()
                .map(toml::Value::String)
                .collect(),
        ),
        _ => parse_value(raw),
    }
}

/// Parse a command-line value into TOML: bool, then integer, then float,
/// then a comma-separated list when it contains a comma, else a string.
pub fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    if s.contains(',') {
        return toml::Value::Array(
            beacon_core::config::split_token_list(s)
                .into_iter()
                .map(toml::Value::String)
                .collect(),
        );
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(format_toml_value)
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_file(dir: &TempDir) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, BeaconConfig::default().to_toml_string().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    // ------------------------------------------------------------------------
    // path / get
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_path_explicit() {
        let path = cmd_config_path(Some("/explicit/config.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/config.toml"));
    }

    #[test]
    fn test_cmd_config_get_nested_key() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let port = cmd_config_get(Some(&path), "server.port").unwrap();
        assert_eq!(port, BeaconConfig::default().server.port.to_string());
    }

    #[test]
    fn test_cmd_config_get_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let err = cmd_config_get(Some(&path), "server.nonexistent").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_cmd_config_get_missing_explicit_file() {
        let err = cmd_config_get(Some("/nonexistent/beacon.toml"), "server.port").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    // ------------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_set_port() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        cmd_config_set(Some(&path), "server.port", "9191").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.server.port, 9191);
    }

    #[test]
    fn test_cmd_config_set_token_list() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        cmd_config_set(Some(&path), "auth.allowed_tokens", "ci, dashboard").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.auth.allowed_tokens, vec!["ci", "dashboard"]);
    }

    #[test]
    fn test_cmd_config_set_single_allowed_token() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        cmd_config_set(Some(&path), "auth.allowed_tokens", "ci-token").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.auth.allowed_tokens, vec!["ci-token"]);
    }

    #[test]
    fn test_cmd_config_set_secret_with_comma() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        cmd_config_set(Some(&path), "auth.secret_key", "ab,cd").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.auth.secret_key, "ab,cd");
    }

    #[test]
    fn test_cmd_config_set_numeric_version() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);

        cmd_config_set(Some(&path), "app.version", "2").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.app.version, "2");
    }

    #[test]
    fn test_cmd_config_set_key_absent_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let path = path.to_str().unwrap().to_string();

        cmd_config_set(Some(&path), "app.version", "3").unwrap();

        let config = BeaconConfig::from_file(Path::new(&path)).unwrap();
        assert_eq!(config.app.version, "3");
    }

    #[test]
    fn test_cmd_config_set_rejects_wrong_type() {
        let dir = TempDir::new().unwrap();
        let path = config_file(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let err = cmd_config_set(Some(&path), "server.port", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("Refusing"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_cmd_config_set_missing_file() {
        let err = cmd_config_set(Some("/nonexistent/config.toml"), "server.port", "1").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // init
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("beacon").join("config.toml");

        cmd_config_init(Some(path.to_str().unwrap()), false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("[auth]"));
        assert_eq!(
            BeaconConfig::from_toml_str(&content).unwrap(),
            BeaconConfig::default()
        );
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "existing").unwrap();

        let err = cmd_config_init(Some(path.to_str().unwrap()), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_config_init(Some(path.to_str().unwrap()), true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
    }

    // ------------------------------------------------------------------------
    // export
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_export_plain() {
        let lines = cmd_config_export(&BeaconConfig::default(), false).unwrap();
        assert!(lines.iter().any(|l| l.starts_with("BEACON_SERVER_PORT=")));
        assert!(lines.iter().all(|l| !l.starts_with("--env")));
    }

    #[test]
    fn test_cmd_config_export_docker_env() {
        let lines = cmd_config_export(&BeaconConfig::default(), true).unwrap();
        assert!(lines.iter().all(|l| l.starts_with("--env BEACON_")));
    }

    // ------------------------------------------------------------------------
    // dotted-key helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::from_str("[server]\nport = 3000").unwrap();
        assert_eq!(
            get_nested_value(&val, "server.port"),
            Some(&toml::Value::Integer(3000))
        );
        assert!(get_nested_value(&val, "server.host").is_none());
        assert!(get_nested_value(&val, "server.port.deeper").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_section() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "auth.enabled", toml::Value::Boolean(false)).unwrap();
        assert_eq!(
            get_nested_value(&val, "auth.enabled"),
            Some(&toml::Value::Boolean(false))
        );
    }

    #[test]
    fn test_set_nested_value_top_level() {
        let mut val: toml::Value = toml::from_str("port = 8080").unwrap();
        set_nested_value(&mut val, "port", toml::Value::Integer(9090)).unwrap();
        assert_eq!(get_nested_value(&val, "port"), Some(&toml::Value::Integer(9090)));
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut val: toml::Value = toml::from_str("port = 8080").unwrap();
        assert!(set_nested_value(&mut val, "port.inner", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_set_nested_value_rejects_empty_segments() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        assert!(set_nested_value(&mut val, "", toml::Value::Integer(1)).is_err());
        assert!(set_nested_value(&mut val, "server..port", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(parse_value("info"), toml::Value::String("info".to_string()));
        assert_eq!(
            parse_value("a,b"),
            toml::Value::Array(vec![
                toml::Value::String("a".to_string()),
                toml::Value::String("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_coerce_value_follows_target_type() {
        let string = toml::Value::String("x".into());
        let array = toml::Value::Array(vec![]);
        let int = toml::Value::Integer(1);

        assert_eq!(coerce_value(Some(&string), "42"), toml::Value::String("42".into()));
        assert_eq!(coerce_value(Some(&string), "a,b"), toml::Value::String("a,b".into()));
        assert_eq!(
            coerce_value(Some(&array), "solo"),
            toml::Value::Array(vec![toml::Value::String("solo".into())])
        );
        assert_eq!(coerce_value(Some(&int), "7"), toml::Value::Integer(7));
        assert_eq!(coerce_value(None, "true"), toml::Value::Boolean(true));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("x".into())), "x");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
        assert_eq!(format_toml_value(&parse_value("a, b")), "a,b");
    }
}
