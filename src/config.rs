//! Server configuration module.
//!
//! Handles loading, validating, and merging `lensify.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change, and
//! command-line flags (`--bind`, `--port`) are merged on top of that.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! bind = "127.0.0.1"        # Address the HTTP API listens on
//! port = 8787
//!
//! [cors]
//! allowed_origins = ["*"]
//! allowed_methods = ["GET", "HEAD", "OPTIONS"]
//! allowed_headers = ["Content-Type"]
//! max_age_seconds = 0       # 0 = no Access-Control-Max-Age header
//!
//! [logging]
//! level = "info"            # trace | debug | info | warn | error
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lensify.toml";

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration loaded from `lensify.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensifyConfig {
    /// Listen address for `lensify serve`.
    pub server: ServerConfig,
    /// Cross-origin settings applied to every API response.
    pub cors: CorsConfig,
    /// Log filter used when `RUST_LOG` is unset.
    pub logging: LoggingConfig,
}

impl LensifyConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        if self.server.bind.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind is not an IP address: {}",
                self.server.bind
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        for method in &self.cors.allowed_methods {
            if method != "*" && method.parse::<axum::http::Method>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_methods has an invalid method: {method}"
                )));
            }
        }
        Ok(())
    }
}

/// HTTP listen address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

impl ServerConfig {
    /// `bind:port` as a socket address string.
    pub fn address(&self) -> String {
        match self.bind.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => format!("[{}]:{}", self.bind, self.port),
            _ => format!("{}:{}", self.bind, self.port),
        }
    }
}

/// Cross-origin resource sharing settings.
///
/// `"*"` in any list means "any".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime; 0 leaves the header out.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "HEAD".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LensifyConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    read_config_file(path).map(Some)
}

/// Read a config file that must exist.
pub fn read_config_file(path: &Path) -> Result<toml::Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge each overlay onto `base` in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<LensifyConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: LensifyConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Command-line overrides for the `[server]` table.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl ServerOverrides {
    /// The overrides as a sparse TOML table, `None` if nothing was given.
    pub fn to_value(&self) -> Option<toml::Value> {
        let mut server = toml::map::Map::new();
        if let Some(bind) = &self.bind {
            server.insert("bind".into(), toml::Value::String(bind.clone()));
        }
        if let Some(port) = self.port {
            server.insert("port".into(), toml::Value::Integer(i64::from(port)));
        }
        if server.is_empty() {
            return None;
        }
        let mut root = toml::map::Map::new();
        root.insert("server".into(), toml::Value::Table(server));
        Some(toml::Value::Table(root))
    }
}

/// Load config, then apply command-line overrides.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
/// read when present and stock defaults are used otherwise.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ServerOverrides,
) -> Result<LensifyConfig, ConfigError> {
    let base = stock_defaults_value();
    let file = match path {
        Some(path) => Some(read_config_file(path)?),
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    resolve_config(base, file.into_iter().chain(overrides.to_value()))
}

/// Returns a fully-commented stock `lensify.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Lensify Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# HTTP server (lensify serve)
# ---------------------------------------------------------------------------
[server]
# Address to listen on. Use "0.0.0.0" to accept connections from other hosts.
bind = "127.0.0.1"

# TCP port. Overridden by --port.
port = 8787

# ---------------------------------------------------------------------------
# Cross-origin requests
# ---------------------------------------------------------------------------
[cors]
# Origins allowed to call the API. "*" allows any origin.
allowed_origins = ["*"]

# Methods allowed in cross-origin requests. "*" allows any method.
allowed_methods = ["GET", "HEAD", "OPTIONS"]

# Request headers allowed in cross-origin requests.
allowed_headers = ["Content-Type"]

# How long browsers may cache a preflight response, in seconds.
# 0 leaves the Access-Control-Max-Age header out.
max_age_seconds = 0

# ---------------------------------------------------------------------------
# Logging
# ---------------------------------------------------------------------------
[logging]
# One of: trace, debug, info, warn, error. RUST_LOG takes precedence.
level = "info"
"##
}
