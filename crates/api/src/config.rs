//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown ORDER_STORE value {0:?} (expected \"file\" or \"memory\")")]
    UnknownStore(String),
}

/// Which order store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Flat JSON file at `Config::data_path`.
    File,
    /// Process-local store seeded with the demo orders.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `ORDER_STORE`: `"file"` or `"memory"` (default: `"file"`)
/// - `DATA_PATH`: JSON data file (default: `"resources/demo_data.json"`)
/// - `CORS_ORIGIN`: origin allowed to call the API (default: `"http://localhost:45000"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub store: StoreBackend,
    pub data_path: PathBuf,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let store = match lookup("ORDER_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            store,
            data_path: lookup("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            store: StoreBackend::File,
            data_path: PathBuf::from("resources/demo_data.json"),
            cors_origin: "http://localhost:45000".to_string(),
        }
    }
}
