//! Library configuration
//!
//! Configuration comes from two places: the JSON object handed to
//! [`crate::bridge::setup`] by the UI layer, and environment variables
//! (optionally loaded from a `.env` file). Explicit JSON values win over the
//! environment, which wins over the built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{PromptLibError, Result};
use crate::logging::LogFormat;

const ENV_DB_PATH: &str = "PROMPTLIB_DB_PATH";
const ENV_MAX_CONNECTIONS: &str = "PROMPTLIB_MAX_CONNECTIONS";
const ENV_LOG: &str = "PROMPTLIB_LOG";
const ENV_LOG_FORMAT: &str = "PROMPTLIB_LOG_FORMAT";

/// Runtime configuration for a prompt library instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// SQLite database file
    pub database_path:   PathBuf,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level:       String,
    pub log_format:      LogFormat,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            database_path:   default_database_path(),
            max_connections: 5,
            log_level:       "info".to_string(),
            log_format:      LogFormat::Pretty,
        }
    }
}

impl LibraryConfig {
    /// Build a configuration from the environment
    ///
    /// Loads `.env` if present, then reads the `PROMPTLIB_*` variables.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::default().with_env_overrides()
    }

    /// Build a configuration from a JSON object, filling gaps from the environment
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let explicit = match &value {
            serde_json::Value::Object(map) => map.clone(),
            serde_json::Value::Null => serde_json::Map::new(),
            _ => {
                return Err(PromptLibError::ConfigError(
                    "setup expects a configuration object".to_string(),
                ))
            },
        };

        let mut merged = serde_json::to_value(Self::from_env()?)?;
        if let serde_json::Value::Object(base) = &mut merged {
            for (key, val) in explicit {
                base.insert(key, val);
            }
        }

        serde_json::from_value(merged)
            .map_err(|e| PromptLibError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(path) = std::env::var(ENV_DB_PATH) {
            if !path.trim().is_empty() {
                self.database_path = PathBuf::from(path);
            }
        }

        if let Ok(raw) = std::env::var(ENV_MAX_CONNECTIONS) {
            self.max_connections = parse_max_connections(&raw)?;
        }

        if let Ok(level) = std::env::var(ENV_LOG) {
            self.log_level = level;
        }

        if let Ok(format) = std::env::var(ENV_LOG_FORMAT) {
            self.log_format = format.parse()?;
        }

        Ok(self)
    }
}

fn parse_max_connections(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PromptLibError::ConfigError(format!(
            "{} must be a positive integer, got '{}'",
            ENV_MAX_CONNECTIONS, raw
        ))),
    }
}

/// Default database location (`<data dir>/promptlib/prompts.db`)
///
/// Falls back to the working directory when the platform has no data dir.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptlib")
        .join("prompts.db")
}
