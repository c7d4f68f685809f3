//! TOML-based configuration for wiring a gateway implementation.
//!
//! Example configuration:
//! ```toml
//! dialect = "postgres"
//! query_timeout_seconds = 30
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::sql::Dialect;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reporting configuration.
///
/// The core never enforces the timeout itself; gateway implementations
/// own deadlines and cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// SQL dialect queries are rendered for.
    pub dialect: Dialect,

    /// Per-query deadline handed to the gateway, if any.
    pub query_timeout_seconds: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            query_timeout_seconds: None,
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
