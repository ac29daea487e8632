//! Ledger configuration loaded from TOML.

use std::path::{Path, PathBuf};

use newsproof_ledger::GenesisConfig;
use newsproof_utils::LogFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },
    #[error("invalid config: {0}")]
    Parse(String),
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

/// Settings for one ledger instance.
///
/// Every field has a default, so an empty file is a valid configuration.
/// `genesis` is only consulted when the store has not been initialized yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in mebibytes.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: u64,

    /// Log output format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter (overridden by RUST_LOG).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial roles for a fresh ledger.
    #[serde(default)]
    pub genesis: Option<GenesisConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./newsproof_data")
}

fn default_map_size_mb() -> u64 {
    1024
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LedgerConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Map size in bytes, as LMDB expects it.
    pub fn map_size_bytes(&self) -> Result<usize, ConfigError> {
        self.map_size_mb
            .checked_mul(1024 * 1024)
            .and_then(|bytes| usize::try_from(bytes).ok())
            .filter(|bytes| *bytes > 0)
            .ok_or_else(|| ConfigError::Parse(format!("map_size_mb {} is out of range", self.map_size_mb)))
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            genesis: None,
        }
    }
}
