// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOG_FILE_SHORTNAME: &str = "job_logger";
pub const LOG_FILE_EXT: &str = "csv";
pub const LOG_FILE_NAME: &str = "job_logger.csv";

/// User-facing settings of the job logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Whether job events are recorded at all.
    pub log_enabled: bool,
    /// The log rotates once it is strictly larger than this.
    pub max_log_file_size_mb: f64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { log_enabled: false, max_log_file_size_mb: jl_storage::DEFAULT_MAX_SIZE_MB }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Max log file size must be a decimal number, greater than zero (got {0})")]
    InvalidMaxSize(f64),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_max_size(self.max_log_file_size_mb)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    /// The CSV log inside `dir`.
    pub fn log_file_in(dir: &Path) -> PathBuf {
        dir.join(LOG_FILE_NAME)
    }
}

pub fn validate_max_size(max_log_file_size_mb: f64) -> Result<(), ConfigError> {
    if max_log_file_size_mb.is_finite() && max_log_file_size_mb > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMaxSize(max_log_file_size_mb))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
