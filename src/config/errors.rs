//! Configuration error types
//!
//! Per ERRORS.md format: ORION_CATEGORY_NAME. All configuration errors are
//! fatal at boot — a twin never starts with a partially valid config.

use std::io;

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("ORION_CONFIG_IO: failed to read {path}: {source}")]
    Io {
        /// Path to the config file
        path: String,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid YAML or has the wrong shape
    #[error("ORION_CONFIG_PARSE: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Config parsed but violates a validation rule
    #[error("ORION_CONFIG_INVALID: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create a validation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::Invalid(msg.into())
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "ORION_CONFIG_IO",
            ConfigError::Parse(_) => "ORION_CONFIG_PARSE",
            ConfigError::Invalid(_) => "ORION_CONFIG_INVALID",
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
