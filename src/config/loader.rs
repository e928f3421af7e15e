//! Configuration loading
//!
//! Loading always validates: a `Config` obtained through this module
//! satisfies every rule in CONFIG.md.

use std::fs;
use std::path::Path;

use super::errors::{ConfigError, ConfigResult};
use super::types::Config;

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}
