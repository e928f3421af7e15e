//! Configuration validation per CONFIG.md
//!
//! Rules:
//! - twin.name and twin.physical_id are non-empty
//! - sync_rate_hz and measurement_rate_hz are finite and positive
//! - measurement_rate_hz must not exceed sync_rate_hz
//! - theory tags must be unique
//! - indicator weights are finite and non-negative; the effective weight
//!   sum (omitted indicators weigh 1.0) must be positive
//! - indicator sources are non-empty
//! - proof_chain.algorithm must be "sha256"
//! - file storage requires a path

use std::collections::BTreeSet;

use super::errors::{ConfigError, ConfigResult};
use super::types::{Config, StorageMode};

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.twin.name.trim().is_empty() {
            return Err(ConfigError::invalid("twin.name must be non-empty"));
        }
        if self.twin.physical_id.trim().is_empty() {
            return Err(ConfigError::invalid("twin.physical_id must be non-empty"));
        }

        validate_rate("twin.sync_rate_hz", self.twin.sync_rate_hz)?;
        validate_rate(
            "consciousness.measurement_rate_hz",
            self.consciousness.measurement_rate_hz,
        )?;

        if self.consciousness.measurement_rate_hz > self.twin.sync_rate_hz {
            return Err(ConfigError::invalid(format!(
                "measurement_rate_hz ({}) must not exceed sync_rate_hz ({})",
                self.consciousness.measurement_rate_hz, self.twin.sync_rate_hz
            )));
        }

        let mut seen = BTreeSet::new();
        for theory in &self.consciousness.theories {
            if !seen.insert(*theory) {
                return Err(ConfigError::invalid(format!(
                    "Duplicate theory tag: {}",
                    theory
                )));
            }
        }

        for (kind, spec) in &self.consciousness.indicators {
            if spec.source.trim().is_empty() {
                return Err(ConfigError::invalid(format!(
                    "Indicator '{}' has an empty source label",
                    kind.as_str()
                )));
            }
            if !spec.weight.is_finite() || spec.weight < 0.0 {
                return Err(ConfigError::invalid(format!(
                    "Indicator '{}' weight must be finite and >= 0, got {}",
                    kind.as_str(),
                    spec.weight
                )));
            }
        }

        let weight_sum: f64 = self.indicator_weights().values().sum();
        if weight_sum <= 0.0 {
            return Err(ConfigError::invalid(
                "At least one indicator weight must be > 0",
            ));
        }

        if self.proof_chain.algorithm != "sha256" {
            return Err(ConfigError::invalid(format!(
                "Invalid proof_chain.algorithm: '{}'. Only 'sha256' is allowed.",
                self.proof_chain.algorithm
            )));
        }

        if self.proof_chain.storage == StorageMode::File && self.proof_chain.path.is_none() {
            return Err(ConfigError::invalid(
                "proof_chain.storage = file requires proof_chain.path",
            ));
        }

        Ok(())
    }
}

fn validate_rate(name: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(format!(
            "{} must be finite and > 0, got {}",
            name, value
        )));
    }
    Ok(())
}
