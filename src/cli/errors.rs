//! CLI-specific error types
//!
//! All CLI errors terminate the process per ERRORS.md; subsystem error
//! codes are preserved inside the message so the cause stays visible.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::twin::TwinError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Chain file already present at init
    AlreadyInitialized,
    /// Sync loop aborted
    RunFailed,
    /// Chain verification failed
    VerifyFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ORION_CLI_CONFIG_ERROR",
            Self::IoError => "ORION_CLI_IO_ERROR",
            Self::AlreadyInitialized => "ORION_CLI_ALREADY_INITIALIZED",
            Self::RunFailed => "ORION_CLI_RUN_FAILED",
            Self::VerifyFailed => "ORION_CLI_VERIFY_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Already initialized
    pub fn already_initialized(path: impl Into<String>) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Chain file already exists: {}", path.into()),
        )
    }

    /// Run failed
    pub fn run_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::RunFailed, msg)
    }

    /// Verify failed
    pub fn verify_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::VerifyFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<TelemetryError> for CliError {
    fn from(e: TelemetryError) -> Self {
        Self::run_failed(e.to_string())
    }
}

impl From<TwinError> for CliError {
    fn from(e: TwinError) -> Self {
        Self::run_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings() {
        assert_eq!(
            CliError::config_error("x").code_str(),
            "ORION_CLI_CONFIG_ERROR"
        );
        assert_eq!(
            CliError::already_initialized("./chain.log").code_str(),
            "ORION_CLI_ALREADY_INITIALIZED"
        );
    }

    #[test]
    fn test_subsystem_code_survives_conversion() {
        let config_err = ConfigError::invalid("sync_rate_hz must be > 0");
        let cli_err: CliError = config_err.into();
        assert!(format!("{}", cli_err).contains("ORION_CONFIG_INVALID"));

        let twin_err = TwinError::DeviceMismatch {
            expected: "a".into(),
            actual: "b".into(),
        };
        let cli_err: CliError = twin_err.into();
        assert!(format!("{}", cli_err).contains("ORION_TWIN_DEVICE_MISMATCH"));
    }
}
