//! Telemetry error types
//!
//! Per ERRORS.md format: ORION_CATEGORY_NAME. Telemetry errors abort the
//! current run; a corrupt input stream is never silently skipped.

use std::io;

use thiserror::Error;

/// Telemetry error type
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Input source could not be read
    #[error("ORION_TELEMETRY_IO: failed to read {path}: {source}")]
    Io {
        /// Input path ("-" for stdin)
        path: String,
        #[source]
        source: io::Error,
    },

    /// A snapshot line failed to parse
    #[error("ORION_TELEMETRY_PARSE: invalid snapshot at line {line}: {source}")]
    Parse {
        /// 1-based line number in the input stream
        line: u64,
        #[source]
        source: serde_json::Error,
    },
}

impl TelemetryError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TelemetryError::Io { .. } => "ORION_TELEMETRY_IO",
            TelemetryError::Parse { .. } => "ORION_TELEMETRY_PARSE",
        }
    }
}

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;
