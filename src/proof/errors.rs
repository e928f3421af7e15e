//! Proof chain error types following ERRORS.md
//!
//! Error codes:
//! - ORION_CHAIN_IO (ERROR severity)
//! - ORION_CHAIN_APPEND_FAILED (ERROR severity)
//! - ORION_CHAIN_FSYNC_FAILED (FATAL severity)
//! - ORION_CHAIN_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for chain errors as defined in ERRORS.md
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, process continues
    Error,
    /// oriontwin must terminate
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Chain-specific error codes as defined in ERRORS.md
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainErrorCode {
    /// Chain file could not be read or opened
    OrionChainIo,
    /// Proof record write failed
    OrionChainAppendFailed,
    /// fsync after append failed
    OrionChainFsyncFailed,
    /// Hash or linkage verification failed
    OrionChainCorruption,
}

impl ChainErrorCode {
    /// Returns the string code as defined in ERRORS.md
    pub fn code(&self) -> &'static str {
        match self {
            ChainErrorCode::OrionChainIo => "ORION_CHAIN_IO",
            ChainErrorCode::OrionChainAppendFailed => "ORION_CHAIN_APPEND_FAILED",
            ChainErrorCode::OrionChainFsyncFailed => "ORION_CHAIN_FSYNC_FAILED",
            ChainErrorCode::OrionChainCorruption => "ORION_CHAIN_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ChainErrorCode::OrionChainIo => Severity::Error,
            ChainErrorCode::OrionChainAppendFailed => Severity::Error,
            ChainErrorCode::OrionChainFsyncFailed => Severity::Fatal,
            ChainErrorCode::OrionChainCorruption => Severity::Fatal,
        }
    }
}

impl fmt::Display for ChainErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Chain error type with full context as required by ERRORS.md
#[derive(Debug)]
pub struct ChainError {
    /// Error code
    code: ChainErrorCode,
    /// Human-readable message
    message: String,
    /// Optional details about the error context
    details: Option<String>,
    /// Underlying IO error if applicable
    source: Option<io::Error>,
}

impl ChainError {
    /// Create a chain IO error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: ChainErrorCode::OrionChainIo,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create an append failed error
    pub fn append_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: ChainErrorCode::OrionChainAppendFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create an fsync failed error
    pub fn fsync_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: ChainErrorCode::OrionChainFsyncFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Create a corruption error
    pub fn corruption(message: impl Into<String>) -> Self {
        Self {
            code: ChainErrorCode::OrionChainCorruption,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a corruption error with sequence number context
    pub fn corruption_at_sequence(sequence: u64, reason: impl Into<String>) -> Self {
        Self {
            code: ChainErrorCode::OrionChainCorruption,
            message: reason.into(),
            details: Some(format!("sequence: {}", sequence)),
            source: None,
        }
    }

    /// Create a corruption error with line number context
    pub fn corruption_at_line(line: u64, reason: impl Into<String>) -> Self {
        Self {
            code: ChainErrorCode::OrionChainCorruption,
            message: reason.into(),
            details: Some(format!("line: {}", line)),
            source: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ChainErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error is fatal (requires process termination)
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for chain operations
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ChainErrorCode::OrionChainIo.code(), "ORION_CHAIN_IO");
        assert_eq!(
            ChainErrorCode::OrionChainAppendFailed.code(),
            "ORION_CHAIN_APPEND_FAILED"
        );
        assert_eq!(
            ChainErrorCode::OrionChainFsyncFailed.code(),
            "ORION_CHAIN_FSYNC_FAILED"
        );
        assert_eq!(
            ChainErrorCode::OrionChainCorruption.code(),
            "ORION_CHAIN_CORRUPTION"
        );
    }

    #[test]
    fn test_fsync_and_corruption_are_fatal() {
        let fsync = ChainError::fsync_failed(
            "fsync failed",
            io::Error::new(io::ErrorKind::Other, "disk error"),
        );
        assert!(fsync.is_fatal());

        let corruption = ChainError::corruption("hash mismatch");
        assert!(corruption.is_fatal());
    }

    #[test]
    fn test_append_and_io_are_not_fatal() {
        let append = ChainError::append_failed(
            "write failed",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(!append.is_fatal());

        let io_err =
            ChainError::io_error("open failed", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(!io_err.is_fatal());
    }

    #[test]
    fn test_display_contains_required_fields() {
        let err = ChainError::corruption_at_sequence(42, "hash mismatch");
        let display = format!("{}", err);
        assert!(display.contains("ORION_CHAIN_CORRUPTION"));
        assert!(display.contains("FATAL"));
        assert!(display.contains("hash mismatch"));
        assert!(display.contains("sequence: 42"));
    }
}
