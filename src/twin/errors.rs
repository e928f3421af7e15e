//! Twin error types
//!
//! Per ERRORS.md format: ORION_CATEGORY_NAME.

use thiserror::Error;

use crate::proof::ChainError;

/// Twin error type
#[derive(Debug, Error)]
pub enum TwinError {
    /// Snapshot came from a device this twin does not mirror
    #[error("ORION_TWIN_DEVICE_MISMATCH: expected snapshots from '{expected}', got '{actual}'")]
    DeviceMismatch {
        /// Configured physical_id
        expected: String,
        /// device_id carried by the rejected snapshot
        actual: String,
    },

    /// Proof chain operation failed during sync
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl TwinError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TwinError::DeviceMismatch { .. } => "ORION_TWIN_DEVICE_MISMATCH",
            TwinError::Chain(e) => e.code().code(),
        }
    }

    /// Whether the error requires process termination
    pub fn is_fatal(&self) -> bool {
        match self {
            TwinError::DeviceMismatch { .. } => false,
            TwinError::Chain(e) => e.is_fatal(),
        }
    }
}

/// Result type for twin operations
pub type TwinResult<T> = Result<T, TwinError>;
