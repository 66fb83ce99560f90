//! Error types for Mens Core
//!
//! Failures raised while encoding consensus objects or decoding compact values.

use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Mens Core errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Compact target encodes a negative or overflowing value
    #[error("Invalid compact target {bits:#010x}: {reason}")]
    InvalidCompact {
        /// The offending compact encoding
        bits: u32,
        /// Why the encoding was rejected
        reason: &'static str,
    },

    /// Hex string could not be parsed into a digest
    #[error("Invalid hex digest: {0}")]
    Hex(String),

    /// Consensus serialization failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::io::Error),

    /// Scrypt parameters or output length rejected
    #[error("Scrypt error: {0}")]
    Scrypt(String),
}

impl Error {
    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidCompact { .. } => ErrorCategory::Target,
            Error::Hex(_) | Error::Encoding(_) => ErrorCategory::Encoding,
            Error::Scrypt(_) => ErrorCategory::Hashing,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Difficulty target errors
    Target,
    /// Serialization errors
    Encoding,
    /// Hash primitive errors
    Hashing,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Target => write!(f, "Target"),
            ErrorCategory::Encoding => write!(f, "Encoding"),
            ErrorCategory::Hashing => write!(f, "Hashing"),
        }
    }
}
