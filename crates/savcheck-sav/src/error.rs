//! Error types for .sav file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing .sav files.
#[derive(Debug, Error)]
pub enum SavError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid .sav file structure.
    #[error("invalid sav file: {message}")]
    InvalidFormat { message: String },

    /// Well-formed but outside the supported subset (compression, byte order).
    #[error("unsupported sav feature: {message}")]
    Unsupported { message: String },

    /// Invalid variable record in the dictionary.
    #[error("invalid variable record at index {index}: {message}")]
    InvalidVariable { index: usize, message: String },

    /// Dataset rejected by writer validation.
    #[error("invalid dataset: {message}")]
    InvalidDataset { message: String },
}

impl SavError {
    /// Create an `InvalidFormat` error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an `Unsupported` error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create an `InvalidDataset` error.
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset {
            message: message.into(),
        }
    }
}

/// Result type for .sav operations.
pub type Result<T> = std::result::Result<T, SavError>;
