use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors.
///
/// Non-fatal conditions travel through [`crate::Diagnostics`] instead; every
/// variant here terminates the run without producing a report.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Input path does not resolve to a readable file of the expected format.
    #[error("cannot read input file {path}: {message}")]
    FileAccess { path: PathBuf, message: String },

    /// The file was readable but is not a well-formed record table.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The operator supplied no usable replacement columns.
    #[error("no usable replacement columns were provided")]
    NoColumnsProvided,
}

pub type Result<T> = std::result::Result<T, CheckError>;
