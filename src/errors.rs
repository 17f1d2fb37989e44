/*!
 * Error types for the gamloc application.
 *
 * This module contains custom error types for the two phases of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading translated record lists
#[derive(Error, Debug)]
pub enum RecordError {
    /// Error reading or writing a record file
    #[error("Record file I/O failed for {path:?}: {source}")]
    Io {
        /// Record file being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The record file does not decode under the target encoding
    #[error("Not matched with the target {encoding} for {path:?}")]
    EncodingMismatch {
        /// Record file that failed to decode
        path: PathBuf,
        /// Target encoding label
        encoding: String,
    },

    /// The one-shot repair did not produce a decodable file
    #[error("Encoding error loading {path:?} (backup kept at {backup:?}), please check if the file encoding is correct")]
    RepairFailed {
        /// Record file that could not be repaired
        path: PathBuf,
        /// Backup copy taken before the repair
        backup: PathBuf,
    },

    /// The record file is not a valid record list
    #[error("Failed to parse record file {path:?}: {source}")]
    Parse {
        /// Record file that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while substituting translations into one file
#[derive(Error, Debug)]
pub enum SubstitutionError {
    /// The input file does not decode under the target encoding
    #[error("Failed to decode {path:?} as {encoding}")]
    Decode {
        /// File being read
        path: PathBuf,
        /// Encoding label used
        encoding: String,
    },

    /// The substituted content cannot be represented in the target encoding
    #[error("Failed to encode output for {path:?} as {encoding}")]
    Encode {
        /// File being written
        path: PathBuf,
        /// Encoding label used
        encoding: String,
    },

    /// File read or write failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from record loading
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Error from substitution
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
