//! Centralized error handling for RuGeoid
//!
//! This module provides structured error types for model reading and
//! polynomial evaluation, so callers can tell a bad filename from a missing
//! header keyword or an unparseable data line.

use thiserror::Error;

/// Main error type for RuGeoid operations
#[derive(Debug, Error)]
pub enum GeoidError {
    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A format trigger matched but the filename could not be decomposed
    #[error("Filename '{file_name}' does not match the {format} naming pattern")]
    FilenamePattern { format: String, file_name: String },

    /// Header keyword needed but absent from the file
    #[error("Header keyword '{key}' not found in model file")]
    MissingHeader { key: String },

    /// Numeric field that failed to parse
    #[error("Line {line}: invalid {field} value '{value}'")]
    Parse {
        line: usize,
        field: String,
        value: String,
    },

    /// Line with fewer fields than the format requires
    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    MalformedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Date embedded in a filename that is not a calendar date
    #[error("Invalid date '{value}' in filename")]
    InvalidDate { value: String },

    /// Tide system name not recognized
    #[error("Unknown tide system '{0}' (expected tide_free, mean_tide or zero_tide)")]
    UnknownTideSystem(String),

    /// Reference ellipsoid name not recognized
    #[error("Unknown reference ellipsoid '{0}'")]
    UnknownEllipsoid(String),

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Generic error
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for RuGeoid operations
pub type Result<T> = std::result::Result<T, GeoidError>;
