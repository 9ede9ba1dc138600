//! Core error types for mindbloom-core.
//!
//! Nothing in the check-in or breathing paths surfaces these to callers as
//! fatal: storage failures are logged and the in-memory state stays
//! authoritative. They exist for the storage and configuration layers and
//! for the CLI, whose commands all return [`Result`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindbloom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Entry storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Timer driver used outside an async runtime
    #[error("No tokio runtime available to drive the breathing timer")]
    NoRuntime,
}

/// Entry storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No home directory to place the data directory under
    #[error("Cannot determine data directory; set MINDBLOOM_DATA_DIR")]
    NoDataDir,

    /// Failed to read the entries file
    #[error("Failed to read entries from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the entries file
    #[error("Failed to write entries to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entries file exists but does not decode
    #[error("Corrupt entries file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Mood value outside the 1..=5 scale
    #[error("Mood value {0} is outside the 1-5 scale")]
    MoodOutOfRange(i64),

    /// Unknown wellness factor tag
    #[error("Unknown wellness factor: {0}")]
    UnknownFactor(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
