// src/error.rs

//! Unified error handling for the catalog reconciler.
//!
//! Only the I/O layer produces errors; the reconciliation core is total.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input snapshot does not exist
    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    /// Input snapshot is not a JSON array of item objects
    #[error("Malformed input in {path}: {message}")]
    MalformedInput { path: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a missing-input error for a path.
    pub fn missing_input(path: impl AsRef<Path>) -> Self {
        Self::MissingInput {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a malformed-input error for a path.
    pub fn malformed_input(path: impl AsRef<Path>, message: impl fmt::Display) -> Self {
        Self::MalformedInput {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
