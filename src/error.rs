//! Error types for pycheck operations.
//!
//! This module defines [`PycheckError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Environment problems (a module that won't import, unreadable metadata,
//!   a broken TLS setup) are *data*, reported through check outcomes and
//!   capability results, never through this type
//! - `PycheckError` covers usage errors (an unknown scope) and setup errors
//!   (no interpreter, malformed config) that stop the tool from running
//! - Use `anyhow::Error` (via `PycheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pycheck operations.
#[derive(Debug, Error)]
pub enum PycheckError {
    /// A scope token or value that no check knows how to evaluate.
    #[error("Unknown scope: {scope:?}. Use \"OS\" or \"ALL\".")]
    InvalidScope { scope: String },

    /// No Python interpreter could be located.
    #[error("Python interpreter not found (searched: {searched})")]
    InterpreterNotFound { searched: String },

    /// The interpreter was found but could not answer a query.
    #[error("Python interpreter failed: {message}")]
    InterpreterFailed { message: String },

    /// Candidate discovery could not read its source.
    #[error("Discovery failed: {message}")]
    Discovery { message: String },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pycheck operations.
pub type Result<T> = std::result::Result<T, PycheckError>;
