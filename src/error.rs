//! Error types for the argument validator

use std::io;

use thiserror::Error;

/// Result type alias for the argument validator
pub type Result<T> = std::result::Result<T, Error>;

/// Operational errors.
///
/// Validation *failures* are not errors: they are reported as strings in
/// [`ValidationResult::errors`](crate::ValidationResult::errors). This enum
/// covers the conditions that stop a validation from running at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested validation backend is not compiled in
    #[error("Validation backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The full-featured backend rejected the schema itself
    #[error("Schema compilation failed: {0}")]
    SchemaCompile(String),

    /// A `pattern` keyword holds a regex the engine cannot compile
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Regex engine error
        #[source]
        source: regex::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether this error is the "backend not available" condition used for
    /// fallback selection.
    #[must_use]
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_))
    }
}
