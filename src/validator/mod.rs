//! Validation backends.
//!
//! Two interchangeable implementations of [`SchemaValidator`]:
//!
//! - [`FullFeaturedValidator`]: Draft-7 JSON Schema through the `jsonschema`
//!   crate (cargo feature `full-validator`).
//! - [`MinimalValidator`]: a hand-written checker for `required`, `type`,
//!   `enum`, `minimum`/`maximum` and `pattern`.
//!
//! The backend is picked once by [`select_backend`] when an
//! [`ArgumentValidator`](crate::ArgumentValidator) is built, never per call.

mod full;
mod minimal;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::Result;

pub use full::FullFeaturedValidator;
pub use minimal::MinimalValidator;

/// Placeholder path for violations at the top level of the arguments.
pub const ROOT_PATH: &str = "<root>";

/// A validation backend.
///
/// Implementations return one human-readable string per violation; an empty
/// vector means the arguments are valid. `Err` is reserved for conditions
/// that prevent validation from running (e.g. an uncompilable `pattern`).
pub trait SchemaValidator: Send + Sync + fmt::Debug {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Validate `args` against the (already extracted) `schema`.
    fn validate(&self, args: &Map<String, Value>, schema: &Value) -> Result<Vec<String>>;
}

/// Identifies a concrete backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Draft-7 engine
    Full,
    /// Hand-written fallback
    Minimal,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Minimal => f.write_str("minimal"),
        }
    }
}

/// Which backend to use.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Full backend when compiled in, minimal otherwise
    #[default]
    Auto,
    /// Full backend or an error
    Full,
    /// Always the minimal backend
    Minimal,
}

/// Options shared by both backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendOptions {
    /// Accept keys that are not declared under `properties`.
    pub allow_additional_properties: bool,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            allow_additional_properties: true,
        }
    }
}

/// Build the backend for `preference`.
///
/// `Auto` probes the full backend and falls back to the minimal one when it
/// reports [`Error::BackendUnavailable`](crate::Error::BackendUnavailable);
/// `Full` returns that error instead.
pub fn select_backend(
    preference: BackendPreference,
    options: BackendOptions,
) -> Result<Box<dyn SchemaValidator>> {
    match preference {
        BackendPreference::Minimal => Ok(Box::new(MinimalValidator::new(options))),
        BackendPreference::Full => Ok(Box::new(FullFeaturedValidator::probe(options)?)),
        BackendPreference::Auto => match FullFeaturedValidator::probe(options) {
            Ok(full) => Ok(Box::new(full)),
            Err(e) if e.is_backend_unavailable() => {
                info!(reason = %e, "Falling back to minimal validator");
                Ok(Box::new(MinimalValidator::new(options)))
            }
            Err(e) => Err(e),
        },
    }
}

/// Render a value the way error messages quote it: compact JSON.
pub(crate) fn render(value: &Value) -> String {
    value.to_string()
}
