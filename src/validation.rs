//! Tool-call argument validation: the pipeline and its result type.
//!
//! ```text
//! arguments ──▶ extract schema ──▶ coerce (optional) ──▶ backend ──▶ ValidationResult
//! ```
//!
//! No schema means no validation: the arguments come back unchanged and
//! the call is accepted. Otherwise the arguments are copied, optionally
//! coerced, and checked by the backend selected when the
//! [`ArgumentValidator`] was built.

use std::fmt::Write as _;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::coerce_arguments;
use crate::config::ValidationConfig;
use crate::schema::{self, extract_input_schema};
use crate::validator::{
    BackendKind, BackendOptions, BackendPreference, MinimalValidator, ROOT_PATH, SchemaValidator,
    select_backend,
};
use crate::Result;

/// Outcome of validating one tool call.
///
/// `valid` is `true` exactly when `errors` is empty. `coerced_args` holds the
/// arguments to dispatch with and is left empty on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the arguments were accepted.
    pub valid: bool,
    /// Human-readable violations, empty on success.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Arguments after coercion, empty on failure.
    #[serde(default)]
    pub coerced_args: Map<String, Value>,
}

impl ValidationResult {
    /// Accepted arguments.
    #[must_use]
    pub fn success(coerced_args: Map<String, Value>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            coerced_args,
        }
    }

    /// Rejected arguments. Callers outside the crate go through
    /// [`ValidationResult::from_errors`], which cannot build an invalid
    /// result with no errors.
    #[must_use]
    pub(crate) fn failure(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "a failed result needs at least one error");
        Self {
            valid: false,
            errors,
            coerced_args: Map::new(),
        }
    }

    /// Success when `errors` is empty, failure otherwise.
    #[must_use]
    pub fn from_errors(errors: Vec<String>, coerced_args: Map<String, Value>) -> Self {
        if errors.is_empty() {
            Self::success(coerced_args)
        } else {
            Self::failure(errors)
        }
    }

    /// Returns `true` if there are no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Format the errors into an LLM-friendly message.
    ///
    /// The message lists every violation and then the parameters the tool
    /// actually accepts, so a model can correct its call in one step.
    /// `schema` may be a tool descriptor or a bare schema.
    #[must_use]
    pub fn format_error(&self, schema: &Value) -> String {
        let mut out = String::from("Tool call validation failed:\n\n");

        for error in &self.errors {
            let _ = writeln!(out, "- {error}");
        }

        let valid_params = extract_input_schema(schema)
            .map(collect_valid_params)
            .unwrap_or_default();
        if !valid_params.is_empty() {
            out.push_str("\nValid parameters for this tool:\n");
            for (name, info) in &valid_params {
                let _ = writeln!(out, "  - {name}: {info}");
            }
        }

        out
    }
}

/// Validates tool-call arguments with a backend chosen at construction.
#[derive(Debug)]
pub struct ArgumentValidator {
    backend: Box<dyn SchemaValidator>,
    coerce_by_default: bool,
}

impl ArgumentValidator {
    /// Build a validator from configuration, selecting the backend once.
    pub fn new(config: &ValidationConfig) -> Result<Self> {
        let backend = select_backend(
            config.backend,
            BackendOptions {
                allow_additional_properties: config.allow_additional_properties,
            },
        )?;
        debug!(backend = %backend.kind(), "Argument validator ready");

        Ok(Self {
            backend,
            coerce_by_default: config.coerce,
        })
    }

    /// Build a validator around an explicit backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn SchemaValidator>) -> Self {
        Self {
            backend,
            coerce_by_default: true,
        }
    }

    /// The backend in use.
    #[must_use]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Validate with the configured coercion setting.
    pub fn check(
        &self,
        tool_name: &str,
        arguments: &Value,
        schema: &Value,
    ) -> Result<ValidationResult> {
        self.validate(tool_name, arguments, schema, self.coerce_by_default)
    }

    /// Validate `arguments` for `tool_name` against `schema`.
    ///
    /// `schema` is a tool descriptor (`{"inputSchema": ...}`) or a bare
    /// schema. `tool_name` only labels log events. `Err` is returned when the
    /// backend cannot run, e.g. on an uncompilable `pattern`.
    pub fn validate(
        &self,
        tool_name: &str,
        arguments: &Value,
        schema: &Value,
        coerce: bool,
    ) -> Result<ValidationResult> {
        let empty = Map::new();
        let args = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                debug!(tool = %tool_name, "Arguments are not an object");
                return Ok(ValidationResult::failure(vec![format!(
                    "{ROOT_PATH}: arguments must be a JSON object"
                )]));
            }
        };

        let Some(input_schema) = extract_input_schema(schema) else {
            debug!(tool = %tool_name, "No input schema, skipping validation");
            return Ok(ValidationResult::success(args.clone()));
        };

        let working = if coerce {
            coerce_arguments(args, input_schema)
        } else {
            args.clone()
        };

        let errors = self.backend.validate(&working, input_schema)?;
        if errors.is_empty() {
            debug!(tool = %tool_name, backend = %self.backend.kind(), "Arguments valid");
            Ok(ValidationResult::success(working))
        } else {
            debug!(
                tool = %tool_name,
                backend = %self.backend.kind(),
                errors = errors.len(),
                "Arguments rejected"
            );
            Ok(ValidationResult::failure(errors))
        }
    }
}

impl Default for ArgumentValidator {
    /// Auto-selected backend with default options.
    fn default() -> Self {
        match select_backend(BackendPreference::Auto, BackendOptions::default()) {
            Ok(backend) => Self::with_backend(backend),
            Err(_) => Self::with_backend(Box::new(MinimalValidator::default())),
        }
    }
}

/// Validate a tool call with the process-wide default validator.
///
/// The backend is selected the first time this is called.
pub fn validate_tool_arguments(
    tool_name: &str,
    arguments: &Value,
    schema: &Value,
    coerce: bool,
) -> Result<ValidationResult> {
    static DEFAULT: OnceLock<ArgumentValidator> = OnceLock::new();
    DEFAULT
        .get_or_init(ArgumentValidator::default)
        .validate(tool_name, arguments, schema, coerce)
}

/// Collect valid parameter names with type/description info from a schema.
fn collect_valid_params(schema: &Value) -> Vec<(String, String)> {
    let Some(props) = schema::properties(schema) else {
        return Vec::new();
    };

    let required = schema::required(schema);

    props
        .iter()
        .map(|(name, prop)| {
            let ty = prop.get("type").and_then(Value::as_str).unwrap_or("any");
            let req = if required.contains(&name.as_str()) {
                " [required]"
            } else {
                " [optional]"
            };
            let enum_hint = prop
                .get("enum")
                .and_then(Value::as_array)
                .map(|arr| {
                    let opts: Vec<String> = arr.iter().map(Value::to_string).collect();
                    format!(" — one of: {}", opts.join(", "))
                })
                .unwrap_or_default();
            let desc = prop
                .get("description")
                .and_then(Value::as_str)
                .map(|d| format!(" — {d}"))
                .unwrap_or_default();

            (name.clone(), format!("({ty}{req}){enum_hint}{desc}"))
        })
        .collect()
}
