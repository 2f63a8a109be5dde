//! MCP tool-call argument validation
//!
//! Checks the arguments of a tool call against the tool's JSON-Schema-like
//! `inputSchema` before the call is dispatched.
//!
//! # Pipeline
//!
//! - **Schema extraction**: `{"inputSchema": ...}` or a bare schema object;
//!   no schema means the arguments pass through unchanged.
//! - **Coercion**: `"42"` → `42`, `"yes"` → `true` for declared
//!   integer/number/boolean properties.
//! - **Validation**: a Draft-7 engine when the `full-validator` feature is
//!   enabled, a minimal hand-written checker otherwise.
//! - **Result**: a [`ValidationResult`] with either the coerced arguments or
//!   the complete list of violations.
//!
//! ```rust
//! use mcp_arg_validator::validate_tool_arguments;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "inputSchema": {
//!         "type": "object",
//!         "properties": { "limit": { "type": "integer" } },
//!         "required": ["limit"]
//!     }
//! });
//!
//! let result = validate_tool_arguments("search", &json!({ "limit": "10" }), &schema, true)?;
//! assert!(result.valid);
//! assert_eq!(result.coerced_args["limit"], json!(10));
//! # Ok::<(), mcp_arg_validator::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod coerce;
pub mod config;
pub mod error;
pub mod schema;
pub mod validation;
pub mod validator;

pub use error::{Error, Result};
pub use validation::{ArgumentValidator, ValidationResult, validate_tool_arguments};
pub use validator::{BackendKind, BackendPreference, SchemaValidator};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so that
/// command output on stdout stays machine-readable.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
