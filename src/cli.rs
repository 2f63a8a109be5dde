//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::validator::BackendPreference;

/// Validate MCP tool-call arguments against a tool's input schema
#[derive(Parser, Debug)]
#[command(name = "mcp-arg-validator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "MCP_ARG_VALIDATOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "warn",
        env = "MCP_ARG_VALIDATOR_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "MCP_ARG_VALIDATOR_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate arguments against a schema or tool descriptor
    Validate(ValidateArgs),

    /// Print the backend the current configuration selects
    Backend,
}

/// Arguments of `validate`
#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Schema or tool descriptor file (`.json`, otherwise parsed as YAML)
    #[arg(short, long, required = true)]
    pub schema: PathBuf,

    /// Tool arguments as a JSON object
    #[arg(short, long, conflicts_with = "args_file")]
    pub args: Option<String>,

    /// File holding the tool arguments as JSON
    #[arg(long)]
    pub args_file: Option<PathBuf>,

    /// Tool name used in log output
    #[arg(short, long, default_value = "cli")]
    pub tool: String,

    /// Do not coerce string arguments
    #[arg(long)]
    pub no_coerce: bool,

    /// Reject arguments the schema does not declare
    #[arg(long)]
    pub strict: bool,

    /// Backend override
    #[arg(long, value_enum)]
    pub backend: Option<BackendPreference>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// The `ValidationResult` as JSON
    Json,
}
