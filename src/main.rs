//! mcp-arg-validator - validate MCP tool-call arguments from the command line.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing::{debug, error};

use mcp_arg_validator::{
    ArgumentValidator, Error, Result,
    cli::{Cli, Command, OutputFormat, ValidateArgs},
    config::Config,
    setup_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Validate(args) => run_validate(config, &args),
        Command::Backend => run_backend(&config),
    }
}

/// Print the backend selected by the configuration
fn run_backend(config: &Config) -> ExitCode {
    match ArgumentValidator::new(&config.validation) {
        Ok(validator) => {
            println!("{}", validator.backend_kind());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

/// Validate one set of arguments and print the result
fn run_validate(mut config: Config, args: &ValidateArgs) -> ExitCode {
    if args.no_coerce {
        config.validation.coerce = false;
    }
    if args.strict {
        config.validation.allow_additional_properties = false;
    }
    if let Some(backend) = args.backend {
        config.validation.backend = backend;
    }

    let outcome = load_inputs(args).and_then(|(schema, arguments)| {
        let validator = ArgumentValidator::new(&config.validation)?;
        debug!(backend = %validator.backend_kind(), tool = %args.tool, "Validating");
        let result = validator.check(&args.tool, &arguments, &schema)?;
        Ok((schema, result))
    });

    let (schema, result) = match outcome {
        Ok(v) => v,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize result: {e}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => {
            if result.valid {
                println!("✅ Arguments valid for '{}'", args.tool);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result.coerced_args).unwrap_or_default()
                );
            } else {
                print!("{}", result.format_error(&schema));
            }
        }
    }

    if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Read the schema file and the tool arguments
fn load_inputs(args: &ValidateArgs) -> Result<(Value, Value)> {
    let schema = read_document(&args.schema)?;

    let arguments = match (&args.args, &args.args_file) {
        (Some(inline), _) => serde_json::from_str(inline)?,
        (None, Some(path)) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, None) => Value::Null,
    };

    Ok((schema, arguments))
}

/// Parse a JSON or YAML document, chosen by file extension
fn read_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Schema file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
