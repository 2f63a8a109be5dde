//! Configuration management

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::validator::BackendPreference;
use crate::{Error, Result};

/// Prefix for environment overrides, e.g.
/// `MCP_ARG_VALIDATOR_VALIDATION__COERCE=false`.
pub const ENV_PREFIX: &str = "MCP_ARG_VALIDATOR_";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Validation behaviour
    pub validation: ValidationConfig,
}

/// How tool arguments are validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Coerce string arguments to their declared scalar type before checking
    pub coerce: bool,
    /// Accept arguments that the schema does not declare
    pub allow_additional_properties: bool,
    /// Backend selection
    pub backend: BackendPreference,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            coerce: true,
            allow_additional_properties: true,
            backend: BackendPreference::Auto,
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
