use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::ConfigError;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ADDON_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment variables read at startup and the config keys they fill.
const ENV_KEYS: &[(&str, &str)] = &[
    ("ADDON_PROVIDER_SALT", "salt"),
    ("ADDON_PROVIDER_ID", "provider_id"),
    ("ADDON_PROVIDER_PWD", "provider_password"),
    ("ADDON_BIND_ADDRESS", "bind_address"),
    ("CLEVER_SECRET", "clever.secret"),
    ("CLEVER_TOKEN", "clever.token"),
];

/// Behaviour shared by the configuration of both services.
pub trait ServiceConfig: DeserializeOwned + JsonSchema {
    /// Reject values that deserialize fine but cannot run.
    fn validate(&self) -> Result<(), ConfigError>;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Figment(#[from] figment::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// The YAML file (optional) overlaid with the manifest environment variables.
pub fn config_sources() -> Figment {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    Figment::new().merge(Yaml::file(path)).merge(environment())
}

/// Maps the well-known environment variables onto their config keys.
pub fn environment() -> Env {
    Env::raw().filter_map(|key| {
        ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, target)| (*target).into())
    })
}

/// Extract and validate a service configuration.
pub fn extract_config<T: ServiceConfig>(figment: &Figment) -> Result<T, LoadError> {
    let config: T = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration or abort the process: a service must not start half-configured.
pub fn load_config<T: ServiceConfig>() -> T {
    match extract_config(&config_sources()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for a configuration type to stdout.
pub fn print_schema<T: ServiceConfig>() {
    let schema = schema_for!(T);
    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Unable to render schema: {}", e),
    }
}
