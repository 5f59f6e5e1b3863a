use std::collections::BTreeMap;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::{default_bind_address, require, ConfigError, ServiceConfig};

/// Configuration of the provisioning backend.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ProvisioningConfig {
    /// Add-on id from the manifest, used as the basic-auth username.
    pub provider_id: String,
    /// Add-on password from the manifest. Only its Argon2 hash is kept at runtime.
    pub provider_password: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub clever: CleverConfig,
    #[serde(default)]
    pub addon: AddonResponseConfig,
    #[serde(default)]
    pub password_hash: PasswordHashConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig for ProvisioningConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("provider_id", &self.provider_id)?;
        require("provider_password", &self.provider_password)?;
        self.clever.validate()?;
        self.logging.level_filter()?;
        Ok(())
    }
}

/// Settings for the `clever` lifecycle tool wrapper.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct CleverConfig {
    /// Executable name (looked up in `PATH`) or path.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Directory the tool runs in; the link state file lives here.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    /// Runtime type of the applications created for subscribers.
    #[serde(default = "default_app_type")]
    pub app_type: String,
    pub secret: Option<String>,
    pub token: Option<String>,
    /// Skip the tool and credential checks at startup.
    #[serde(default)]
    pub force: bool,
    /// Attempts made before giving up on an inconsistent link state.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_command_timeout")]
    pub command_timeout_in_ms: u64,
}

impl Default for CleverConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            workdir: default_workdir(),
            app_type: default_app_type(),
            secret: None,
            token: None,
            force: false,
            max_attempts: default_max_attempts(),
            command_timeout_in_ms: default_command_timeout(),
        }
    }
}

impl CleverConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("clever.binary", &self.binary)?;
        require("clever.app_type", &self.app_type)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "clever.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.command_timeout_in_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "clever.command_timeout_in_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn default_binary() -> String {
    "clever".to_string()
}

fn default_workdir() -> PathBuf {
    PathBuf::from(".")
}

fn default_app_type() -> String {
    "python".to_string()
}

fn default_max_attempts() -> u32 {
    2
}

fn default_command_timeout() -> u64 {
    60_000
}

/// What a successful provisioning hands back to the marketplace.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AddonResponseConfig {
    /// Environment variables exposed to the subscriber's application.
    #[serde(default = "default_addon_env")]
    pub config: BTreeMap<String, String>,
    #[serde(default = "default_addon_message")]
    pub message: String,
}

impl Default for AddonResponseConfig {
    fn default() -> Self {
        Self {
            config: default_addon_env(),
            message: default_addon_message(),
        }
    }
}

fn default_addon_env() -> BTreeMap<String, String> {
    BTreeMap::from([("test_env_var".to_string(), "test_env_value".to_string())])
}

fn default_addon_message() -> String {
    "Great Job !".to_string()
}

/// Argon2id cost parameters used to hash the provider password at startup.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct PasswordHashConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}
