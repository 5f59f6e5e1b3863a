use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::{default_bind_address, require, ConfigError, ServiceConfig};

/// Configuration of the dashboard panel service.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct DashboardConfig {
    /// Salt from the add-on manifest, shared with the marketplace.
    pub salt: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServiceConfig for DashboardConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("salt", &self.salt)?;
        self.logging.level_filter()?;
        Ok(())
    }
}
