// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod dashboard;
pub mod loader;
pub mod logging;
pub mod provisioning;

pub use dashboard::*;
pub use loader::*;
pub use logging::*;
pub use provisioning::*;

use thiserror::Error;

/// Errors raised while validating a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting '{0}'")]
    Missing(&'static str),
    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub(crate) fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

pub(crate) fn require(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(key));
    }
    Ok(())
}
