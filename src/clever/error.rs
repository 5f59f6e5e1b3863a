use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("lifecycle tool '{0}' not found")]
    ToolNotFound(String),

    #[error("lifecycle tool credentials missing: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("unexpected output from `{command}`: {output:?}")]
    CommandOutputMismatch {
        command: &'static str,
        output: String,
    },

    #[error("no linked application named '{0}'")]
    NoLinkedApplication(String),

    #[error("linked application '{0}' has no identifier")]
    MissingApplicationId(String),

    #[error("{count} linked applications named '{name}' and no link state file to reset")]
    TooManyLinkedApplications { name: String, count: usize },

    #[error("{operation} gave up after {attempts} attempt(s)")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
    },

    #[error("link state file {}: {reason}", .path.display())]
    StateFile { path: PathBuf, reason: String },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: &'static str,
        source: std::io::Error,
    },

    #[error("`{command}` did not finish within {after:?}")]
    Timeout {
        command: &'static str,
        after: Duration,
    },
}
