use async_trait::async_trait;

use super::error::ClientError;

/// The lifecycle tool subcommands the client relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCommand {
    Create,
    Link,
    Unlink,
    Delete,
}

impl ToolCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCommand::Create => "create",
            ToolCommand::Link => "link",
            ToolCommand::Unlink => "unlink",
            ToolCommand::Delete => "delete",
        }
    }

    /// What the tool prints on stdout when the subcommand succeeds.
    pub fn expected_output(&self) -> &'static str {
        match self {
            ToolCommand::Create => "Your application has been successfully created!",
            ToolCommand::Link => "Your application has been successfully linked!",
            ToolCommand::Unlink => "Your application has been successfully unlinked!",
            ToolCommand::Delete => "The application has been deleted",
        }
    }
}

/// Collapse whitespace runs to a single space and lower-case.
pub fn normalize_output(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn outputs_match(actual: &str, expected: &str) -> bool {
    normalize_output(actual) == normalize_output(expected)
}

/// Result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub raw_output: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Judge `stdout` against the success sentence of `command`.
    pub fn from_stdout(command: ToolCommand, stdout: String, stderr: String) -> Self {
        Self {
            success: outputs_match(&stdout, command.expected_output()),
            raw_output: stdout,
            stderr,
        }
    }
}

/// Port to the external lifecycle tool.
///
/// `Err` means the tool could not be run at all; a run that printed something
/// unexpected is an `Ok` output with `success == false`.
#[async_trait]
pub trait LifecycleTool: Send + Sync {
    async fn create(
        &self,
        name: &str,
        organisation: &str,
        app_type: &str,
    ) -> Result<ToolOutput, ClientError>;
    /// Links `app_id` into the working directory, writing the link state file.
    async fn link(&self, app_id: &str) -> Result<ToolOutput, ClientError>;
    async fn unlink(&self, name: &str) -> Result<ToolOutput, ClientError>;
    /// Deletes the currently linked application without confirmation.
    async fn delete(&self) -> Result<ToolOutput, ClientError>;
}
