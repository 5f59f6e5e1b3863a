use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::cli::CleverCli;
use super::error::ClientError;
use super::link_state::LinkStateFile;
use super::tool::{LifecycleTool, ToolCommand, ToolOutput};
use crate::config::CleverConfig;
use crate::models::LinkedApplication;

/// Creates and deletes the applications backing add-on subscriptions.
///
/// Every operation goes through the link state file of one working directory,
/// so operations on a client are serialized.
pub struct ProviderClient {
    tool: Arc<dyn LifecycleTool>,
    link_state: LinkStateFile,
    max_attempts: u32,
    lock: Mutex<()>,
}

impl ProviderClient {
    /// Build a client driving the real `clever` tool.
    pub fn from_config(config: &CleverConfig) -> Result<Self, ClientError> {
        let tool = CleverCli::new(config)?;
        Ok(Self::new(
            Arc::new(tool),
            LinkStateFile::in_dir(&config.workdir),
            config.max_attempts,
        ))
    }

    pub fn new(tool: Arc<dyn LifecycleTool>, link_state: LinkStateFile, max_attempts: u32) -> Self {
        Self {
            tool,
            link_state,
            max_attempts: max_attempts.max(1),
            lock: Mutex::new(()),
        }
    }

    /// Create an application named `name` in `organisation` and return its link
    /// entry. The application is unlinked again before returning.
    pub async fn create_application(
        &self,
        name: &str,
        organisation: &str,
        app_type: &str,
    ) -> Result<LinkedApplication, ClientError> {
        let _guard = self.lock.lock().await;

        for attempt in 1..=self.max_attempts {
            debug!(app_name = name, attempt, "creating application");
            let output = self.tool.create(name, organisation, app_type).await?;
            if !output.success {
                error!("Error during app creation\n{}", output.raw_output);
                return Err(mismatch(ToolCommand::Create, output));
            }

            let mut matches = self.link_state.applications_named(name).await?;
            match matches.len() {
                0 => {
                    error!(app_name = name, "There is no linked application");
                    return Err(ClientError::NoLinkedApplication(name.to_string()));
                }
                1 => {
                    let application = matches.remove(0);
                    if application.app_id.is_empty() {
                        error!(app_name = name, "Linked application has no app_id");
                        return Err(ClientError::MissingApplicationId(name.to_string()));
                    }
                    self.unlink(name).await?;
                    info!(
                        app_name = name,
                        app_id = %application.app_id,
                        "application created"
                    );
                    return Ok(application);
                }
                count => {
                    error!(app_name = name, count, "There are too many linked applications");
                    if !self.link_state.remove().await? {
                        return Err(ClientError::TooManyLinkedApplications {
                            name: name.to_string(),
                            count,
                        });
                    }
                    warn!("Link state file removed, retrying creation");
                }
            }
        }

        Err(ClientError::RetriesExhausted {
            operation: "create_application",
            attempts: self.max_attempts,
        })
    }

    /// Delete the application `app_id`: link it from a clean state, then delete it.
    pub async fn delete_application(&self, app_id: &str) -> Result<(), ClientError> {
        let _guard = self.lock.lock().await;

        self.link_state.remove().await?;
        self.link(app_id).await?;

        debug!(app_id, "CLI: call for deletion");
        let output = self.tool.delete().await?;
        if !output.success {
            error!(
                "Unable to delete the application!\nstdout: {}\nstderr: {}",
                output.raw_output, output.stderr
            );
            return Err(mismatch(ToolCommand::Delete, output));
        }

        info!(app_id, "application deleted");
        Ok(())
    }

    async fn link(&self, app_id: &str) -> Result<(), ClientError> {
        for attempt in 1..=self.max_attempts {
            debug!(app_id, attempt, "linking application");
            let output = self.tool.link(app_id).await?;
            if output.success {
                return Ok(());
            }

            error!(
                "Unable to link to the application!\nstdout: {}\nstderr: {}",
                output.raw_output, output.stderr
            );
            if !self.link_state.remove().await? {
                return Err(mismatch(ToolCommand::Link, output));
            }
            warn!("Link state file removed, retrying link");
        }

        Err(ClientError::RetriesExhausted {
            operation: "link",
            attempts: self.max_attempts,
        })
    }

    async fn unlink(&self, name: &str) -> Result<(), ClientError> {
        let output = self.tool.unlink(name).await?;
        if !output.success {
            error!("Error to unlink application:\n{}", output.raw_output);
            return Err(mismatch(ToolCommand::Unlink, output));
        }
        Ok(())
    }
}

fn mismatch(command: ToolCommand, output: ToolOutput) -> ClientError {
    ClientError::CommandOutputMismatch {
        command: command.name(),
        output: output.raw_output,
    }
}
