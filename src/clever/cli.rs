use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::error::ClientError;
use super::tool::{LifecycleTool, ToolCommand, ToolOutput};
use crate::config::CleverConfig;

/// [`LifecycleTool`] backed by the `clever` command line tool.
#[derive(Debug, Clone)]
pub struct CleverCli {
    binary: PathBuf,
    workdir: PathBuf,
    secret: Option<String>,
    token: Option<String>,
    timeout: Duration,
}

impl CleverCli {
    /// Fails when the tool is not installed or `CLEVER_SECRET` is not configured,
    /// unless `force` is set.
    pub fn new(config: &CleverConfig) -> Result<Self, ClientError> {
        let binary = match locate_binary(&config.binary) {
            Some(path) => path,
            None if config.force => {
                warn!("'{}' not found, continuing because force is set", config.binary);
                PathBuf::from(&config.binary)
            }
            None => return Err(ClientError::ToolNotFound(config.binary.clone())),
        };

        let secret = config.secret.clone().filter(|s| !s.is_empty());
        if secret.is_none() {
            if !config.force {
                return Err(ClientError::MissingCredentials("CLEVER_SECRET"));
            }
            warn!("CLEVER_SECRET not set, continuing because force is set");
        }

        info!(
            "Using lifecycle tool {} in {}",
            binary.display(),
            config.workdir.display()
        );
        Ok(Self {
            binary,
            workdir: config.workdir.clone(),
            secret,
            token: config.token.clone().filter(|t| !t.is_empty()),
            timeout: Duration::from_millis(config.command_timeout_in_ms),
        })
    }

    async fn run(&self, command: ToolCommand, args: &[&str]) -> Result<ToolOutput, ClientError> {
        debug!("CLI: {} {}", command.name(), args.join(" "));

        let mut cmd = Command::new(&self.binary);
        cmd.arg(command.name())
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if let Some(secret) = &self.secret {
            cmd.env("CLEVER_SECRET", secret);
        }
        if let Some(token) = &self.token {
            cmd.env("CLEVER_TOKEN", token);
        }

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ClientError::Timeout {
                command: command.name(),
                after: self.timeout,
            })?
            .map_err(|source| ClientError::Spawn {
                command: command.name(),
                source,
            })?;

        let result = ToolOutput::from_stdout(
            command,
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        );
        if !result.success {
            debug!(
                status = %output.status,
                "`{}` did not print its success message",
                command.name()
            );
        }
        Ok(result)
    }
}

#[async_trait]
impl LifecycleTool for CleverCli {
    async fn create(
        &self,
        name: &str,
        organisation: &str,
        app_type: &str,
    ) -> Result<ToolOutput, ClientError> {
        self.run(
            ToolCommand::Create,
            &[name, "--type", app_type, "--org", organisation],
        )
        .await
    }

    async fn link(&self, app_id: &str) -> Result<ToolOutput, ClientError> {
        self.run(ToolCommand::Link, &[app_id]).await
    }

    async fn unlink(&self, name: &str) -> Result<ToolOutput, ClientError> {
        self.run(ToolCommand::Unlink, &[name]).await
    }

    async fn delete(&self) -> Result<ToolOutput, ClientError> {
        self.run(ToolCommand::Delete, &["-y"]).await
    }
}

/// Resolve a bare executable name through `PATH`; anything with a directory
/// part is checked as given.
fn locate_binary(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(binary))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
