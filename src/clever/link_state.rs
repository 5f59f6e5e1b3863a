use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ClientError;
use crate::models::{LinkState, LinkedApplication};

/// File name the lifecycle tool uses for its link state.
pub const LINK_STATE_FILE: &str = ".clever.json";

/// The link state file in the tool's working directory. Owned by the tool: we
/// only read it, or remove it to start over from a clean state.
#[derive(Debug, Clone)]
pub struct LinkStateFile {
    path: PathBuf,
}

impl LinkStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(LINK_STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty state.
    pub async fn read(&self) -> Result<LinkState, ClientError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LinkState::default()),
            Err(e) => return Err(self.error(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| self.error(e))
    }

    /// Linked applications called `name`.
    pub async fn applications_named(
        &self,
        name: &str,
    ) -> Result<Vec<LinkedApplication>, ClientError> {
        Ok(self.read().await?.named(name))
    }

    /// Returns whether there was a file to remove.
    pub async fn remove(&self) -> Result<bool, ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed link state file {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.error(e)),
        }
    }

    fn error(&self, e: impl std::fmt::Display) -> ClientError {
        ClientError::StateFile {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}
