//! Shared application state.
//!
//! Each service gets its own state, cloned into every request handler.

use crate::auth::{CredentialStore, TokenVerifier};
use crate::clever::ProviderClient;
use crate::config::{DashboardConfig, ProvisioningConfig};
use std::sync::Arc;

/// State of the dashboard service.
#[derive(Clone)]
pub struct DashboardState {
    /// Verifier holding the manifest salt.
    pub verifier: Arc<TokenVerifier>,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        let verifier = Arc::new(TokenVerifier::new(config.salt.clone()));
        Self { verifier }
    }
}

/// State of the provisioning service.
#[derive(Clone)]
pub struct ProvisioningState {
    /// Configuration loaded at startup.
    pub config: Arc<ProvisioningConfig>,
    /// Hashed add-on provider credentials for basic auth.
    pub credentials: Arc<CredentialStore>,
    /// Client creating and deleting the backing applications.
    pub client: Arc<ProviderClient>,
}
