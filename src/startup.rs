//! Application startup and server initialization.
//!
//! Builds the state of each service from its configuration and serves its
//! router on the configured address.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::auth::CredentialStore;
use crate::clever::ProviderClient;
use crate::config::{DashboardConfig, ProvisioningConfig};
use crate::routes;
use crate::state::{DashboardState, ProvisioningState};

/// Runs the dashboard panel service.
///
/// # Errors
///
/// Returns an error if the server fails to bind or stops with an I/O error.
pub async fn run_dashboard(config: Arc<DashboardConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::create_dashboard_router(DashboardState::new(&config));
    serve(&config.bind_address, app).await
}

/// Builds the provisioning state. Fails when the lifecycle tool or its
/// credentials are missing, or the password cannot be hashed.
pub fn provisioning_state(
    config: Arc<ProvisioningConfig>,
) -> Result<ProvisioningState, Box<dyn std::error::Error>> {
    info!("Hashing add-on provider credentials...");
    let credentials = Arc::new(CredentialStore::from_config(&config)?);

    info!("Creating provider client...");
    let client = Arc::new(ProviderClient::from_config(&config.clever)?);

    Ok(ProvisioningState {
        config,
        credentials,
        client,
    })
}

/// Runs the provisioning backend.
///
/// # Errors
///
/// Returns an error if the state cannot be built, the server fails to bind,
/// or it stops with an I/O error.
pub async fn run_provisioning(
    config: Arc<ProvisioningConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = provisioning_state(config.clone())?;
    let app = routes::create_provisioning_router(state);
    serve(&config.bind_address, app).await
}

async fn serve(bind_address: &str, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_address).await?;
    info!("Starting server on {}", bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
