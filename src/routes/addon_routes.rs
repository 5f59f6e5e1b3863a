//! Provisioning hooks called by the marketplace.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    routing::{delete, post},
    Json, Router,
};
use tracing::{debug, error, info};

use crate::models::{AuthenticatedProvider, ProvisionRequest, ProvisionResponse};
use crate::state::ProvisioningState;
use crate::utils::http_helpers::HTTPError;

/// Registers the provisioning routes.
pub fn routes() -> Router<ProvisioningState> {
    Router::new()
        .route("/addon_management", post(provision))
        .route("/addon_management/:addon_id", delete(deprovision))
}

/// Subscribe: create the application backing the add-on and hand back its
/// identifier and configuration.
async fn provision(
    provider: AuthenticatedProvider,
    State(state): State<ProvisioningState>,
    Json(request): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<ProvisionResponse>), HTTPError> {
    debug!(
        provider = %provider.provider_id,
        addon_id = %request.addon_id,
        owner_id = %request.owner_id,
        "Provisioning"
    );

    let application = state
        .client
        .create_application(
            &request.addon_id,
            &request.owner_id,
            &state.config.clever.app_type,
        )
        .await
        .map_err(|e| {
            error!(addon_id = %request.addon_id, "Unable to provision application: {}", e);
            HTTPError::internal("Unable to provision application")
        })?;

    info!(
        addon_id = %request.addon_id,
        app_id = %application.app_id,
        "Add-on provisioned"
    );
    let response = ProvisionResponse {
        id: application.app_id,
        config: state.config.addon.config.clone(),
        message: state.config.addon.message.clone(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Unsubscribe: delete the application backing the add-on.
async fn deprovision(
    provider: AuthenticatedProvider,
    State(state): State<ProvisioningState>,
    Path(addon_id): Path<String>,
) -> Result<(StatusCode, &'static str), HTTPError> {
    debug!(provider = %provider.provider_id, addon_id = %addon_id, "Deprovisioning");

    state
        .client
        .delete_application(&addon_id)
        .await
        .map_err(|e| {
            error!(addon_id = %addon_id, "Unable to remove addon or application: {}", e);
            HTTPError::internal("Unable to remove addon or application !")
        })?;

    info!(addon_id = %addon_id, "Add-on deprovisioned");
    Ok((StatusCode::OK, "success"))
}
