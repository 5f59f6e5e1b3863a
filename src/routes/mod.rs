//! HTTP route definitions and handlers.
//!
//! The dashboard and the provisioning backend are separate services, each
//! with its own router and a shared health check.

mod addon_routes;
mod dashboard_routes;
mod health_routes;

use crate::state::{DashboardState, ProvisioningState};
use axum::Router;

/// Router of the dashboard panel service.
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .merge(dashboard_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}

/// Router of the provisioning backend.
pub fn create_provisioning_router(state: ProvisioningState) -> Router {
    Router::new()
        .merge(addon_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
