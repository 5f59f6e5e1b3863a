//! Dashboard panel shown to subscribers through the marketplace SSO link.

use axum::{routing::get, Router};
use tracing::info;

use crate::models::VerifiedToken;
use crate::state::DashboardState;

pub fn routes() -> Router<DashboardState> {
    Router::new().route("/", get(dashboard).post(dashboard))
}

async fn dashboard(token: VerifiedToken) -> &'static str {
    info!(id = %token.id, "Serving dashboard");
    "Hello World !!"
}
