//! Dashboard panel for add-on subscribers.

use std::sync::Arc;

use addonprovider::config::{load_config, print_schema, DashboardConfig};
use addonprovider::startup::run_dashboard;
use addonprovider::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema::<DashboardConfig>();
        return;
    }

    let config: DashboardConfig = load_config();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_dashboard(Arc::new(config)).await {
        error!("Dashboard service stopped: {}", e);
        std::process::exit(1);
    }
}
