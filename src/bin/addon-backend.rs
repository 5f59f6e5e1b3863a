//! Provisioning backend called by the add-on marketplace.

use std::sync::Arc;

use addonprovider::config::{load_config, print_schema, ProvisioningConfig};
use addonprovider::startup::run_provisioning;
use addonprovider::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema::<ProvisioningConfig>();
        return;
    }

    let config: ProvisioningConfig = load_config();
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initializing logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_provisioning(Arc::new(config)).await {
        error!("Provisioning service stopped: {}", e);
        std::process::exit(1);
    }
}
