use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of a provisioning call from the marketplace.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProvisionRequest {
    pub addon_id: String,
    pub owner_id: String,
}

/// Answer to a successful provisioning call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProvisionResponse {
    /// Identifier of the application backing the add-on.
    pub id: String,
    /// Environment variables injected into the subscriber's application.
    pub config: BTreeMap<String, String>,
    pub message: String,
}
