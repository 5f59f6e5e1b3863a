use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content of the link state file written by the lifecycle tool.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct LinkState {
    #[serde(default)]
    pub apps: Vec<LinkedApplication>,
}

impl LinkState {
    /// Entries whose name equals `name`, in file order.
    pub fn named(self, name: &str) -> Vec<LinkedApplication> {
        self.apps.into_iter().filter(|app| app.name == name).collect()
    }
}

/// One application entry of the link state file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LinkedApplication {
    /// Empty when the entry carries no identifier.
    #[serde(default, alias = "id")]
    pub app_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "owner_id", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Fields the tool writes that we don't interpret (deploy_url, alias...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
