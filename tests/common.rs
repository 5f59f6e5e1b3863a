#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use addonprovider::auth::CredentialStore;
use addonprovider::clever::{
    ClientError, LifecycleTool, LinkStateFile, ProviderClient, ToolCommand, ToolOutput,
};
use addonprovider::config::{DashboardConfig, ProvisioningConfig};
use addonprovider::routes::{create_dashboard_router, create_provisioning_router};
use addonprovider::state::{DashboardState, ProvisioningState};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Response;
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};

pub const SALT: &str = "s3cr3t-salt";
pub const PROVIDER_ID: &str = "my-addon";
pub const PROVIDER_PASSWORD: &str = "hunter2";

const DASHBOARD_CONFIG: &str = r#"
salt: "s3cr3t-salt"
bind_address: 127.0.0.1:8081
logging:
  level: "debug"
  format: "json"
"#;

const PROVISIONING_CONFIG: &str = r#"
provider_id: my-addon
provider_password: hunter2
bind_address: 127.0.0.1:8082
password_hash:
  memory_kib: 256
  iterations: 1
  parallelism: 1
clever:
  force: true
logging:
  level: "debug"
  format: "json"
"#;

pub fn dashboard_app() -> Router {
    let config: DashboardConfig = Figment::new()
        .merge(Yaml::string(DASHBOARD_CONFIG))
        .extract()
        .expect("Failed to parse dashboard test config");
    create_dashboard_router(DashboardState::new(&config))
}

/// A provisioning app whose lifecycle tool is `tool`; the link state file
/// lives in a fresh temporary directory that must outlive the app.
pub fn provisioning_app(tool: Arc<FakeTool>) -> Router {
    let config: ProvisioningConfig = Figment::new()
        .merge(Yaml::string(PROVISIONING_CONFIG))
        .extract()
        .expect("Failed to parse provisioning test config");
    let credentials = CredentialStore::from_config(&config).expect("credentials should hash");
    let client = ProviderClient::new(tool.clone(), LinkStateFile::new(tool.state_path.clone()), 2);

    create_provisioning_router(ProvisioningState {
        config: Arc::new(config),
        credentials: Arc::new(credentials),
        client: Arc::new(client),
    })
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Lifecycle tool stand-in: each command answers with the queued stdout and
/// optionally writes the link state file, like `clever` does.
pub struct FakeTool {
    pub state_path: PathBuf,
    replies: Mutex<VecDeque<(ToolCommand, &'static str, Option<&'static str>)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTool {
    pub fn new(dir: &tempfile::TempDir) -> Self {
        Self {
            state_path: dir.path().join(".clever.json"),
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the reply to the next `command` call.
    pub fn reply(
        self,
        command: ToolCommand,
        stdout: &'static str,
        writes_state: Option<&'static str>,
    ) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((command, stdout, writes_state));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, command: ToolCommand, call: String) -> Result<ToolOutput, ClientError> {
        self.calls.lock().unwrap().push(call);
        let mut replies = self.replies.lock().unwrap();
        let position = replies.iter().position(|(c, _, _)| *c == command);
        let (stdout, writes_state) = match position.and_then(|i| replies.remove(i)) {
            Some((_, stdout, writes_state)) => (stdout, writes_state),
            None => ("", None),
        };
        if let Some(content) = writes_state {
            std::fs::write(&self.state_path, content).unwrap();
        }
        Ok(ToolOutput::from_stdout(command, stdout.to_string(), String::new()))
    }
}

#[async_trait]
impl LifecycleTool for FakeTool {
    async fn create(
        &self,
        name: &str,
        organisation: &str,
        app_type: &str,
    ) -> Result<ToolOutput, ClientError> {
        self.answer(
            ToolCommand::Create,
            format!("create {} --type {} --org {}", name, app_type, organisation),
        )
    }

    async fn link(&self, app_id: &str) -> Result<ToolOutput, ClientError> {
        self.answer(ToolCommand::Link, format!("link {}", app_id))
    }

    async fn unlink(&self, name: &str) -> Result<ToolOutput, ClientError> {
        self.answer(ToolCommand::Unlink, format!("unlink {}", name))
    }

    async fn delete(&self) -> Result<ToolOutput, ClientError> {
        self.answer(ToolCommand::Delete, "delete -y".to_string())
    }
}
