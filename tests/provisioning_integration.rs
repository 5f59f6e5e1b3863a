mod common;

use std::sync::Arc;

use addonprovider::clever::ToolCommand;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use base64::{engine::general_purpose, Engine as _};
use common::{body_string, provisioning_app, FakeTool, PROVIDER_ID, PROVIDER_PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

const CREATED: &str = "Your application has been successfully created!\n";
const LINKED: &str = "Your application has been successfully linked!\n";
const UNLINKED: &str = "Your application has been successfully unlinked!\n";
const DELETED: &str = "The application has been deleted\n";

const ADDON_42_STATE: &str = r#"{"apps":[{"app_id":"app_123","org_id":"org-7","deploy_url":"https://push.example/app_123.git","name":"addon-42","alias":"addon-42"}]}"#;

fn basic(credentials: &str) -> String {
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}

fn provision_request(credentials: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/addon_management")
        .header(header::AUTHORIZATION, basic(credentials))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn deprovision_request(credentials: &str, addon_id: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(format!("/addon_management/{}", addon_id))
        .header(header::AUTHORIZATION, basic(credentials))
        .body(Body::empty())
        .expect("failed to build request")
}

fn valid_credentials() -> String {
    format!("{}:{}", PROVIDER_ID, PROVIDER_PASSWORD)
}

#[tokio::test]
async fn integration_provision_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(
        FakeTool::new(&dir)
            .reply(ToolCommand::Create, CREATED, Some(ADDON_42_STATE))
            .reply(ToolCommand::Unlink, UNLINKED, None),
    );
    let app = provisioning_app(tool.clone());

    let response = app
        .oneshot(provision_request(
            &valid_credentials(),
            json!({"addon_id": "addon-42", "owner_id": "org-7"}),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "id": "app_123",
            "config": {"test_env_var": "test_env_value"},
            "message": "Great Job !"
        })
    );
    assert_eq!(
        tool.calls(),
        vec![
            "create addon-42 --type python --org org-7",
            "unlink addon-42"
        ]
    );
}

#[tokio::test]
async fn integration_provision_tool_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(FakeTool::new(&dir).reply(
        ToolCommand::Create,
        "[ERROR] Cannot find organisation org-7\n",
        None,
    ));
    let app = provisioning_app(tool.clone());

    let response = app
        .oneshot(provision_request(
            &valid_credentials(),
            json!({"addon_id": "addon-42", "owner_id": "org-7"}),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(response).await, "Unable to provision application");
    assert_eq!(tool.calls().len(), 1);
}

#[tokio::test]
async fn integration_provision_requires_basic_auth() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(FakeTool::new(&dir));
    let app = provisioning_app(tool.clone());

    for credentials in [
        format!("{}:wrong", PROVIDER_ID),
        format!("someone-else:{}", PROVIDER_PASSWORD),
        String::new(),
    ] {
        let response = app
            .clone()
            .oneshot(provision_request(
                &credentials,
                json!({"addon_id": "addon-42", "owner_id": "org-7"}),
            ))
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"Authentication Required\""
        );
    }

    let no_header = Request::builder()
        .method(Method::DELETE)
        .uri("/addon_management/app_123")
        .body(Body::empty())
        .expect("failed to build request");
    let response = app.oneshot(no_header).await.expect("request should complete");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn integration_provision_rejects_incomplete_body() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(FakeTool::new(&dir));
    let app = provisioning_app(tool.clone());

    let response = app
        .oneshot(provision_request(
            &valid_credentials(),
            json!({"addon_id": "addon-42"}),
        ))
        .await
        .expect("request should complete");

    assert!(response.status().is_client_error());
    assert!(tool.calls().is_empty());
}

#[tokio::test]
async fn integration_deprovision_success() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(
        FakeTool::new(&dir)
            .reply(ToolCommand::Link, LINKED, Some(ADDON_42_STATE))
            .reply(ToolCommand::Delete, DELETED, None),
    );
    let app = provisioning_app(tool.clone());

    let response = app
        .oneshot(deprovision_request(&valid_credentials(), "app_123"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "success");
    assert_eq!(tool.calls(), vec!["link app_123", "delete -y"]);
}

#[tokio::test]
async fn integration_deprovision_delete_mismatch_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let tool = Arc::new(
        FakeTool::new(&dir)
            .reply(ToolCommand::Link, LINKED, Some(ADDON_42_STATE))
            .reply(ToolCommand::Delete, "Application not found\n", None),
    );
    let app = provisioning_app(tool.clone());

    let response = app
        .oneshot(deprovision_request(&valid_credentials(), "app_123"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        "Unable to remove addon or application !"
    );
    assert_eq!(tool.calls(), vec!["link app_123", "delete -y"]);
}

#[tokio::test]
async fn integration_health() {
    let dir = tempfile::tempdir().unwrap();
    let app = provisioning_app(Arc::new(FakeTool::new(&dir)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
}
