//! Workflow scheme client over the real HTTP transport
//!
//! These tests use wiremock to stand in for a Jira instance, so the full
//! request path (URL building, query string, auth, body, error mapping) is
//! exercised without network access.

use jira_workflow_scheme::{
    CreateWorkflowSchemeOptions, EditWorkflowSchemeOptions, GetWorkflowSchemeOptions, HttpTransport, JiraConfig,
    JiraError, WorkflowScheme, WorkflowSchemeClient,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Jira mock server with a client pointed at it
struct JiraMock {
    server: MockServer,
    client: WorkflowSchemeClient,
}

impl JiraMock {
    async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    async fn with_config(adjust: impl FnOnce(&mut JiraConfig)) -> Self {
        let server = MockServer::start().await;
        let mut config = JiraConfig {
            base_url: server.uri(),
            ..JiraConfig::default()
        };
        adjust(&mut config);

        let transport = HttpTransport::new(&config).unwrap();
        let client = WorkflowSchemeClient::new(Arc::new(transport));
        Self { server, client }
    }
}

#[tokio::test]
async fn test_create_posts_scheme_json() {
    let mock = JiraMock::new().await;
    let scheme = json!({
        "name": "Example workflow scheme",
        "defaultWorkflow": "jira",
        "issueTypeMappings": {"10000": "scrum workflow"}
    });

    Mock::given(method("POST"))
        .and(path("/rest/api/2/workflowscheme"))
        .and(header("content-type", "application/json"))
        .and(body_json(scheme.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 101010, "name": "Example workflow scheme"})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let response = mock
        .client
        .create_workflow_scheme(&CreateWorkflowSchemeOptions::new(scheme))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    let created: WorkflowScheme = response.json().unwrap();
    assert_eq!(created.id, Some(101010));
}

#[tokio::test]
async fn test_edit_puts_to_scheme_path() {
    let mock = JiraMock::new().await;

    Mock::given(method("PUT"))
        .and(path("/rest/api/2/workflowscheme/10000"))
        .and(body_json(json!({"defaultWorkflow": "jira"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 10000, "defaultWorkflow": "jira"})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let opts = EditWorkflowSchemeOptions::new("10000", json!({"defaultWorkflow": "jira"}));
    let response = mock.client.edit_workflow_scheme(&opts).await.unwrap();

    assert_eq!(response.body["defaultWorkflow"], "jira");
}

#[tokio::test]
async fn test_get_sends_draft_flag_and_lists() {
    let mock = JiraMock::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/5"))
        .and(query_param("returnDraftIfExists", "true"))
        .and(query_param("fields", "id,name"))
        .and(query_param("expand", "draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "draft": true})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let opts = GetWorkflowSchemeOptions::new("5")
        .return_draft_if_exists(true)
        .with_fields(["id", "name"])
        .with_expand(["draft"]);
    let response = mock.client.get_workflow_scheme(&opts).await.unwrap();

    assert_eq!(response.body["draft"], true);
}

#[tokio::test]
async fn test_get_omits_unset_draft_flag_on_the_wire() {
    let mock = JiraMock::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/5"))
        .and(query_param_is_missing("returnDraftIfExists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let response = mock
        .client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("5"))
        .await
        .unwrap();

    assert_eq!(response.body["id"], 5);
}

#[tokio::test]
async fn test_get_sends_empty_fields_parameter() {
    let mock = JiraMock::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/5"))
        .and(query_param("fields", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let opts = GetWorkflowSchemeOptions::new("5").with_fields(Vec::<String>::new());
    mock.client.get_workflow_scheme(&opts).await.unwrap();
}

#[tokio::test]
async fn test_basic_auth_and_path_prefix() {
    let mock = JiraMock::with_config(|config| {
        config.path_prefix = "jira".to_string();
        config.username = Some("admin@example.com".to_string());
        config.token = Some("api-token".to_string());
    })
    .await;

    Mock::given(method("GET"))
        .and(path("/jira/rest/api/2/workflowscheme/1"))
        .and(basic_auth("admin@example.com", "api-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock.server)
        .await;

    mock.client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_error_status_surfaces_jira_messages() {
    let mock = JiraMock::new().await;

    Mock::given(method("PUT"))
        .and(path("/rest/api/2/workflowscheme/10000"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": [],
            "errors": {"defaultWorkflow": "Workflow 'missing' does not exist."}
        })))
        .mount(&mock.server)
        .await;

    let opts = EditWorkflowSchemeOptions::new("10000", json!({"defaultWorkflow": "missing"}));
    let err = mock.client.edit_workflow_scheme(&opts).await.unwrap_err();

    match err {
        JiraError::Api { status, messages, body } => {
            assert_eq!(status, 400);
            assert_eq!(messages, vec!["defaultWorkflow: Workflow 'missing' does not exist.".to_string()]);
            assert!(body["errors"].is_object());
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_plain_text_body() {
    let mock = JiraMock::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock.server)
        .await;

    let err = mock
        .client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("1"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let mock = JiraMock::new().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock.server)
        .await;

    let err = mock
        .client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("1"))
        .await
        .unwrap_err();

    assert!(matches!(err, JiraError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let mock = JiraMock::new().await;
    let target = format!("{}/rest/api/2/workflowscheme/2", mock.server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/1"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", target.as_str()))
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/workflowscheme/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&mock.server)
        .await;

    let response = mock
        .client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("1"))
        .await
        .unwrap();

    assert_eq!(response.body["id"], 2);
}

#[tokio::test]
async fn test_network_failure_is_network_error() {
    // Port 1 on loopback refuses connections
    let config = JiraConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 2,
        ..JiraConfig::default()
    };
    let client = WorkflowSchemeClient::new(Arc::new(HttpTransport::new(&config).unwrap()));

    let err = client
        .get_workflow_scheme(&GetWorkflowSchemeOptions::new("1"))
        .await
        .unwrap_err();

    assert!(matches!(err, JiraError::Network(_)));
}
