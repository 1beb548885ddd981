use anyhow::{bail, Result};
use serde_json::Value;
use tracing::info;

use super::{build_client, print_response, read_json_input, Command};
use crate::config::JiraConfig;
use crate::jira::{CreateWorkflowSchemeOptions, EditWorkflowSchemeOptions, GetWorkflowSchemeOptions};

pub struct GetSchemeCommand {
    pub config: JiraConfig,
    pub options: GetWorkflowSchemeOptions,
}

impl GetSchemeCommand {
    pub fn new(config: JiraConfig, id: String) -> Self {
        Self {
            config,
            options: GetWorkflowSchemeOptions::new(id),
        }
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        if draft {
            self.options.return_draft_if_exists = Some(true);
        }
        self
    }

    pub fn with_fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.options.fields = fields;
        self
    }

    pub fn with_expand(mut self, expand: Option<Vec<String>>) -> Self {
        self.options.expand = expand;
        self
    }
}

impl Command for GetSchemeCommand {
    async fn execute(&self) -> Result<()> {
        let client = build_client(&self.config)?;
        let response = client.get_workflow_scheme(&self.options).await?;
        print_response(&response)
    }
}

pub struct CreateSchemeCommand {
    pub config: JiraConfig,
    pub file: String,
}

impl Command for CreateSchemeCommand {
    async fn execute(&self) -> Result<()> {
        let scheme = read_json_input(&self.file).await?;
        let client = build_client(&self.config)?;
        let response = client
            .create_workflow_scheme(&CreateWorkflowSchemeOptions::new(scheme))
            .await?;

        if let Some(id) = response.body.get("id") {
            info!(scheme.id = %id, "workflow scheme created");
        }
        print_response(&response)
    }
}

pub struct EditSchemeCommand {
    pub config: JiraConfig,
    pub id: String,
    pub file: String,
    pub update_draft: bool,
}

impl Command for EditSchemeCommand {
    async fn execute(&self) -> Result<()> {
        let mut scheme = read_json_input(&self.file).await?;
        if self.update_draft {
            match scheme.as_object_mut() {
                Some(map) => {
                    map.insert("updateDraftIfNeeded".to_string(), Value::Bool(true));
                }
                None => bail!("--update-draft needs the scheme file to hold a JSON object"),
            }
        }

        let client = build_client(&self.config)?;
        let response = client
            .edit_workflow_scheme(&EditWorkflowSchemeOptions::new(self.id.clone(), scheme))
            .await?;
        print_response(&response)
    }
}

/// Prints the descriptor a `get` would send
pub struct UrlCommand {
    pub config: JiraConfig,
    pub id: String,
    pub draft: bool,
}

impl Command for UrlCommand {
    async fn execute(&self) -> Result<()> {
        let client = build_client(&self.config)?;
        let mut options = GetWorkflowSchemeOptions::new(self.id.clone());
        if self.draft {
            options.return_draft_if_exists = Some(true);
        }

        let descriptor = client.get_workflow_scheme_request(&options);
        println!("{} {}", descriptor.method, descriptor.uri);
        for (key, value) in descriptor.query_pairs() {
            println!("  {key}={value}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> JiraConfig {
        JiraConfig {
            base_url: server.uri(),
            ..JiraConfig::default()
        }
    }

    #[tokio::test]
    async fn test_get_command_sends_draft_and_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/workflowscheme/10000"))
            .and(query_param("returnDraftIfExists", "true"))
            .and(query_param("fields", "id,name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 10000, "name": "Draft"})))
            .expect(1)
            .mount(&server)
            .await;

        let command = GetSchemeCommand::new(config_for(&server), "10000".to_string())
            .with_draft(true)
            .with_fields(Some(vec!["id".to_string(), "name".to_string()]));

        command.execute().await.unwrap();
    }

    #[tokio::test]
    async fn test_edit_command_sets_update_draft_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("scheme.json");
        std::fs::write(&file, r#"{"defaultWorkflow": "jira"}"#).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/api/2/workflowscheme/10000"))
            .and(body_json(json!({"defaultWorkflow": "jira", "updateDraftIfNeeded": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 10000, "draft": true})))
            .expect(1)
            .mount(&server)
            .await;

        let command = EditSchemeCommand {
            config: config_for(&server),
            id: "10000".to_string(),
            file: file.display().to_string(),
            update_draft: true,
        };

        command.execute().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_command_forwards_body_and_surfaces_jira_rejection() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("scheme.json");
        std::fs::write(&file, "[1, 2]").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/workflowscheme"))
            .and(body_json(json!([1, 2])))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"errorMessages": ["Can not deserialize instance"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let command = CreateSchemeCommand {
            config: config_for(&server),
            file: file.display().to_string(),
        };

        let err = command.execute().await.unwrap_err();
        assert!(err.to_string().contains("Can not deserialize instance"));
    }

    #[tokio::test]
    async fn test_edit_command_update_draft_needs_object() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("scheme.json");
        std::fs::write(&file, "\"jira\"").unwrap();

        let command = EditSchemeCommand {
            config: JiraConfig::default(),
            id: "1".to_string(),
            file: file.display().to_string(),
            update_draft: true,
        };

        let err = command.execute().await.unwrap_err();
        assert!(err.to_string().contains("--update-draft"));
    }

    #[tokio::test]
    async fn test_get_command_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/workflowscheme/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"errorMessages": ["No such scheme"], "errors": {}})),
            )
            .mount(&server)
            .await;

        let err = GetSchemeCommand::new(config_for(&server), "404".to_string())
            .execute()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No such scheme"));
    }
}
