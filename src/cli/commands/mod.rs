use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use crate::config::JiraConfig;
use crate::jira::{HttpTransport, JiraResponse, WorkflowSchemeClient};

pub mod workflow_scheme;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Build a client over the default HTTP transport
pub fn build_client(config: &JiraConfig) -> Result<WorkflowSchemeClient> {
    let transport = HttpTransport::new(config).context("Failed to set up Jira transport")?;
    Ok(WorkflowSchemeClient::new(Arc::new(transport)))
}

/// Read a JSON document from a file path, or stdin for `-`
pub async fn read_json_input(source: &str) -> Result<Value> {
    let raw = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read JSON from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read {source}"))?
    };

    serde_json::from_str(&raw).with_context(|| format!("{source} does not contain valid JSON"))
}

pub fn print_response(response: &JiraResponse) -> Result<()> {
    if response.body.is_null() {
        println!("HTTP {}", response.status);
    } else {
        println!("{}", serde_json::to_string_pretty(&response.body)?);
    }
    Ok(())
}
