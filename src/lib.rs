// jira-ws library - Jira workflow scheme REST binding
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod jira;
pub mod telemetry;

// Re-export key types for easy access
pub use crate::config::{config, JiraConfig, JiraWsConfig};
pub use crate::jira::{
    CreateWorkflowSchemeOptions, EditWorkflowSchemeOptions, GetWorkflowSchemeOptions, HttpMethod, HttpTransport,
    JiraError, JiraResponse, JiraTransport, RequestDescriptor, WorkflowScheme, WorkflowSchemeClient,
};
pub use crate::telemetry::{create_request_span, generate_correlation_id, init_telemetry};
