//! Client for the `/workflowscheme` resource
//!
//! Each operation shapes a [`RequestDescriptor`] and hands it to the
//! injected [`JiraTransport`]. Nothing is validated here and transport
//! errors are returned untouched.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Instrument;

use super::errors::JiraError;
use super::request::{join_query_list, HttpMethod, RequestDescriptor};
use super::transport::{JiraResponse, JiraTransport};
use super::types::WorkflowScheme;
use crate::telemetry::{create_request_span, generate_correlation_id};

const RESOURCE_PATH: &str = "/workflowscheme";

/// Options that address one existing scheme and may carry `fields`/`expand`
pub trait SchemeRequestOptions {
    fn workflow_scheme_id(&self) -> &str;
    fn fields(&self) -> Option<&[String]>;
    fn expand(&self) -> Option<&[String]>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateWorkflowSchemeOptions {
    pub workflow_scheme: Value,
}

impl CreateWorkflowSchemeOptions {
    pub fn new(workflow_scheme: Value) -> Self {
        Self { workflow_scheme }
    }

    pub fn from_scheme(scheme: &WorkflowScheme) -> Result<Self, serde_json::Error> {
        Ok(Self::new(scheme.to_value()?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditWorkflowSchemeOptions {
    pub workflow_scheme_id: String,
    pub workflow_scheme: Value,
    pub fields: Option<Vec<String>>,
    pub expand: Option<Vec<String>>,
}

impl EditWorkflowSchemeOptions {
    pub fn new(workflow_scheme_id: impl Into<String>, workflow_scheme: Value) -> Self {
        Self {
            workflow_scheme_id: workflow_scheme_id.into(),
            workflow_scheme,
            fields: None,
            expand: None,
        }
    }

    pub fn from_scheme(workflow_scheme_id: impl Into<String>, scheme: &WorkflowScheme) -> Result<Self, serde_json::Error> {
        Ok(Self::new(workflow_scheme_id, scheme.to_value()?))
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = Some(expand.into_iter().map(Into::into).collect());
        self
    }
}

impl SchemeRequestOptions for EditWorkflowSchemeOptions {
    fn workflow_scheme_id(&self) -> &str {
        &self.workflow_scheme_id
    }

    fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    fn expand(&self) -> Option<&[String]> {
        self.expand.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetWorkflowSchemeOptions {
    pub workflow_scheme_id: String,
    /// Query the scheme's draft instead of the scheme itself, when one exists
    pub return_draft_if_exists: Option<bool>,
    pub fields: Option<Vec<String>>,
    pub expand: Option<Vec<String>>,
}

impl GetWorkflowSchemeOptions {
    pub fn new(workflow_scheme_id: impl Into<String>) -> Self {
        Self {
            workflow_scheme_id: workflow_scheme_id.into(),
            ..Self::default()
        }
    }

    pub fn return_draft_if_exists(mut self, value: bool) -> Self {
        self.return_draft_if_exists = Some(value);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = Some(expand.into_iter().map(Into::into).collect());
        self
    }
}

impl SchemeRequestOptions for GetWorkflowSchemeOptions {
    fn workflow_scheme_id(&self) -> &str {
        &self.workflow_scheme_id
    }

    fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    fn expand(&self) -> Option<&[String]> {
        self.expand.as_deref()
    }
}

/// Access to the Jira REST endpoints under `/rest/api/2/workflowscheme`
#[derive(Clone)]
pub struct WorkflowSchemeClient {
    transport: Arc<dyn JiraTransport>,
}

impl WorkflowSchemeClient {
    pub fn new(transport: Arc<dyn JiraTransport>) -> Self {
        Self { transport }
    }

    /// Create a new workflow scheme. Values not passed are set to their defaults.
    pub async fn create_workflow_scheme(&self, opts: &CreateWorkflowSchemeOptions) -> Result<JiraResponse, JiraError> {
        let descriptor = self.create_workflow_scheme_request(opts);
        self.dispatch("create", None, descriptor).await
    }

    /// Update the passed workflow scheme. Values not passed are left untouched;
    /// set `updateDraftIfNeeded` in the body to edit the draft of a scheme in use.
    pub async fn edit_workflow_scheme(&self, opts: &EditWorkflowSchemeOptions) -> Result<JiraResponse, JiraError> {
        let descriptor = self.edit_workflow_scheme_request(opts);
        self.dispatch("edit", Some(opts.workflow_scheme_id.as_str()), descriptor).await
    }

    /// Get the requested workflow scheme, or its draft with `return_draft_if_exists`
    pub async fn get_workflow_scheme(&self, opts: &GetWorkflowSchemeOptions) -> Result<JiraResponse, JiraError> {
        let descriptor = self.get_workflow_scheme_request(opts);
        self.dispatch("get", Some(opts.workflow_scheme_id.as_str()), descriptor).await
    }

    pub fn create_workflow_scheme_request(&self, opts: &CreateWorkflowSchemeOptions) -> RequestDescriptor {
        RequestDescriptor::new(self.transport.build_url(RESOURCE_PATH), HttpMethod::Post)
            .with_body(opts.workflow_scheme.clone())
    }

    pub fn edit_workflow_scheme_request(&self, opts: &EditWorkflowSchemeOptions) -> RequestDescriptor {
        self.build_request_options(opts, "", HttpMethod::Put, Some(opts.workflow_scheme.clone()), None)
    }

    pub fn get_workflow_scheme_request(&self, opts: &GetWorkflowSchemeOptions) -> RequestDescriptor {
        let mut qs = Map::new();
        let draft = opts.return_draft_if_exists.map(Value::Bool).unwrap_or(Value::Null);
        qs.insert("returnDraftIfExists".to_string(), draft);

        self.build_request_options(opts, "", HttpMethod::Get, None, Some(qs))
    }

    /// Build the descriptor for an endpoint under `/workflowscheme/{id}`.
    ///
    /// `path` follows the id. `fields` and `expand` from `opts` are added to
    /// the query string as comma-joined lists.
    pub fn build_request_options<O: SchemeRequestOptions + ?Sized>(
        &self,
        opts: &O,
        path: &str,
        method: HttpMethod,
        body: Option<Value>,
        qs: Option<Map<String, Value>>,
    ) -> RequestDescriptor {
        let base_path = format!("{}/{}", RESOURCE_PATH, opts.workflow_scheme_id());
        let mut qs = qs.unwrap_or_default();
        let body = body
            .filter(|b| !b.is_null())
            .unwrap_or_else(|| Value::Object(Map::new()));

        if let Some(fields) = opts.fields() {
            qs.insert("fields".to_string(), Value::String(join_query_list(fields)));
        }

        if let Some(expand) = opts.expand() {
            qs.insert("expand".to_string(), Value::String(join_query_list(expand)));
        }

        RequestDescriptor::new(self.transport.build_url(&format!("{base_path}{path}")), method)
            .with_body(body)
            .with_query(qs)
    }

    async fn dispatch(
        &self,
        operation: &str,
        scheme_id: Option<&str>,
        descriptor: RequestDescriptor,
    ) -> Result<JiraResponse, JiraError> {
        let correlation_id = generate_correlation_id();
        let span = create_request_span(operation, scheme_id, &correlation_id);

        self.transport.make_request(descriptor).instrument(span).await
    }
}
