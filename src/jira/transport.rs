//! Transport abstraction for Jira REST calls
//!
//! The workflow scheme client only shapes requests. Everything that touches
//! the network (URL prefixing, authentication, sending, parsing) sits behind
//! [`JiraTransport`] so it can be swapped for a mock in tests.

use async_trait::async_trait;
use reqwest::{header, redirect, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::errors::JiraError;
use super::request::{HttpMethod, RequestDescriptor};
use crate::config::JiraConfig;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

const MAX_REDIRECTS: usize = 10;

/// Successful response from Jira
#[derive(Debug, Clone, PartialEq)]
pub struct JiraResponse {
    pub status: u16,
    pub body: Value,
}

impl JiraResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Deserialize the response body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, JiraError> {
        serde_json::from_value(self.body.clone()).map_err(|e| JiraError::InvalidResponse {
            message: format!("Failed to decode response body: {e}"),
        })
    }
}

/// Collaborator that performs the actual network I/O.
///
/// `make_request` resolves exactly once per call, with either the parsed
/// response or the error the transport observed.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait JiraTransport: Send + Sync {
    /// Prefix an API-relative path (e.g. `/workflowscheme/1`) with the service base
    fn build_url(&self, path: &str) -> String;

    async fn make_request(&self, descriptor: RequestDescriptor) -> Result<JiraResponse, JiraError>;
}

/// Credentials attached to every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Basic { username: String, token: String },
    Bearer(String),
}

/// Default transport over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    api_root: String,
    auth: Auth,
    http: Client,
    http_no_redirect: Client,
    user_agent: String,
}

impl HttpTransport {
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        config.validate()?;

        let timeout = Duration::from_secs(config.timeout_seconds);
        let http = build_client(timeout, redirect::Policy::limited(MAX_REDIRECTS))?;
        let http_no_redirect = build_client(timeout, redirect::Policy::none())?;

        Ok(Self {
            api_root: api_root(config),
            auth: config.auth(),
            http,
            http_no_redirect,
            user_agent: format!("jira-ws/{}; {}", env!("CARGO_PKG_VERSION"), std::env::consts::OS),
        })
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }
}

fn build_client(timeout: Duration, policy: redirect::Policy) -> Result<Client, JiraError> {
    let mut default_headers = header::HeaderMap::new();
    default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .default_headers(default_headers)
        .timeout(timeout)
        .redirect(policy)
        .build()?)
}

/// `{base_url}/{path_prefix}rest/api/{api_version}`
fn api_root(config: &JiraConfig) -> String {
    let base = config.base_url.trim_end_matches('/');
    let prefix = config.path_prefix.trim_matches('/');
    let version = config.api_version.trim_matches('/');

    if prefix.is_empty() {
        format!("{base}/rest/api/{version}")
    } else {
        format!("{base}/{prefix}/rest/api/{version}")
    }
}

#[async_trait]
impl JiraTransport for HttpTransport {
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    async fn make_request(&self, descriptor: RequestDescriptor) -> Result<JiraResponse, JiraError> {
        let client = if descriptor.follow_all_redirects {
            &self.http
        } else {
            &self.http_no_redirect
        };

        debug!(method = %descriptor.method, uri = %descriptor.uri, "sending Jira request");

        let mut request = client
            .request(descriptor.method.into(), &descriptor.uri)
            .header(header::USER_AGENT, &self.user_agent);

        let query = descriptor.query_pairs();
        if !query.is_empty() {
            request = request.query(&query);
        }

        request = match &self.auth {
            Auth::None => request,
            Auth::Basic { username, token } => request.basic_auth(username, Some(token)),
            Auth::Bearer(token) => request.bearer_auth(token),
        };

        let skip_body = descriptor.method == HttpMethod::Get && descriptor.has_empty_body();
        if !skip_body {
            request = if descriptor.json {
                request.json(&descriptor.body)
            } else {
                request.body(descriptor.body.to_string())
            };
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(status, bytes = text.len(), "received Jira response");

        if status >= 300 {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(JiraError::api(status, body));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else if descriptor.json {
            serde_json::from_str(&text).map_err(|e| JiraError::InvalidResponse {
                message: format!("Expected JSON from {}: {e}", descriptor.uri),
            })?
        } else {
            Value::String(text)
        };

        Ok(JiraResponse { status, body })
    }
}
