use serde_json::Value;
use thiserror::Error;

/// Errors reported by a [`JiraTransport`](super::transport::JiraTransport).
///
/// The workflow scheme client never constructs these itself; it hands back
/// whatever the transport produced.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("Jira API returned HTTP {status}: {}", display_messages(.messages))]
    Api {
        status: u16,
        messages: Vec<String>,
        body: Value,
    },
    #[error("Network error talking to Jira: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response from Jira: {message}")]
    InvalidResponse { message: String },
    #[error("Invalid Jira configuration: {0}")]
    InvalidConfig(String),
}

impl JiraError {
    /// Build an [`JiraError::Api`] from a non-success status and the parsed
    /// error document Jira sent back.
    pub fn api(status: u16, body: Value) -> Self {
        let messages = collect_error_messages(&body);
        JiraError::Api {
            status,
            messages,
            body,
        }
    }

    /// HTTP status of an API failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            JiraError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Flatten Jira's `{"errorMessages": [...], "errors": {field: msg}}` shape.
fn collect_error_messages(body: &Value) -> Vec<String> {
    let mut messages: Vec<String> = body
        .get("errorMessages")
        .and_then(|m| m.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|m| m.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    if let Some(errors) = body.get("errors").and_then(|e| e.as_object()) {
        for (field, message) in errors {
            match message.as_str() {
                Some(text) => messages.push(format!("{field}: {text}")),
                None => messages.push(format!("{field}: {message}")),
            }
        }
    }

    if messages.is_empty() {
        if let Some(text) = body.as_str().filter(|t| !t.is_empty()) {
            messages.push(text.to_string());
        }
    }

    messages
}

fn display_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        "no error details".to_string()
    } else {
        messages.join("; ")
    }
}
