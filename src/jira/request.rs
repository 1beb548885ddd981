use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// HTTP methods used by the workflow scheme endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// Normalized description of a single Jira REST call.
///
/// Produced by the workflow scheme client and consumed by a transport. Every
/// descriptor owns fresh `body` and `qs` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub uri: String,
    pub method: HttpMethod,
    pub body: Value,
    pub qs: Map<String, Value>,
    pub follow_all_redirects: bool,
    pub json: bool,
}

impl RequestDescriptor {
    pub fn new(uri: String, method: HttpMethod) -> Self {
        Self {
            uri,
            method,
            body: Value::Object(Map::new()),
            qs: Map::new(),
            follow_all_redirects: true,
            json: true,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_query(mut self, qs: Map<String, Value>) -> Self {
        self.qs = qs;
        self
    }

    /// True when the body is the default `{}` and carries nothing worth sending
    pub fn has_empty_body(&self) -> bool {
        match &self.body {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Query entries as rendered on the wire. Null values are dropped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.qs
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.clone(), rendered))
            })
            .collect()
    }
}

/// Join list parameters the way Jira expects them: `a,b,c`.
///
/// Each entry is appended with a trailing comma and the final comma is
/// trimmed, so an empty list yields `""`. Entries are not escaped.
pub fn join_query_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut joined = String::new();
    for item in items {
        joined.push_str(item.as_ref());
        joined.push(',');
    }
    joined.pop();
    joined
}
