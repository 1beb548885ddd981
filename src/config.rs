use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::jira::transport::Auth;
use crate::jira::JiraError;

pub const CONFIG_FILE: &str = "jira-ws.toml";
pub const ENV_PREFIX: &str = "JIRA_WS";

/// Main configuration structure for jira-ws
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JiraWsConfig {
    /// Jira connection settings
    pub jira: JiraConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    /// Site root, e.g. `https://example.atlassian.net`
    pub base_url: String,
    /// REST API version segment
    pub api_version: String,
    /// Context path for self-hosted installs (`jira` in `https://host/jira/rest/...`)
    pub path_prefix: String,
    /// Account used for basic auth
    pub username: Option<String>,
    /// API token or password (can be set via env var)
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_version: "2".to_string(),
            path_prefix: String::new(),
            username: None,
            token: None, // Will be read from env var
            timeout_seconds: 30,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl JiraConfig {
    /// Check that `base_url` is an absolute http(s) URL with a host
    pub fn validate(&self) -> Result<(), JiraError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            JiraError::InvalidConfig(format!("base_url '{}' is not a valid URL: {e}", self.base_url))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JiraError::InvalidConfig(format!(
                "base_url must use http or https; got '{}://'",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none() {
            return Err(JiraError::InvalidConfig("base_url must include a host".to_string()));
        }

        if self.timeout_seconds == 0 {
            return Err(JiraError::InvalidConfig("timeout_seconds must be greater than zero".to_string()));
        }

        Ok(())
    }

    /// Basic auth when both username and token are set, bearer for a bare token
    pub fn auth(&self) -> Auth {
        match (&self.username, &self.token) {
            (Some(username), Some(token)) => Auth::Basic {
                username: username.clone(),
                token: token.clone(),
            },
            (None, Some(token)) => Auth::Bearer(token.clone()),
            _ => Auth::None,
        }
    }
}

impl JiraWsConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. jira-ws.toml in the working directory
    /// 3. Environment variables (prefixed with JIRA_WS_, `__` between sections)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&JiraWsConfig::default()).context("serialize default configuration")?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .with_context(|| format!("read configuration from {}", path.display()))?;
        let mut jira_ws_config: JiraWsConfig = config.try_deserialize()?;

        // Token fallbacks for the common Jira variable names
        if jira_ws_config.jira.token.is_none() {
            if let Ok(token) = std::env::var("JIRA_API_TOKEN") {
                jira_ws_config.jira.token = Some(token);
            } else if let Ok(token) = std::env::var("JIRA_WS_JIRA_TOKEN") {
                jira_ws_config.jira.token = Some(token);
            }
        }

        Ok(jira_ws_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<JiraWsConfig, anyhow::Error>> = std::sync::LazyLock::new(|| {
    // Load .env file first
    let _ = JiraWsConfig::load_env_file();
    JiraWsConfig::load()
});

/// Get the global configuration
pub fn config() -> Result<&'static JiraWsConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}
