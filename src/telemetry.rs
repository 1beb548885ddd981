use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Initialize structured logging on stderr.
///
/// `RUST_LOG` wins over `default_level` when set. Stdout stays reserved for
/// command output.
pub fn init_telemetry(default_level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!("jira-ws telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the events of one request
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with the common attributes of a workflow scheme call
pub fn create_request_span(operation: &str, scheme_id: Option<&str>, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "workflow_scheme",
        operation = operation,
        scheme.id = scheme_id,
        correlation.id = correlation_id,
        otel.kind = "client"
    )
}
