//! Tracing initialization and subscriber setup.
//!
//! This module wires `tracing` spans through OpenTelemetry into the JSON-lines
//! span file in the configured data directory.

use super::exporter::{self, JsonLinesExporter};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "propfolio";

/// File name of the span log inside the data directory.
pub const TRACE_FILE_NAME: &str = "propfolio-spans.jsonl";

/// Picks the filter directive: `RUST_LOG`, then the configured level, then `info`.
fn resolve_level(config: &Config) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the global tracing subscriber with file-based span export.
///
/// Spans are written to `<data_dir>/propfolio-spans.jsonl`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns without installing anything if the directory cannot be created
/// - Idempotent: only the first call installs a subscriber
pub fn init_tracing(config: &Config) {
    let level = resolve_level(config);

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let exporter = JsonLinesExporter::new(config.data_dir.join(TRACE_FILE_NAME), SERVICE_NAME);
    let provider = exporter::create_tracer_provider(exporter, resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer));

    if subscriber.try_init().is_ok() {
        tracing::debug!(data_dir = ?config.data_dir, "tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used_without_env_override() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };

        let level = resolve_level(&config);
        match std::env::var("RUST_LOG") {
            Ok(env) if !env.trim().is_empty() => assert_eq!(level, env),
            _ => assert_eq!(level, "debug"),
        }
    }
}
