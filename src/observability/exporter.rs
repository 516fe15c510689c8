//! OpenTelemetry span exporter writing JSON lines to a local file.
//!
//! Each finished span becomes one compact JSON object on its own line. When the
//! file grows past its size cap it is renamed to `<name>.jsonl.1` (replacing
//! any earlier backup) and a fresh file is started.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default size cap before the trace file is rolled (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Span exporter appending one JSON line per span.
#[derive(Debug)]
pub struct JsonLinesExporter {
    path: PathBuf,
    service_name: String,
    max_bytes: u64,
    /// Opened on first export.
    file: Option<File>,
    is_shutdown: bool,
}

impl JsonLinesExporter {
    #[must_use]
    pub fn new(path: PathBuf, service_name: impl Into<String>) -> Self {
        Self {
            path,
            service_name: service_name.into(),
            max_bytes: MAX_FILE_SIZE_BYTES,
            file: None,
            is_shutdown: false,
        }
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> std::io::Result<()> {
        self.roll_if_full()?;

        if self.file.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            self.file = Some(file);
        }

        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        for span in batch {
            writeln!(file, "{}", span_to_json(span, &self.service_name))?;
        }
        file.flush()
    }

    fn roll_if_full(&mut self) -> std::io::Result<()> {
        let too_big = fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes);
        if too_big {
            self.file = None;
            fs::rename(&self.path, self.path.with_extension("jsonl.1"))?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .write_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
        self.file = None;
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn span_to_json(span: &SpanData, service_name: &str) -> JsonValue {
    let attributes: Map<String, JsonValue> = span
        .attributes
        .iter()
        .map(|kv| (kv.key.to_string(), JsonValue::String(kv.value.to_string())))
        .collect();

    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    let status = match &span.status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    };

    let start = unix_nanos(span.start_time);
    let end = unix_nanos(span.end_time);

    json!({
        "service": service_name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "startUnixNano": start,
        "durationNanos": end.saturating_sub(start),
        "attributes": attributes,
        "status": status,
    })
}

/// Builds a tracer provider that exports every finished span immediately.
pub fn create_tracer_provider(exporter: JsonLinesExporter, resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
