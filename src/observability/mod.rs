//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → file
//! ```
//!
//! # Configuration
//!
//! The filter level is controlled by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`crate::Config`]
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```no_run
//! use propfolio::observability::init_tracing;
//! use propfolio::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("propfolio initialized");
//! ```

mod exporter;
mod init;

pub use exporter::JsonLinesExporter;
pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
