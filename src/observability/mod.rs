//! OpenTelemetry tracing with spans exported to a local JSON file.
//!
//! Zellij plugins run sandboxed in WASM and cannot reach a collector, so spans
//! are serialized as OTLP JSON and appended to a rotating file instead:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → zatalog-otlp.json
//! ```
//!
//! The file lives in the plugin data directory
//! (`~/.local/share/zellij/zatalog/zatalog-otlp.json`). It rotates past 10 MiB
//! and keeps three backups.
//!
//! The filter comes from the `trace_level` plugin option and defaults to
//! `"info"`. Both the plugin and its worker call [`init_tracing`]; each thread
//! initializes once and later calls are no-ops.
//!
//! ```rust,no_run
//! use zatalog::observability::init_tracing;
//! use zatalog::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("catalog ready");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
