//! Tracer provider whose exporter appends OTLP JSON lines to a file.

use super::file_writer::FileWriter;
use super::span_formatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Span exporter writing one OTLP document per exported batch.
#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    resource: Resource,
    stopped: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let document = span_formatter::format_batch(&self.resource, &batch);
            self.writer
                .write_line(&document.to_string())
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span immediately to
/// `file_path`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: FileWriter::new(file_path),
        resource: resource.clone(),
        stopped: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
