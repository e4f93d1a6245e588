//! Tracer provider backed by a span exporter that writes OTLP JSON lines to a
//! rotating file.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter that appends OTLP JSON to a rotating file.
///
/// Each exported batch becomes one line holding a complete `resourceSpans`
/// document, so the file can be tailed or split without a parser state.
struct FileSpanExporter {
    /// Rotating trace file.
    writer: FileWriter,
    /// OTLP JSON formatter carrying the service resource.
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter writing through `writer`.
    ///
    /// # Parameters
    ///
    /// * `writer` - Rotating file the batches are appended to
    /// * `resource` - Resource metadata (service name, version) stamped on every batch
    const fn new(writer: FileWriter, resource: Resource) -> Self {
        Self {
            writer,
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes `batch` as a single OTLP JSON line.
    ///
    /// # Parameters
    ///
    /// * `batch` - Finished spans to export
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is written and flushed
    /// - `Err(TraceError)` if the exporter is shut down or the write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(future::ready(Err(TraceError::from(
                "coinpane exporter is shut down",
            ))));
        }

        let line = self.formatter.format_batch(&batch).to_string();
        let result = self
            .writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(future::ready(result))
    }

    /// Stops accepting batches.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every finished span synchronously to
/// `file_path`.
///
/// The plugin runs single-threaded inside the WASM sandbox, so the simple
/// exporter is used rather than a batch processor.
///
/// # Parameters
///
/// * `file_path` - Live trace file; rotated backups sit next to it
/// * `resource` - Resource metadata for the provider and the exported batches
///
/// # Returns
///
/// A `TracerProvider` ready to hand to `tracing_opentelemetry::layer`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(FileWriter::new(file_path), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
