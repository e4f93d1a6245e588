//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → coinpane-otlp.json
//! ```
//!
//! The plugin sandbox has no network path to a collector, so finished spans are
//! written as OTLP JSON lines under `~/.local/share/zellij/coinpane/`. The file
//! rotates at 10 MB into `.1`, `.2` and `.3` backups.
//!
//! The level comes from the `trace_level` plugin option (default `info`) and
//! accepts any `EnvFilter` directive, e.g. `coinpane=debug`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE_NAME};
