//! Tracing with local file export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter
//!                                                              → carlot-spans.jsonl
//! ```
//!
//! Each finished span becomes one JSON line (see [`span_record`]). The file
//! rotates at 10 MB and keeps three numbered backups.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! [`Config::trace_level`](crate::Config::trace_level).

mod file_writer;
mod init;
pub mod span_record;
mod tracer;

pub use init::{init_tracing, SPAN_FILE};
