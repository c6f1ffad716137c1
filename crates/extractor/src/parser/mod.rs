//! Access-log parsing and normalization module
//!
//! Converts raw Apache-style access log lines into structured,
//! typed log records.
//!
//! # Architecture
//!
//! - `model.rs`: record type, OS family, per-line parse errors
//! - `grammar.rs`: the fixed line grammar, compiled once and reused
//! - `os.rs`: user-agent operating-system classification
//! - `extract.rs`: extractor and lazy extraction iterator
//!
//! # Guarantees
//!
//! All parsing is per-line and panic-free: a line either yields a full
//! record or a [`ParseError`] the caller can skip over. No process-global
//! state; diagnostics go through an explicit [`DiagnosticSink`].

pub mod extract;
pub mod grammar;
pub mod model;
pub mod os;

// Re-export commonly used types
pub use extract::{DiagnosticSink, ExtractAll, LogRecordExtractor, TracingDiagnostics};
pub use grammar::AccessLogGrammar;
pub use model::{LogRecord, OsFamily, ParseError};
