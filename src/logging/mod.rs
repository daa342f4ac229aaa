//! Structured logging setup and NDJSON anomaly output.

mod format;

pub use format::{AnomalyLine, LogFormat, StructuredLogger};
