//! Diagnostics go to stderr through tracing; anomaly output can be NDJSON on stdout.

use crate::config::LogConfig;
use crate::report::ScoredRecord;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// How diagnostics are rendered on stderr for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text { ansi: bool },
}

impl LogFormat {
    /// An NDJSON report on stdout forces JSON diagnostics, so a consumer that
    /// merges both streams only ever sees JSON lines.
    pub fn for_run(log: &LogConfig, ndjson_report: bool, stderr_is_terminal: bool) -> Self {
        if log.json || ndjson_report {
            LogFormat::Json
        } else {
            LogFormat::Text {
                ansi: stderr_is_terminal,
            }
        }
    }
}

/// One anomaly as a single JSON line
#[derive(Debug, Serialize)]
pub struct AnomalyLine<'a> {
    pub ts: String,
    pub severity: &'a str,
    /// 1-based line number in the input file
    pub line: usize,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl<'a> From<&'a ScoredRecord> for AnomalyLine<'a> {
    fn from(s: &'a ScoredRecord) -> Self {
        Self {
            ts: s.record.timestamp.to_rfc3339(),
            severity: &s.record.severity,
            line: s.record.source_index + 1,
            message: &s.record.message,
            score: s.anomaly_score,
        }
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber on stderr. Level comes from RUST_LOG, else `log.level`.
    pub fn init(log: &LogConfig, ndjson_report: bool) -> LogFormat {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
        let format = LogFormat::for_run(log, ndjson_report, std::io::stderr().is_terminal());
        match format {
            LogFormat::Json => {
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::NONE)
                    .with_current_span(false)
                    .with_writer(std::io::stderr);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
            LogFormat::Text { ansi } => {
                let layer = tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr);
                tracing_subscriber::registry().with(filter).with(layer).init();
            }
        }
        format
    }

    /// Write one JSON object per line, bypassing tracing
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
