//! Line parser: raw log lines → structured records.
//! Each line is tried against an ordered list of layouts; the first that extracts wins.
//! Lines that fit no layout, or whose timestamp does not parse, are dropped and counted.

mod bracketed;
mod timestamp;
mod whitespace;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use timestamp::parse_timestamp;

/// One successfully parsed log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    /// Severity token as written in the line (without delimiters)
    pub severity: String,
    pub message: String,
    /// 0-based position of the line in the raw input
    pub source_index: usize,
}

/// Supported line layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// `2023-10-27 10:00:01 [ERROR] message` (also `()` / `<>`, optionally bracketed timestamp)
    Bracketed,
    /// `2023-10-27 10:00:01 ERROR message`
    Whitespace,
}

/// Fields cut out of a line, before timestamp normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub timestamp: &'a str,
    pub severity: &'a str,
    pub message: &'a str,
}

impl LayoutKind {
    pub fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        match self {
            LayoutKind::Bracketed => bracketed::extract(line),
            LayoutKind::Whitespace => whitespace::extract(line),
        }
    }
}

/// Per-batch parse diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub total_lines: usize,
    pub parsed: usize,
    /// No layout matched
    pub malformed: usize,
    /// Layout matched but the timestamp did not parse
    pub bad_timestamp: usize,
}

impl ParseSummary {
    pub fn dropped(&self) -> usize {
        self.malformed + self.bad_timestamp
    }
}

pub struct LineParser {
    layouts: Vec<LayoutKind>,
}

impl LineParser {
    pub fn new(config: &crate::config::ParserConfig) -> Self {
        Self {
            layouts: config.layouts.clone(),
        }
    }

    /// Parse a single line. An `Err` means the line is dropped.
    pub fn parse_line(&self, line: &str, source_index: usize) -> Result<LogRecord, DropReason> {
        let line = line.trim();
        let fields = self
            .layouts
            .iter()
            .find_map(|layout| layout.extract(line))
            .ok_or(DropReason::Malformed)?;
        let timestamp = parse_timestamp(fields.timestamp).ok_or(DropReason::BadTimestamp)?;
        Ok(LogRecord {
            timestamp,
            severity: fields.severity.to_string(),
            message: fields.message.to_string(),
            source_index,
        })
    }

    /// Parse a batch, preserving input order
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> (Vec<LogRecord>, ParseSummary) {
        let mut records = Vec::with_capacity(lines.len());
        let mut summary = ParseSummary {
            total_lines: lines.len(),
            ..ParseSummary::default()
        };

        for (idx, line) in lines.iter().enumerate() {
            match self.parse_line(line.as_ref(), idx) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!(line = idx, reason = reason.as_str(), "dropped log line");
                    match reason {
                        DropReason::Malformed => summary.malformed += 1,
                        DropReason::BadTimestamp => summary.bad_timestamp += 1,
                    }
                }
            }
        }
        summary.parsed = records.len();
        (records, summary)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Malformed,
    BadTimestamp,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::Malformed => "malformed",
            DropReason::BadTimestamp => "bad_timestamp",
        }
    }
}

/// Read a log file into lines. Invalid UTF-8 is replaced rather than rejected.
pub fn read_lines(path: &Path) -> Result<Vec<String>, std::io::Error> {
    let data = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&data)
        .lines()
        .map(String::from)
        .collect())
}
