//! Scored records, anomaly selection and the batch outcome handed to the caller.

mod render;
mod selector;

pub use render::render_table;
pub use selector::select_anomalies;

use crate::features::FeatureVector;
use crate::model::OutlierFlag;
use crate::parser::LogRecord;
use serde::{Deserialize, Serialize};

/// A parsed record with its features and verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: LogRecord,
    pub features: FeatureVector,
    /// `None` when the batch was too small to score
    pub anomaly_score: Option<f64>,
    pub flag: OutlierFlag,
}

/// Anomalous records in ascending `source_index` order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub entries: Vec<ScoredRecord>,
}

impl AnomalyReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredRecord> {
        self.entries.iter()
    }

    pub fn source_indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.record.source_index).collect()
    }
}

/// Terminal condition of one batch; rendering and exit codes are up to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "count", rename_all = "snake_case")]
pub enum Outcome {
    NoValidRecords,
    NoAnomalies,
    AnomaliesFound(usize),
}

impl Outcome {
    pub fn classify(parsed: usize, report: &AnomalyReport) -> Self {
        if parsed == 0 {
            Outcome::NoValidRecords
        } else if report.is_empty() {
            Outcome::NoAnomalies
        } else {
            Outcome::AnomaliesFound(report.len())
        }
    }
}
