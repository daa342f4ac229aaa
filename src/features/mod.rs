//! Numeric feature derivation from parsed log records.

mod pipeline;
mod severity;

pub use pipeline::{to_matrix, FeatureExtractor};
pub use severity::{Severity, SeverityVocabulary, UNKNOWN_SEVERITY_SCORE};

use serde::{Deserialize, Serialize};

/// Fixed-dimension encoding of one record. Within a batch either every vector
/// carries `timestamp_epoch` or none does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub severity_score: f64,
    pub message_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_epoch: Option<i64>,
}

impl FeatureVector {
    pub fn dim(&self) -> usize {
        if self.timestamp_epoch.is_some() {
            3
        } else {
            2
        }
    }

    /// Column order: severity, length, epoch
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = vec![self.severity_score, self.message_length as f64];
        if let Some(epoch) = self.timestamp_epoch {
            row.push(epoch as f64);
        }
        row
    }
}
