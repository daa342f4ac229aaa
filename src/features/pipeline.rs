//! Feature pipeline: records → feature vectors → matrix for the outlier model.

use super::{FeatureVector, SeverityVocabulary};
use crate::config::FeaturesConfig;
use crate::parser::LogRecord;
use ndarray::Array2;

pub struct FeatureExtractor {
    config: FeaturesConfig,
    vocabulary: SeverityVocabulary,
}

impl FeatureExtractor {
    pub fn new(config: FeaturesConfig) -> Self {
        let vocabulary = SeverityVocabulary::new(config.severity_synonyms);
        Self { config, vocabulary }
    }

    /// Number of columns every vector from this extractor has
    pub fn dim(&self) -> usize {
        if self.config.include_temporal {
            3
        } else {
            2
        }
    }

    pub fn vocabulary(&self) -> &SeverityVocabulary {
        &self.vocabulary
    }

    pub fn derive(&self, record: &LogRecord) -> FeatureVector {
        FeatureVector {
            severity_score: self.vocabulary.score(&record.severity),
            message_length: record.message.chars().count(),
            timestamp_epoch: self
                .config
                .include_temporal
                .then(|| record.timestamp.timestamp()),
        }
    }

    /// One vector per record, same order
    pub fn extract(&self, records: &[LogRecord]) -> Vec<FeatureVector> {
        records.iter().map(|r| self.derive(r)).collect()
    }
}

/// Stack vectors into an `n × dim` matrix. Missing columns (never produced by a
/// single extractor) read as 0.
pub fn to_matrix(vectors: &[FeatureVector], dim: usize) -> Array2<f64> {
    let rows: Vec<Vec<f64>> = vectors.iter().map(FeatureVector::to_row).collect();
    Array2::from_shape_fn((rows.len(), dim), |(i, j)| {
        rows[i].get(j).copied().unwrap_or(0.0)
    })
}
