//! Unsupervised outlier detection over a batch feature matrix.
//! Detectors are fitted and applied in one call; nothing outlives the call.

mod iforest;
mod zscore;

pub use iforest::IsolationForest;
pub use zscore::ZScoreDetector;

use crate::config::{DetectorKind, ModelConfig};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierFlag {
    Normal,
    Anomaly,
}

impl OutlierFlag {
    pub fn is_anomaly(self) -> bool {
        self == OutlierFlag::Anomaly
    }
}

/// Per-row scores (higher = more anomalous), the cut used, and the resulting flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierScores {
    pub scores: Vec<f64>,
    pub threshold: f64,
    pub flags: Vec<OutlierFlag>,
}

impl OutlierScores {
    /// All-normal result for batches too small to separate
    pub fn all_normal(n: usize) -> Self {
        Self {
            scores: vec![0.0; n],
            threshold: f64::INFINITY,
            flags: vec![OutlierFlag::Normal; n],
        }
    }

    /// Flag rows whose score is strictly above the `1 - contamination` quantile.
    /// Ties at the cut stay normal, so the flagged count can differ from
    /// `contamination * n`.
    pub fn from_scores(scores: Vec<f64>, contamination: f64) -> Self {
        if scores.len() < 2 {
            return Self::all_normal(scores.len());
        }
        let threshold = quantile(&scores, 1.0 - contamination);
        let flags = scores
            .iter()
            .map(|&s| {
                if s > threshold {
                    OutlierFlag::Anomaly
                } else {
                    OutlierFlag::Normal
                }
            })
            .collect();
        Self {
            scores,
            threshold,
            flags,
        }
    }

    pub fn anomaly_count(&self) -> usize {
        self.flags.iter().filter(|f| f.is_anomaly()).count()
    }
}

/// Linear-interpolated quantile, `q` in [0, 1]
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Swappable scoring strategy: fit on the batch, score the same batch.
pub trait OutlierDetector: Send + Sync {
    fn name(&self) -> &'static str;

    /// `features` is `n × dim`; the returned vectors are index-aligned with its rows.
    fn fit_and_score(&self, features: &Array2<f64>, contamination: f64, seed: u64) -> OutlierScores;
}

/// Build the detector selected in config
pub fn build_detector(config: &ModelConfig) -> Box<dyn OutlierDetector> {
    match config.detector {
        DetectorKind::IsolationForest => {
            Box::new(IsolationForest::new(config.n_trees, config.max_samples))
        }
        DetectorKind::Zscore => Box::new(ZScoreDetector),
    }
}
