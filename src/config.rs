//! Analyzer configuration. Every section has defaults; a JSON file may override any subset.

use crate::parser::LayoutKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("contamination must be within (0, 1), got {0}")]
    ContaminationOutOfRange(f64),
    #[error("isolation forest needs at least one tree")]
    NoTrees,
    #[error("max_samples must be at least 2, got {0}")]
    SampleSizeTooSmall(usize),
    #[error("min_batch must be at least 2, got {0}")]
    MinBatchTooSmall(usize),
    #[error("parser needs at least one line layout")]
    NoLayouts,
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Line layouts, tried in order
    pub parser: ParserConfig,
    /// Feature derivation switches
    pub features: FeaturesConfig,
    /// Outlier detector parameters
    pub model: ModelConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub layouts: Vec<LayoutKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Add seconds-since-epoch as a third scoring dimension
    pub include_temporal: bool,
    /// WARN/FATAL/ERR/... share the score of their canonical level.
    /// When false only INFO, WARNING, ERROR and CRITICAL are recognised.
    pub severity_synonyms: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    IsolationForest,
    Zscore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub detector: DetectorKind,
    /// Expected anomalous fraction of a batch (0.0–1.0, exclusive)
    pub contamination: f64,
    /// RNG seed; identical input + seed gives identical flags
    pub seed: u64,
    pub n_trees: usize,
    /// Rows sampled per tree (capped at batch size)
    pub max_samples: usize,
    /// Batches smaller than this are not scored
    pub min_batch: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            layouts: vec![LayoutKind::Bracketed, LayoutKind::Whitespace],
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            include_temporal: false,
            severity_synonyms: true,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            detector: DetectorKind::IsolationForest,
            contamination: 0.1,
            seed: 42,
            n_trees: 100,
            max_samples: 256,
            min_batch: 2,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AnalyzerConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config not found; using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = self.model.contamination;
        if !(c > 0.0 && c < 1.0) {
            return Err(ConfigError::ContaminationOutOfRange(c));
        }
        if self.model.n_trees == 0 {
            return Err(ConfigError::NoTrees);
        }
        if self.model.max_samples < 2 {
            return Err(ConfigError::SampleSizeTooSmall(self.model.max_samples));
        }
        if self.model.min_batch < 2 {
            return Err(ConfigError::MinBatchTooSmall(self.model.min_batch));
        }
        if self.parser.layouts.is_empty() {
            return Err(ConfigError::NoLayouts);
        }
        Ok(())
    }
}
