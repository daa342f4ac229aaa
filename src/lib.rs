//! DADM log scan, unsupervised anomaly triage for line-oriented logs.
//!
//! Modular structure:
//! - [`parser`]: Raw lines → timestamped, leveled records
//! - [`features`]: Severity / length / time feature vectors
//! - [`model`]: Isolation forest (and z-score) outlier detection
//! - [`report`]: Anomaly selection and batch outcome
//! - [`analyzer`]: Runs the stages once over a batch
//! - [`logging`]: Structured logging and NDJSON output

pub mod config;
pub mod parser;
pub mod features;
pub mod model;
pub mod report;
pub mod analyzer;
pub mod logging;

pub use config::{AnalyzerConfig, ConfigError};
pub use parser::{LogRecord, LineParser, ParseSummary};
pub use features::{FeatureVector, FeatureExtractor};
pub use model::{IsolationForest, OutlierDetector, OutlierFlag};
pub use report::{AnomalyReport, Outcome, ScoredRecord};
pub use analyzer::{Analysis, Analyzer};
pub use logging::StructuredLogger;
