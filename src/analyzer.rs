//! One-shot batch analysis: lines → records → features → flags → anomaly report.

use crate::config::{AnalyzerConfig, ConfigError};
use crate::features::{to_matrix, FeatureExtractor};
use crate::model::{build_detector, OutlierDetector, OutlierFlag};
use crate::parser::{LineParser, ParseSummary};
use crate::report::{select_anomalies, AnomalyReport, Outcome, ScoredRecord};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Everything produced for one batch
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub outcome: Outcome,
    pub summary: ParseSummary,
    /// Every surviving record with its verdict, in source order
    pub scored: Vec<ScoredRecord>,
    pub report: AnomalyReport,
    /// Detector that produced the flags; `None` if scoring was skipped
    pub detector: Option<&'static str>,
}

pub struct Analyzer {
    config: AnalyzerConfig,
    parser: LineParser,
    features: FeatureExtractor,
    detector: Box<dyn OutlierDetector>,
}

impl Analyzer {
    /// Validates the config before anything else is built
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        let detector = build_detector(&config.model);
        Self::with_detector(config, detector)
    }

    pub fn with_detector(
        config: AnalyzerConfig,
        detector: Box<dyn OutlierDetector>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            parser: LineParser::new(&config.parser),
            features: FeatureExtractor::new(config.features.clone()),
            detector,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Whether a batch of `n` records is large enough to score. Below `min_batch`,
    /// or when `contamination * n < 1` (no anomaly fits the budget), it is not.
    pub fn can_score(&self, n: usize) -> bool {
        n >= self.config.model.min_batch && self.config.model.contamination * n as f64 >= 1.0
    }

    pub fn analyze<S: AsRef<str>>(&self, lines: &[S]) -> Analysis {
        let (records, summary) = self.parser.parse(lines);

        if records.is_empty() {
            info!(total = summary.total_lines, "no valid log entries");
            return Analysis {
                outcome: Outcome::NoValidRecords,
                summary,
                scored: Vec::new(),
                report: AnomalyReport::default(),
                detector: None,
            };
        }

        let vectors = self.features.extract(&records);
        let n = vectors.len();

        let (scores, detector) = if self.can_score(n) {
            let matrix = to_matrix(&vectors, self.features.dim());
            let model = &self.config.model;
            let out = self
                .detector
                .fit_and_score(&matrix, model.contamination, model.seed);
            if out.scores.len() == n && out.flags.len() == n {
                debug!(threshold = out.threshold, "scored batch");
                (Some(out), Some(self.detector.name()))
            } else {
                warn!(
                    detector = self.detector.name(),
                    expected = n,
                    scores = out.scores.len(),
                    flags = out.flags.len(),
                    "detector output does not cover the batch; all normal"
                );
                (None, None)
            }
        } else {
            debug!(records = n, "batch too small to score; all normal");
            (None, None)
        };

        let scored: Vec<ScoredRecord> = records
            .into_iter()
            .zip(vectors)
            .enumerate()
            .map(|(i, (record, features))| ScoredRecord {
                record,
                features,
                anomaly_score: scores.as_ref().map(|s| s.scores[i]),
                flag: scores
                    .as_ref()
                    .map_or(OutlierFlag::Normal, |s| s.flags[i]),
            })
            .collect();

        let report = select_anomalies(&scored);
        let outcome = Outcome::classify(summary.parsed, &report);
        info!(
            parsed = summary.parsed,
            dropped = summary.dropped(),
            anomalies = report.len(),
            detector = detector.unwrap_or("none"),
            "batch analyzed"
        );

        Analysis {
            outcome,
            summary,
            scored,
            report,
            detector,
        }
    }
}
