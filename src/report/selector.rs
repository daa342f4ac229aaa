//! Keeps anomalous records. Input is already in source order, so no re-sort.

use super::{AnomalyReport, ScoredRecord};

pub fn select_anomalies(scored: &[ScoredRecord]) -> AnomalyReport {
    AnomalyReport {
        entries: scored
            .iter()
            .filter(|s| s.flag.is_anomaly())
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVector;
    use crate::model::OutlierFlag;
    use crate::parser::LogRecord;
    use crate::report::Outcome;
    use chrono::{TimeZone, Utc};

    fn scored(idx: usize, flag: OutlierFlag) -> ScoredRecord {
        ScoredRecord {
            record: LogRecord {
                timestamp: Utc.with_ymd_and_hms(2023, 10, 27, 10, 0, 0).unwrap(),
                severity: "INFO".into(),
                message: format!("line {idx}"),
                source_index: idx,
            },
            features: FeatureVector {
                severity_score: 1.0,
                message_length: 6,
                timestamp_epoch: None,
            },
            anomaly_score: Some(0.5),
            flag,
        }
    }

    #[test]
    fn keeps_order_and_anomalies_only() {
        let batch = vec![
            scored(0, OutlierFlag::Normal),
            scored(2, OutlierFlag::Anomaly),
            scored(3, OutlierFlag::Normal),
            scored(7, OutlierFlag::Anomaly),
        ];
        let report = select_anomalies(&batch);
        assert_eq!(report.source_indices(), vec![2, 7]);
        assert_eq!(Outcome::classify(batch.len(), &report), Outcome::AnomaliesFound(2));
    }

    #[test]
    fn empty_selection_is_no_anomalies() {
        let report = select_anomalies(&[scored(0, OutlierFlag::Normal)]);
        assert!(report.is_empty());
        assert_eq!(Outcome::classify(1, &report), Outcome::NoAnomalies);
        assert_eq!(Outcome::classify(0, &report), Outcome::NoValidRecords);
    }
}
