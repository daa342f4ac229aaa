//! Plain-text rendering of an anomaly report.

use super::AnomalyReport;
use std::io::Write;

pub fn render_table(report: &AnomalyReport, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        w,
        "{:>6}  {:<19}  {:<8}  {:>6}  message",
        "line", "timestamp", "severity", "score"
    )?;
    for entry in report.iter() {
        let score = entry
            .anomaly_score
            .map(|s| format!("{s:.3}"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            w,
            "{:>6}  {:<19}  {:<8}  {:>6}  {}",
            entry.record.source_index + 1,
            entry.record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            entry.record.severity,
            score,
            entry.record.message
        )?;
    }
    Ok(())
}
