//! DADM log scan entrypoint: read one log file, analyze it once, print the anomalies.

use clap::Parser;
use dadm_logscan::{
    analyzer::Analyzer,
    config::AnalyzerConfig,
    logging::{AnomalyLine, StructuredLogger},
    parser::read_lines,
    report::{render_table, Outcome},
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dadm-logscan")]
#[command(version)]
#[command(about = "Flag statistically unusual log lines with an isolation forest", long_about = None)]
struct Args {
    /// Log file to analyze
    #[arg(long, value_name = "FILE", default_value = "system_logs.txt")]
    file: PathBuf,

    /// JSON config (default: $DADM_CONFIG_PATH, then config.json)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Expected anomalous fraction, overrides config
    #[arg(long)]
    contamination: Option<f64>,

    /// Use the timestamp as a scoring feature
    #[arg(long)]
    temporal: bool,

    /// Print anomalies as NDJSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("DADM_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let mut config = AnalyzerConfig::load(&config_path)?;
    if let Some(c) = args.contamination {
        config.model.contamination = c;
    }
    if args.temporal {
        config.features.include_temporal = true;
    }

    let log_format = StructuredLogger::init(&config.log, args.json);

    let analyzer = Analyzer::new(config)?;
    let lines = read_lines(&args.file)
        .map_err(|e| format!("failed to read '{}': {}", args.file.display(), e))?;
    info!(
        file = %args.file.display(),
        lines = lines.len(),
        ?log_format,
        "analyzing log file"
    );

    let analysis = analyzer.analyze(&lines);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match analysis.outcome {
        Outcome::NoValidRecords => writeln!(out, "No valid log entries found.")?,
        Outcome::NoAnomalies => writeln!(out, "No anomalies detected.")?,
        Outcome::AnomaliesFound(n) => {
            if args.json {
                for entry in analysis.report.iter() {
                    StructuredLogger::emit_json(&AnomalyLine::from(entry), &mut out)?;
                }
            } else {
                writeln!(out, "Detected {} anomalies:", n)?;
                render_table(&analysis.report, &mut out)?;
            }
        }
    }

    Ok(())
}
