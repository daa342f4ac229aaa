//! Pipeline benchmark: raw lines → records → feature vectors → full analysis.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dadm_logscan::analyzer::Analyzer;
use dadm_logscan::config::{AnalyzerConfig, FeaturesConfig, ParserConfig};
use dadm_logscan::features::FeatureExtractor;
use dadm_logscan::parser::LineParser;

fn make_dummy_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 50 {
            0 => format!("2023-10-27 10:{:02}:{:02} [ERROR] worker {} crashed: exit status 137", (i / 60) % 60, i % 60, i),
            7 => "not a log line at all".to_string(),
            _ => format!("2023-10-27 10:{:02}:{:02} INFO request {} served in {}ms", (i / 60) % 60, i % 60, i, i % 17),
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let parser = LineParser::new(&ParserConfig::default());
    let lines = make_dummy_lines(1000);

    c.bench_function("parse_1000_lines", |b| b.iter(|| black_box(parser.parse(black_box(&lines)))));
}

fn bench_feature_extraction(c: &mut Criterion) {
    let parser = LineParser::new(&ParserConfig::default());
    let (records, _) = parser.parse(&make_dummy_lines(1000));
    let extractor = FeatureExtractor::new(FeaturesConfig {
        include_temporal: true,
        severity_synonyms: true,
    });

    c.bench_function("feature_extract_1000_records", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&records))))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
    let lines = make_dummy_lines(1000);

    c.bench_function("full_pipeline_1000_lines", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&lines))))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_feature_extraction,
    bench_full_pipeline
);
criterion_main!(benches);
