//! Scoring benchmark: feature matrix → isolation forest / z-score flags.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dadm_logscan::model::{IsolationForest, OutlierDetector, ZScoreDetector};
use ndarray::Array2;

fn make_matrix(n: usize, dim: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, dim), |(i, j)| ((i * 31 + j * 7) % 97) as f64)
}

fn bench_forest_default(c: &mut Criterion) {
    let forest = IsolationForest::default();
    let x = make_matrix(1000, 2);

    c.bench_function("iforest_1000x2", |b| {
        b.iter(|| forest.fit_and_score(black_box(&x), 0.1, 42))
    });
}

fn bench_forest_by_rows(c: &mut Criterion) {
    let forest = IsolationForest::default();

    let mut g = c.benchmark_group("iforest_by_rows");
    for n in [100, 1_000, 10_000] {
        let x = make_matrix(n, 3);
        g.bench_function(format!("rows_{}", n).as_str(), |b| {
            b.iter(|| forest.fit_and_score(black_box(&x), 0.1, 42))
        });
    }
    g.finish();
}

fn bench_zscore(c: &mut Criterion) {
    let x = make_matrix(10_000, 3);

    c.bench_function("zscore_10000x3", |b| {
        b.iter(|| ZScoreDetector.fit_and_score(black_box(&x), 0.1, 0))
    });
}

criterion_group!(benches, bench_forest_default, bench_forest_by_rows, bench_zscore);
criterion_main!(benches);
