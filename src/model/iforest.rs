//! Isolation forest. Each tree recursively splits a row subsample on a random
//! feature at a random value; rows that isolate in few splits score high.
//! Score is 2^(-E[h(x)] / c(psi)), where psi is the per-tree sample size.

use super::{OutlierDetector, OutlierScores};
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{seq::index, Rng, SeedableRng};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful BST search over `n` points;
/// normalises depth so scores are comparable across sample sizes.
pub(crate) fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow(x: &Array2<f64>, rows: Vec<usize>, height_limit: usize, rng: &mut StdRng) -> Self {
        Self {
            root: grow_node(x, rows, 0, height_limit, rng),
        }
    }

    fn path_length(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split {
                    feature,
                    value,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *value { left } else { right };
                    depth += 1;
                }
            }
        }
    }
}

fn grow_node(
    x: &Array2<f64>,
    rows: Vec<usize>,
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= height_limit || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // Only features that still vary inside this node can split it
    let candidates: Vec<(usize, f64, f64)> = (0..x.ncols())
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(x[[r, f]]), hi.max(x[[r, f]]))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();
    if candidates.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    let value = rng.gen_range(lo..hi);
    let (left, right): (Vec<usize>, Vec<usize>) =
        rows.into_iter().partition(|&r| x[[r, feature]] <= value);

    Node::Split {
        feature,
        value,
        left: Box::new(grow_node(x, left, depth + 1, height_limit, rng)),
        right: Box::new(grow_node(x, right, depth + 1, height_limit, rng)),
    }
}

/// Seeded ensemble; identical matrix + seed gives identical scores
#[derive(Debug, Clone)]
pub struct IsolationForest {
    n_trees: usize,
    max_samples: usize,
}

impl IsolationForest {
    pub fn new(n_trees: usize, max_samples: usize) -> Self {
        Self {
            n_trees: n_trees.max(1),
            max_samples: max_samples.max(2),
        }
    }

    /// Anomaly score per row in (0, 1]
    pub fn score_samples(&self, x: &Array2<f64>, seed: u64) -> Vec<f64> {
        let n = x.nrows();
        if n < 2 {
            return vec![0.0; n];
        }
        let sample_size = self.max_samples.min(n);
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(seed);

        let trees: Vec<IsolationTree> = (0..self.n_trees)
            .map(|_| {
                let rows = index::sample(&mut rng, n, sample_size).into_vec();
                IsolationTree::grow(x, rows, height_limit, &mut rng)
            })
            .collect();

        let norm = average_path_length(sample_size);
        x.rows()
            .into_iter()
            .map(|row| {
                let mean_depth = trees.iter().map(|t| t.path_length(row)).sum::<f64>()
                    / trees.len() as f64;
                2f64.powf(-mean_depth / norm)
            })
            .collect()
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(100, 256)
    }
}

impl OutlierDetector for IsolationForest {
    fn name(&self) -> &'static str {
        "isolation_forest"
    }

    fn fit_and_score(&self, features: &Array2<f64>, contamination: f64, seed: u64) -> OutlierScores {
        if features.nrows() < 2 {
            return OutlierScores::all_normal(features.nrows());
        }
        OutlierScores::from_scores(self.score_samples(features, seed), contamination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutlierFlag;

    fn cluster_with_outlier() -> Array2<f64> {
        let mut data = Vec::new();
        for i in 0..30 {
            data.push(1.0);
            data.push(20.0 + (i % 3) as f64);
        }
        data.push(4.0);
        data.push(2000.0);
        Array2::from_shape_vec((31, 2), data).unwrap()
    }

    #[test]
    fn c_of_n() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // 2 * (ln 255 + gamma) - 2 * 255 / 256
        assert!((average_path_length(256) - 10.244_770_920_119_917).abs() < 1e-9);
    }

    #[test]
    fn outlier_scores_highest() {
        let x = cluster_with_outlier();
        let scores = IsolationForest::default().score_samples(&x, 42);
        let max_idx = scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_idx, 30);
        assert!(scores.iter().all(|&s| s > 0.0 && s <= 1.0));
    }

    #[test]
    fn same_seed_same_scores() {
        let x = cluster_with_outlier();
        let f = IsolationForest::default();
        assert_eq!(f.score_samples(&x, 7), f.score_samples(&x, 7));
    }

    #[test]
    fn identical_rows_never_flagged() {
        let x = Array2::from_elem((10, 2), 3.0);
        let out = IsolationForest::default().fit_and_score(&x, 0.1, 42);
        assert!(out.flags.iter().all(|f| *f == OutlierFlag::Normal));
    }

    #[test]
    fn flags_outlier() {
        let out = IsolationForest::default().fit_and_score(&cluster_with_outlier(), 0.1, 42);
        assert_eq!(out.flags[30], OutlierFlag::Anomaly);
    }
}
