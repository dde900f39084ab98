use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{RegressErr, Result, model::Regressor};

/// Hyperparameters for [`RandomForestRegressor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    /// The demo forest: 15 shallow trees.
    fn default() -> Self {
        Self {
            n_trees: 15,
            max_depth: 8,
            min_samples_split: 3,
            seed: 42,
        }
    }
}

/// One node of a fitted regression tree.
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, row: ArrayView1<f64>) -> f64 {
        match self {
            Node::Leaf { value } => *value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Bagged ensemble of CART regression trees.
///
/// Each tree is fit on a bootstrap resample with a seed derived from the
/// base seed, splits minimize the summed squared error over all features,
/// and predictions average the trees. Trees are grown in parallel.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    cfg: ForestConfig,
    trees: Vec<Node>,
    n_features: usize,
}

impl RandomForestRegressor {
    /// Creates an unfitted forest with the default demo hyperparameters.
    pub fn new() -> Self {
        Self::with_config(ForestConfig::default())
    }

    /// Creates an unfitted forest with explicit hyperparameters.
    pub fn with_config(cfg: ForestConfig) -> Self {
        Self {
            cfg,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    /// Grows one tree over the samples named by `indices`.
    fn grow(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, indices: Vec<usize>, depth: usize) -> Node {
        let sum: f64 = indices.iter().map(|&i| y[i]).sum();
        let mean = sum / indices.len() as f64;

        if depth >= self.cfg.max_depth || indices.len() < self.cfg.min_samples_split {
            return Node::Leaf { value: mean };
        }

        let Some((feature, threshold)) = best_split(x, y, &indices) else {
            return Node::Leaf { value: mean };
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| x[(i, feature)] <= threshold);

        if left_idx.is_empty() || right_idx.is_empty() {
            return Node::Leaf { value: mean };
        }

        Node::Split {
            feature,
            threshold,
            left: Box::new(self.grow(x, y, left_idx, depth + 1)),
            right: Box::new(self.grow(x, y, right_idx, depth + 1)),
        }
    }
}

/// Finds the (feature, threshold) pair with the lowest post-split summed
/// squared error, or `None` when no feature separates the samples.
fn best_split(x: ArrayView2<f64>, y: ArrayView1<f64>, indices: &[usize]) -> Option<(usize, f64)> {
    let n = indices.len();
    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..x.ncols() {
        let mut order: Vec<usize> = indices.to_vec();
        order.sort_by(|&a, &b| {
            x[(a, feature)]
                .partial_cmp(&x[(b, feature)])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Prefix sums over the sorted order make every split O(1).
        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        let mut total_sum = 0.0;
        let mut total_sq = 0.0;
        for &i in &order {
            total_sum += y[i];
            total_sq += y[i] * y[i];
        }

        for k in 1..n {
            let prev = order[k - 1];
            left_sum += y[prev];
            left_sq += y[prev] * y[prev];

            let v_prev = x[(prev, feature)];
            let v_next = x[(order[k], feature)];
            if v_prev == v_next {
                continue;
            }

            let left_n = k as f64;
            let right_n = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;

            let sse = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.is_none_or(|(_, _, best_sse)| sse < best_sse) {
                best = Some((feature, (v_prev + v_next) / 2.0, sse));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        if x.nrows() == 0 {
            return Err(RegressErr::EmptyInput("feature matrix"));
        }
        if y.len() != x.nrows() {
            return Err(RegressErr::ShapeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }
        if self.cfg.n_trees == 0 {
            return Err(RegressErr::InvalidParam("n_trees must be > 0"));
        }

        let n = x.nrows();
        self.n_features = x.ncols();
        self.trees = (0..self.cfg.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(self.cfg.seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
                self.grow(x, y, bootstrap, 0)
            })
            .collect();

        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(RegressErr::NotFitted {
                what: "random forest",
            });
        }
        if x.ncols() != self.n_features {
            return Err(RegressErr::ShapeMismatch {
                what: "columns",
                got: x.ncols(),
                expected: self.n_features,
            });
        }

        let mut out = Array1::zeros(x.nrows());
        for (i, row) in x.rows().into_iter().enumerate() {
            let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
            out[i] = total / self.trees.len() as f64;
        }

        Ok(out)
    }
}
