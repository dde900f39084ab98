use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{RegressErr, Result};

/// Owned train/test partition of a supervised dataset.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Shuffles the samples with a seeded rng and splits off a test fraction.
///
/// # Args
/// * `x` - Feature matrix with one row per sample.
/// * `y` - Target values, one per row of `x`.
/// * `test_size` - Fraction of samples in the test split, in (0, 1).
/// * `seed` - Seed for the shuffle; equal seeds give equal splits.
///
/// # Errors
/// Returns `RegressErr::ShapeMismatch` when `x` and `y` disagree on the
/// sample count, `RegressErr::InvalidParam` for a test fraction outside
/// (0, 1), and `RegressErr::EmptyInput` when either split would be empty.
pub fn train_test_split(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    test_size: f64,
    seed: u64,
) -> Result<Split> {
    let n = x.nrows();
    if y.len() != n {
        return Err(RegressErr::ShapeMismatch {
            what: "targets",
            got: y.len(),
            expected: n,
        });
    }
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(RegressErr::InvalidParam("test_size must be in (0, 1)"));
    }

    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(RegressErr::EmptyInput("train or test split"));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(Split {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2};

    use super::*;

    fn sample_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 2), |(i, j)| (i * 2 + j) as f64);
        let y = Array1::from_shape_fn(n, |i| i as f64);
        (x, y)
    }

    #[test]
    fn split_sizes() {
        let (x, y) = sample_data(35);
        let split = train_test_split(x.view(), y.view(), 0.2, 42).unwrap();

        assert_eq!(split.x_train.nrows(), 28);
        assert_eq!(split.x_test.nrows(), 7);
        assert_eq!(split.y_train.len(), 28);
        assert_eq!(split.y_test.len(), 7);
    }

    #[test]
    fn same_seed_same_split() {
        let (x, y) = sample_data(20);
        let a = train_test_split(x.view(), y.view(), 0.25, 7).unwrap();
        let b = train_test_split(x.view(), y.view(), 0.25, 7).unwrap();

        assert_eq!(a.y_test, b.y_test);
        assert_eq!(a.x_train, b.x_train);
    }

    #[test]
    fn splits_are_disjoint_and_complete() {
        let (x, y) = sample_data(10);
        let split = train_test_split(x.view(), y.view(), 0.3, 1).unwrap();

        let mut seen: Vec<f64> = split
            .y_train
            .iter()
            .chain(split.y_test.iter())
            .copied()
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());

        assert_eq!(seen, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_bad_test_size() {
        let (x, y) = sample_data(10);
        assert!(train_test_split(x.view(), y.view(), 0.0, 1).is_err());
        assert!(train_test_split(x.view(), y.view(), 1.0, 1).is_err());
    }
}
