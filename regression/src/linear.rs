use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{RegressErr, Result, model::Regressor};

/// Relative Tikhonov damping applied to the normal-equation diagonal.
///
/// Keeps the system solvable when the design matrix has more columns than
/// rows, which happens for the degree-2 polynomial expansion on this
/// dataset's small training split.
const RIDGE: f64 = 1e-8;

/// Ordinary least squares fit through damped normal equations.
///
/// Weights are stored with the intercept at index 0; the bias column is
/// prepended internally, so callers pass plain feature matrices.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    weights: Option<Array1<f64>>,
}

impl LinearRegression {
    /// Creates an unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fitted weights (intercept first), if any.
    pub fn weights(&self) -> Option<&Array1<f64>> {
        self.weights.as_ref()
    }

    /// Prepends the bias column to a feature matrix.
    fn design_matrix(x: ArrayView2<f64>) -> Array2<f64> {
        let mut design = Array2::ones((x.nrows(), x.ncols() + 1));
        design.slice_mut(ndarray::s![.., 1..]).assign(&x);
        design
    }
}

impl Regressor for LinearRegression {
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

        let design = Self::design_matrix(x);
        let mut gram = design.t().dot(&design);
        let moment = design.t().dot(&y);

        let diag_mean = gram.diag().sum() / gram.nrows() as f64;
        let damping = RIDGE * diag_mean.max(1.0);
        for i in 0..gram.nrows() {
            gram[(i, i)] += damping;
        }

        self.weights = Some(solve(gram, moment)?);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let weights = self.weights.as_ref().ok_or(RegressErr::NotFitted {
            what: "linear regression",
        })?;
        if x.ncols() + 1 != weights.len() {
            return Err(RegressErr::ShapeMismatch {
                what: "columns",
                got: x.ncols(),
                expected: weights.len() - 1,
            });
        }

        Ok(Self::design_matrix(x).dot(weights))
    }
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
/// Returns `RegressErr::Singular` when no usable pivot remains.
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                a[(i, col)]
                    .abs()
                    .partial_cmp(&a[(j, col)].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or(RegressErr::Singular)?;

        if a[(pivot_row, col)].abs() < f64::EPSILON {
            return Err(RegressErr::Singular);
        }

        if pivot_row != col {
            let (mut upper, mut lower) = a.view_mut().split_at(Axis(0), pivot_row);
            ndarray::Zip::from(upper.row_mut(col))
                .and(lower.row_mut(0))
                .for_each(std::mem::swap);
            b.swap(col, pivot_row);
        }

        let pivot = a[(col, col)];
        for row in col + 1..n {
            let factor = a[(row, col)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[(row, k)] -= factor * a[(col, k)];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut acc = b[row];
        for col in row + 1..n {
            acc -= a[(row, col)] * x[col];
        }
        x[row] = acc / a[(row, row)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn recovers_exact_line() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![1.0, 3.0, 5.0, 7.0];

        let mut model = LinearRegression::new();
        model.fit(x.view(), y.view()).unwrap();

        let weights = model.weights().unwrap();
        assert!((weights[0] - 1.0).abs() < 1e-6, "intercept: {}", weights[0]);
        assert!((weights[1] - 2.0).abs() < 1e-6, "slope: {}", weights[1]);

        let pred = model.predict(array![[10.0]].view()).unwrap();
        assert!((pred[0] - 21.0).abs() < 1e-4);
    }

    #[test]
    fn fits_two_features() {
        // y = 4 + 2a - 3b
        let x = array![
            [1.0, 0.0],
            [0.0, 1.0],
            [2.0, 2.0],
            [3.0, 1.0],
            [1.0, 4.0]
        ];
        let y = x.map_axis(Axis(1), |row| 4.0 + 2.0 * row[0] - 3.0 * row[1]);

        let mut model = LinearRegression::new();
        model.fit(x.view(), y.view()).unwrap();
        let pred = model.predict(x.view()).unwrap();

        for (p, t) in pred.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-5);
        }
    }

    #[test]
    fn underdetermined_system_still_solves() {
        // More columns than rows; the ridge damping must keep this solvable.
        let x = array![[1.0, 2.0, 3.0, 4.0], [2.0, 1.0, 0.0, 1.0]];
        let y = array![10.0, 5.0];

        let mut model = LinearRegression::new();
        model.fit(x.view(), y.view()).unwrap();
        let pred = model.predict(x.view()).unwrap();

        assert!((pred[0] - 10.0).abs() < 1e-2);
        assert!((pred[1] - 5.0).abs() < 1e-2);
    }

    #[test]
    fn predict_before_fit_errors() {
        let model = LinearRegression::new();
        let err = model.predict(array![[1.0]].view()).unwrap_err();

        assert!(matches!(err, RegressErr::NotFitted { .. }));
    }
}
