use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::{RegressErr, Result};

/// Per-column standardization to zero mean and unit variance.
///
/// Fit on the training split only, then reused for the test split and for
/// prediction inputs. Columns with zero variance transform to 0 instead of
/// dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl StandardScaler {
    /// Fits the scaler over a feature matrix.
    ///
    /// Uses the population standard deviation (ddof 0).
    ///
    /// # Errors
    /// Returns `RegressErr::EmptyInput` when `x` has no rows.
    pub fn fit(x: ArrayView2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(RegressErr::EmptyInput("feature matrix"));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or(RegressErr::EmptyInput("feature matrix"))?;
        let std = x.std_axis(Axis(0), 0.0);

        Ok(Self { mean, std })
    }

    /// Standardizes each column of `x` with the fitted mean and std.
    ///
    /// # Errors
    /// Returns `RegressErr::ShapeMismatch` when the column count differs from
    /// the fitted one.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.mean.len() {
            return Err(RegressErr::ShapeMismatch {
                what: "columns",
                got: x.ncols(),
                expected: self.mean.len(),
            });
        }

        let mut out = x.to_owned();
        for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
            let mean = self.mean[j];
            let std = self.std[j];
            col.mapv_inplace(|v| if std == 0.0 { 0.0 } else { (v - mean) / std });
        }

        Ok(out)
    }

    /// Fits on `x` and immediately transforms it.
    pub fn fit_transform(x: ArrayView2<f64>) -> Result<(Self, Array2<f64>)> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    /// Returns the fitted per-column means.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Returns the fitted per-column standard deviations.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn scaled_columns_have_zero_mean_unit_std() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let (_, scaled) = StandardScaler::fit_transform(x.view()).unwrap();

        for j in 0..2 {
            let col = scaled.column(j);
            assert!(col.sum().abs() < 1e-12);
            let var = col.mapv(|v| v * v).sum() / col.len() as f64;
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let x = array![[5.0, 1.0], [5.0, 2.0]];
        let (_, scaled) = StandardScaler::fit_transform(x.view()).unwrap();

        assert_eq!(scaled.column(0).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn transform_checks_column_count() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        let narrow = array![[1.0], [2.0]];

        let err = scaler.transform(narrow.view()).unwrap_err();
        assert!(matches!(err, RegressErr::ShapeMismatch { .. }));
    }

    #[test]
    fn empty_matrix_errors() {
        let x = Array2::<f64>::zeros((0, 3));
        assert!(StandardScaler::fit(x.view()).is_err());
    }
}
