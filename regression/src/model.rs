use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::Result;

/// A supervised regression model.
///
/// A `Regressor` only defines how to fit parameters to a feature matrix and
/// how to map new rows to predictions. It does not:
/// - own or preprocess datasets,
/// - compute evaluation metrics,
/// - decide which model is best.
pub trait Regressor: Send + Sync {
    /// Fits the model to a feature matrix and target vector.
    ///
    /// # Args
    /// * `x` - Feature matrix with one row per sample.
    /// * `y` - Target values, one per row of `x`.
    ///
    /// # Errors
    /// Returns `RegressErr::ShapeMismatch` when `x` and `y` disagree on the
    /// sample count and `RegressErr::EmptyInput` when there is nothing to fit.
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()>;

    /// Predicts one target value per row of `x`.
    ///
    /// # Errors
    /// Returns `RegressErr::NotFitted` when called before `fit` and
    /// `RegressErr::ShapeMismatch` when the column count differs from the
    /// fitted one.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}
