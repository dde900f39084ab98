use ndarray::ArrayView1;

use crate::{RegressErr, Result};

/// Relative error under which a prediction counts as a hit for `accuracy`.
const ACCURACY_TOLERANCE: f64 = 0.15;

/// Evaluation metrics for a fitted regressor on a held-out split.
///
/// Fields are kept private so the internal representation can evolve without
/// breaking the public API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    r2: f64,
    mae: f64,
    rmse: f64,
    mape: f64,
    accuracy: f64,
}

impl RegressionMetrics {
    /// Computes the metric set from true and predicted targets.
    ///
    /// # Args
    /// * `y_true` - Observed target values.
    /// * `y_pred` - Model predictions, one per observed value.
    ///
    /// # Returns
    /// The computed metrics. `mape` is expressed in percent and `accuracy`
    /// is the fraction of predictions within 15% of the actual value.
    /// Samples with an actual value of zero are skipped by `mape` and
    /// `accuracy` rather than producing a NaN.
    ///
    /// # Errors
    /// Returns `RegressErr::EmptyInput` for empty vectors and
    /// `RegressErr::ShapeMismatch` when lengths differ.
    pub fn compute(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<Self> {
        if y_true.is_empty() {
            return Err(RegressErr::EmptyInput("y_true"));
        }
        if y_true.len() != y_pred.len() {
            return Err(RegressErr::ShapeMismatch {
                what: "y_pred",
                got: y_pred.len(),
                expected: y_true.len(),
            });
        }

        let n = y_true.len() as f64;
        let mean = y_true.sum() / n;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        let mut abs_sum = 0.0;
        let mut rel_sum = 0.0;
        let mut rel_count = 0usize;
        let mut hits = 0usize;

        for (&yt, &yp) in y_true.iter().zip(y_pred.iter()) {
            let diff = yt - yp;
            ss_res += diff * diff;
            ss_tot += (yt - mean) * (yt - mean);
            abs_sum += diff.abs();

            if yt != 0.0 {
                let rel = (diff / yt).abs();
                rel_sum += rel;
                rel_count += 1;
                if rel <= ACCURACY_TOLERANCE {
                    hits += 1;
                }
            }
        }

        let r2 = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };
        let (mape, accuracy) = if rel_count == 0 {
            (0.0, 0.0)
        } else {
            (
                rel_sum / rel_count as f64 * 100.0,
                hits as f64 / rel_count as f64,
            )
        };

        Ok(Self {
            r2,
            mae: abs_sum / n,
            rmse: (ss_res / n).sqrt(),
            mape,
            accuracy,
        })
    }

    /// Returns the coefficient of determination.
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Returns the mean absolute error.
    pub fn mae(&self) -> f64 {
        self.mae
    }

    /// Returns the root mean squared error.
    pub fn rmse(&self) -> f64 {
        self.rmse
    }

    /// Returns the mean absolute percentage error, in percent.
    pub fn mape(&self) -> f64 {
        self.mape
    }

    /// Returns the fraction of predictions within 15% of the actual value.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}
