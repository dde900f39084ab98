use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{
    Result, linear::LinearRegression, model::Regressor, preprocess::PolynomialFeatures,
};

/// Polynomial regression: degree-`d` feature expansion feeding an OLS fit.
///
/// The expansion happens inside `fit`/`predict`, so callers hand over the
/// same plain feature matrices they give every other regressor.
#[derive(Debug, Clone)]
pub struct PolynomialRegression {
    poly: PolynomialFeatures,
    linear: LinearRegression,
}

impl PolynomialRegression {
    /// Creates an unfitted polynomial regression of the given degree.
    pub fn new(degree: usize) -> Self {
        Self {
            poly: PolynomialFeatures::new(degree),
            linear: LinearRegression::new(),
        }
    }
}

impl Regressor for PolynomialRegression {
    fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<()> {
        let expanded = self.poly.transform(x)?;
        self.linear.fit(expanded.view(), y)
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let expanded = self.poly.transform(x)?;
        self.linear.predict(expanded.view())
    }
}
