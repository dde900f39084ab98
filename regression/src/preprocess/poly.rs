use ndarray::{Array2, ArrayView2};

use crate::{RegressErr, Result};

/// Expands a feature matrix with all monomials up to a total degree.
///
/// The expansion contains the bias column, then every multiset of feature
/// indices of size 1..=degree in lexicographic order, so for two features at
/// degree 2 the columns are `[1, a, b, a*a, a*b, b*b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialFeatures {
    degree: usize,
}

impl PolynomialFeatures {
    /// Creates a polynomial expansion of the given total degree.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Returns the number of output columns for `n_features` inputs.
    pub fn n_output_features(&self, n_features: usize) -> usize {
        Self::terms(n_features, self.degree).len()
    }

    /// Expands `x` into its polynomial feature matrix.
    ///
    /// # Errors
    /// Returns `RegressErr::EmptyInput` when `x` has no columns.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() == 0 {
            return Err(RegressErr::EmptyInput("feature matrix"));
        }

        let terms = Self::terms(x.ncols(), self.degree);
        let mut out = Array2::ones((x.nrows(), terms.len()));

        for (i, row) in x.rows().into_iter().enumerate() {
            for (j, term) in terms.iter().enumerate() {
                out[(i, j)] = term.iter().map(|&feature| row[feature]).product();
            }
        }

        Ok(out)
    }

    /// Enumerates the feature-index multisets for every output column.
    ///
    /// The empty multiset is the bias column.
    fn terms(n_features: usize, degree: usize) -> Vec<Vec<usize>> {
        let mut terms = vec![Vec::new()];
        let mut previous: Vec<Vec<usize>> = vec![Vec::new()];

        for _ in 0..degree {
            let mut next = Vec::new();
            for term in &previous {
                let start = term.last().copied().unwrap_or(0);
                for feature in start..n_features {
                    let mut extended = term.clone();
                    extended.push(feature);
                    next.push(extended);
                }
            }
            terms.extend(next.iter().cloned());
            previous = next;
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn degree_two_columns() {
        let poly = PolynomialFeatures::new(2);
        let x = array![[2.0, 3.0]];
        let out = poly.transform(x.view()).unwrap();

        assert_eq!(out.row(0).to_vec(), vec![1.0, 2.0, 3.0, 4.0, 6.0, 9.0]);
    }

    #[test]
    fn output_width_matches_combinatorics() {
        let poly = PolynomialFeatures::new(2);
        // C(8 + 2, 2) = 45 monomials of degree <= 2 over 8 features.
        assert_eq!(poly.n_output_features(8), 45);
    }

    #[test]
    fn degree_zero_is_just_bias() {
        let poly = PolynomialFeatures::new(0);
        let x = array![[7.0], [9.0]];
        let out = poly.transform(x.view()).unwrap();

        assert_eq!(out.shape(), &[2, 1]);
        assert_eq!(out.column(0).to_vec(), vec![1.0, 1.0]);
    }
}
