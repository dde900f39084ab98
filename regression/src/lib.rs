//! Numeric core for the salary regression lab.
//!
//! Provides the preprocessing primitives (label encoding, standardization,
//! polynomial expansion, seeded splits), four regressors behind the
//! [`Regressor`] seam, and the regression metrics used to rank them.

pub mod error;
pub mod forest;
pub mod linear;
pub mod metrics;
pub mod mlp;
pub mod model;
pub mod polynomial;
pub mod preprocess;

pub use error::{RegressErr, Result};
pub use forest::{ForestConfig, RandomForestRegressor};
pub use linear::LinearRegression;
pub use metrics::RegressionMetrics;
pub use mlp::{MlpConfig, MlpRegressor};
pub use model::Regressor;
pub use polynomial::PolynomialRegression;
