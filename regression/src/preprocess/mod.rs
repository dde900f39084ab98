mod encoder;
mod poly;
mod scaler;
mod split;

pub use encoder::LabelEncoder;
pub use poly::PolynomialFeatures;
pub use scaler::StandardScaler;
pub use split::{Split, train_test_split};
