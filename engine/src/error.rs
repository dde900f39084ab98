use std::{error::Error, fmt, io};

use regression::RegressErr;

/// The engine crate's result type.
pub type Result<T> = std::result::Result<T, EngineErr>;

/// Engine-level failures.
#[derive(Debug)]
pub enum EngineErr {
    /// A prediction was requested before any model was trained.
    NotTrained,

    /// The registry was constructed without any records.
    EmptyDataset,

    /// A numeric-core failure bubbled up from preprocessing or a model.
    Regress(RegressErr),
}

impl fmt::Display for EngineErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineErr::NotTrained => write!(f, "models are not trained yet"),
            EngineErr::EmptyDataset => write!(f, "the dataset contains no records"),
            EngineErr::Regress(e) => write!(f, "regression error: {e}"),
        }
    }
}

impl Error for EngineErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EngineErr::Regress(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegressErr> for EngineErr {
    fn from(value: RegressErr) -> Self {
        Self::Regress(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<EngineErr> for io::Error {
    fn from(value: EngineErr) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, value)
    }
}
