use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, RegressErr>;

/// The regression crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressErr {
    /// An input that must contain data was empty.
    EmptyInput(&'static str),

    /// A shape invariant was violated (e.g. mismatched row counts).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// A transform or prediction was requested before fitting.
    NotFitted { what: &'static str },

    /// A label was not seen while fitting the encoder.
    UnknownLabel { label: String },

    /// The normal-equation system could not be solved.
    Singular,

    /// A caller-provided parameter is outside its valid range.
    InvalidParam(&'static str),
}

impl Display for RegressErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressErr::EmptyInput(what) => write!(f, "{what} must not be empty"),
            RegressErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            RegressErr::NotFitted { what } => {
                write!(f, "{what} must be fit before it can transform or predict")
            }
            RegressErr::UnknownLabel { label } => {
                write!(f, "label {label:?} was not seen during fitting")
            }
            RegressErr::Singular => {
                write!(f, "the linear system is singular and cannot be solved")
            }
            RegressErr::InvalidParam(what) => write!(f, "invalid parameter: {what}"),
        }
    }
}

impl Error for RegressErr {}
