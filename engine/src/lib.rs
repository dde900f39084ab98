//! Service layer of the salary regression lab.
//!
//! Owns the embedded salary dataset, the feature pipeline, the registry of
//! trained models, and a newline-delimited JSON front end exposing the
//! data / train / predict / status / stats operations.

pub mod dataset;
pub mod error;
pub mod features;
pub mod frontend;
pub mod protocol;
pub mod record;
pub mod registry;

pub use error::{EngineErr, Result};
pub use registry::Registry;
