//! Error types for wall operations.

use at_core::error::AtError;
use at_materials::MaterialError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Size mismatch: {what} (expected {expected}, got {got})")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Material error: {0}")]
    Material(#[from] MaterialError),
}

pub type WallResult<T> = Result<T, WallError>;

impl From<AtError> for WallError {
    fn from(e: AtError) -> Self {
        match e {
            AtError::NonFinite { what, .. } => WallError::NonPhysical { what },
            AtError::InvalidArg { what } => WallError::InvalidArg { what },
            AtError::Invariant { what } => WallError::NonPhysical { what },
        }
    }
}
