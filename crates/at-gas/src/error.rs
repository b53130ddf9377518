//! Gas-dynamic errors.

use at_core::AtError;
use thiserror::Error;

/// Result type for gas operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors that can occur while evaluating gas states and shocks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Non-physical values (negative pressure, temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Iterative solve did not converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Deflection exceeds the maximum for an attached shock.
    #[error("Shock detached: deflection {theta_deg:.3} deg exceeds the attached limit at Mach {mach:.3}")]
    Detached { mach: f64, theta_deg: f64 },
}

impl From<GasError> for AtError {
    fn from(err: GasError) -> Self {
        match err {
            GasError::NonPhysical { what } => AtError::Invariant { what },
            GasError::OutOfRange { what } => AtError::InvalidArg { what },
            GasError::InvalidArg { what } => AtError::InvalidArg { what },
            GasError::ConvergenceFailed { what } => AtError::Invariant { what },
            GasError::Detached { .. } => AtError::Invariant {
                what: "detached shock",
            },
        }
    }
}

pub(crate) fn check_positive(value: f64, what: &'static str) -> GasResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GasError::NonPhysical { what })
    }
}
