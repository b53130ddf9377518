use core::fmt;
use thiserror::Error;

pub type AtResult<T> = Result<T, AtError>;

#[derive(Error, Debug)]
pub enum AtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}

/// Physical stage of the per-timestep pipeline.
///
/// Fatal errors raised while stepping carry one of these so a failure can be
/// traced back to the model that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Freestream,
    ShockSolve,
    BoundaryLayer,
    Aerothermal,
    Ablation,
    Radiation,
    Conduction,
    MaterialLookup,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Freestream => "freestream",
            Stage::ShockSolve => "shock solve",
            Stage::BoundaryLayer => "boundary-layer classification",
            Stage::Aerothermal => "aerothermal loading",
            Stage::Ablation => "ablation",
            Stage::Radiation => "radiation",
            Stage::Conduction => "conduction",
            Stage::MaterialLookup => "material lookup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
