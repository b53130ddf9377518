//! Error types for heat-load evaluation.

use at_core::Stage;
use at_gas::GasError;
use at_wall::WallError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// Rejected before any timestep runs.
    #[error("Invalid loading configuration: {what}")]
    Config { what: &'static str },

    #[error("{stage} failed: {source}")]
    Gas {
        stage: Stage,
        #[source]
        source: GasError,
    },

    #[error("{stage} failed: {source}")]
    Wall {
        stage: Stage,
        #[source]
        source: WallError,
    },

    #[error("{stage} failed: non-physical {what}")]
    NonPhysical { stage: Stage, what: &'static str },
}

pub type LoadResult<T> = Result<T, LoadError>;

impl LoadError {
    /// Pipeline stage of a fatal step error; `None` for configuration errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            LoadError::Config { .. } => None,
            LoadError::Gas { stage, .. }
            | LoadError::Wall { stage, .. }
            | LoadError::NonPhysical { stage, .. } => Some(*stage),
        }
    }
}

/// Tag a gas error with the stage that raised it.
pub(crate) fn gas_at(stage: Stage) -> impl FnOnce(GasError) -> LoadError {
    move |source| LoadError::Gas { stage, source }
}

/// Tag a wall error with the stage that raised it.
pub(crate) fn wall_at(stage: Stage) -> impl FnOnce(WallError) -> LoadError {
    move |source| LoadError::Wall { stage, source }
}
