//! Error types for simulation operations.

use at_core::Stage;
use at_loads::LoadError;
use at_wall::WallError;
use thiserror::Error;

/// Errors encountered while setting up or running a transient simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid trajectory: {what}")]
    Trajectory { what: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{stage} failed: {source}")]
    Wall {
        stage: Stage,
        #[source]
        source: WallError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Pipeline stage of a fatal step error.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SimError::Load(e) => e.stage(),
            SimError::Wall { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub(crate) fn conduction(source: WallError) -> SimError {
    SimError::Wall {
        stage: Stage::Conduction,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_failures_name_their_stage() {
        let err = conduction(WallError::NonPhysical {
            what: "element thickness reached zero",
        });
        assert_eq!(err.stage(), Some(Stage::Conduction));
        assert!(err.to_string().starts_with("conduction failed"));
    }

    #[test]
    fn load_errors_keep_their_stage() {
        let err: SimError = LoadError::NonPhysical {
            stage: Stage::Radiation,
            what: "wall temperature",
        }
        .into();
        assert_eq!(err.stage(), Some(Stage::Radiation));
        assert_eq!(SimError::InvalidArg { what: "dt" }.stage(), None);
    }
}
