//! Error types for the at-app service layer.

use at_core::Stage;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] at_project::ProjectError),

    #[error("Material error: {0}")]
    Material(#[from] at_materials::MaterialError),

    #[error("Wall error: {0}")]
    Wall(#[from] at_wall::WallError),

    #[error("Load model error: {0}")]
    Load(#[from] at_loads::LoadError),

    #[error("Failed to read trajectory: {path}")]
    Trajectory {
        path: PathBuf,
        source: at_sim::SimError,
    },

    #[error("Simulation error: {0}")]
    Simulation(#[from] at_sim::SimError),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for at-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Pipeline stage for failures raised inside the timestep loop.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Simulation(e) => e.stage(),
            AppError::Load(e) => e.stage(),
            _ => None,
        }
    }
}
