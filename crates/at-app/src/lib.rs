//! Shared application service layer for aerotherm.
//!
//! Turns run configuration files into simulations, runs them, exports the
//! results and fans x-location sweeps out over a thread pool.

pub mod compile;
pub mod error;
pub mod run_service;

pub use compile::{
    aerothermal_config, build_flight, build_wall, compile_run, material_database,
    radiative_loading, sim_options,
};
pub use error::{AppError, AppResult};
pub use run_service::{
    RunResponse, RunSummary, SweepPoint, load_config, run_config, run_file, run_x_sweep,
    summarize,
};
