//! Transient wall-heating simulation along a flight trajectory.
//!
//! Provides:
//! - `FlightProfile`: Mach and altitude against time, from vectors or a RASAero CSV
//! - `TransientSimulation`: the fixed-step loop coupling loads and conduction
//! - `SimRecord`: every per-step quantity, plus CSV export

pub mod driver;
pub mod error;
pub mod export;
pub mod flight;

pub use driver::{InnerFace, SimOptions, SimProgress, SimRecord, TransientSimulation};
pub use error::{SimError, SimResult};
pub use export::{write_csv, write_csv_file};
pub use flight::FlightProfile;
