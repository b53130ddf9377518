//! at-wall: one-dimensional wall model for aerotherm.
//!
//! Provides:
//! - `WallElement`: solid or ablative control volume with its own thickness
//! - `WallStack`: ordered elements (index 0 is the heated face) built from layers
//! - `ConductionSolver`: explicit finite-difference conduction with flux,
//!   adiabatic or fixed-temperature faces
//! - `StabilityMonitor`: Fourier/Biot check of the explicit step
//!
//! # Example
//!
//! ```no_run
//! use at_materials::MaterialDatabase;
//! use at_wall::{ConductionSolver, FaceCondition, Layer, WallStack};
//!
//! let db = MaterialDatabase::builtin();
//! let wall = WallStack::from_layers(&db, &[Layer::new("ALU6061", 0.003, 10)], 290.0).unwrap();
//! let solver = ConductionSolver::new(FaceCondition::AppliedFlux, FaceCondition::Adiabatic).unwrap();
//! let temps = solver.initial_temperatures(wall.len(), 290.0);
//! let next = solver.step(&wall, &temps, 5.0e4, 0.0, 1e-3).unwrap();
//! assert!(next[0] > temps[0]);
//! ```

pub mod conduction;
pub mod element;
pub mod error;
pub mod stability;
pub mod stack;

pub use conduction::{ConductionSolver, FaceCondition};
pub use element::{AblativeElement, SolidElement, WallElement};
pub use error::{WallError, WallResult};
pub use stability::{StabilityCheck, StabilityMonitor};
pub use stack::{Layer, WallStack};
