//! at-gas: gas-dynamic state for aerotherm.
//!
//! Provides:
//! - `GasModel` trait and the ideal-gas `AirModel` (tabulated cp, Sutherland viscosity)
//! - `Atmosphere` trait and the US Standard Atmosphere 1976 (`StandardAtmosphere`)
//! - Freestream and complete edge states (`freestream`, `complete_state`)
//! - Normal, oblique and conical shock relations
//! - Boundary-layer laminar/turbulent classification
//!
//! # Example
//!
//! ```no_run
//! use at_gas::{AirModel, ShockType, StandardAtmosphere, freestream, post_shock_state};
//!
//! let air = AirModel::default();
//! let atm = StandardAtmosphere;
//! let fs = freestream(&atm, &air, 10_000.0, 3.0).unwrap();
//! let edge = post_shock_state(&air, fs.mach, fs.p_pa, fs.t_k, ShockType::Oblique, 0.1).unwrap();
//! println!("edge Mach {:.3}, T {:.1} K", edge.mach, edge.t_k);
//! ```

pub mod atmosphere;
pub mod boundary_layer;
pub mod conical;
pub mod error;
pub mod model;
pub mod shock;
pub mod state;

// Re-exports for ergonomics
pub use atmosphere::{Atmosphere, AtmosphereState, StandardAtmosphere};
pub use boundary_layer::{BoundaryLayerModel, BoundaryLayerState, classify, transition_reynolds};
pub use conical::{ConicalShock, conical_shock};
pub use error::{GasError, GasResult};
pub use model::{AirModel, GasModel};
pub use shock::{
    EdgeConditions, NormalShock, ObliqueShock, ShockType, normal_shock, oblique_shock,
    post_shock_state,
};
pub use state::{AeroState, Freestream, complete_state, freestream, total_temperature};
