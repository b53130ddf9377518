//! at-loads: surface heat loads on the exposed wall element.
//!
//! Provides:
//! - `AerothermalLoading`: flat-plate (reference temperature) and Fay-Riddell
//!   stagnation-point convective heating, or a prescribed constant flux
//! - `AblationModel`: pyrolysis, surface recession and the blowing correction
//! - `RadiativeLoading`: grey-body exchange with an ambient temperature
//!
//! Every fatal error carries the pipeline [`Stage`](at_core::Stage) it came from.

pub mod ablation;
pub mod aerothermal;
pub mod error;
pub mod radiation;

pub use ablation::{AblationModel, AblationStep, blowing_factor};
pub use aerothermal::{
    AerothermalConfig, AerothermalLoading, ConvectiveHeating, HeatingModel, StagnationGeometry,
};
pub use error::{LoadError, LoadResult};
pub use radiation::{RadiativeAmbient, RadiativeLoading};
