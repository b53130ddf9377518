//! at-materials: wall material databases for aerotherm.
//!
//! Provides:
//! - `SolidMaterial`: constant-property, non-ablating wall materials
//! - `AblativeMaterial`: Arrhenius decomposition channels plus temperature
//!   and heat-flux dependent property curves
//! - `PropertyCurve`: a constant or a piecewise-linear lookup table
//! - `MaterialDatabase`: built-in catalog, extendable from YAML files
//!
//! Materials are plain data injected into the wall model; unknown names are
//! reported as lookup errors rather than silently defaulted.

pub mod ablative;
pub mod curve;
pub mod database;
pub mod error;
pub mod solid;

pub use ablative::{AblativeMaterial, ChannelGroup, DecompositionChannel};
pub use curve::PropertyCurve;
pub use database::{MaterialDatabase, MaterialFile, MaterialRef};
pub use error::{MaterialError, MaterialResult};
pub use solid::SolidMaterial;
