//! Run configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub wall: WallDef,
    pub trajectory: TrajectoryDef,
    pub loading: LoadingDef,
    #[serde(default)]
    pub radiation: RadiationDef,
    pub time: TimeDef,
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature_k: f64,
    /// Extra material YAML files, relative to the config file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallDef {
    /// Exposed layer first.
    pub layers: Vec<LayerDef>,
    #[serde(default)]
    pub inner_face: InnerFaceDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerDef {
    pub material: String,
    pub thickness_m: f64,
    pub elements: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InnerFaceDef {
    #[default]
    Adiabatic,
    Heated,
    FixedTemperature { temperature_k: f64 },
}

/// Either a RASAero CSV export or inline samples, never both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrajectoryDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<TrajectorySampleDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrajectorySampleDef {
    pub time_s: f64,
    pub mach: f64,
    pub altitude_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadingDef {
    pub x_location_m: f64,
    #[serde(default)]
    pub deflection_angle_deg: f64,
    #[serde(default)]
    pub aerothermal: AerothermalModelDef,
    #[serde(default)]
    pub boundary_layer: BoundaryLayerDef,
    #[serde(default)]
    pub shock: ShockDef,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AerothermalModelDef {
    #[default]
    FlatPlate,
    FayRiddell {
        nose_radius_m: f64,
        #[serde(default)]
        geometry: StagnationGeometryDef,
    },
    /// Fixed applied flux, for conduction checks.
    ConstantFlux { q_wpm2: f64 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StagnationGeometryDef {
    #[default]
    Axisymmetric,
    TwoDimensional,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryLayerDef {
    Laminar,
    Turbulent,
    Transition {
        #[serde(default = "default_c_m")]
        c_m: f64,
    },
}

impl Default for BoundaryLayerDef {
    fn default() -> Self {
        Self::Transition { c_m: default_c_m() }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShockDef {
    #[default]
    Oblique,
    Normal,
    Conical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RadiationDef {
    #[serde(default)]
    pub ambient: RadiationAmbientDef,
    #[serde(default)]
    pub solar_flux_wpm2: f64,
    #[serde(default = "default_absorptivity")]
    pub absorptivity: f64,
}

impl Default for RadiationDef {
    fn default() -> Self {
        Self {
            ambient: RadiationAmbientDef::default(),
            solar_flux_wpm2: 0.0,
            absorptivity: default_absorptivity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RadiationAmbientDef {
    Fixed { temperature_k: f64 },
    Freestream,
}

impl Default for RadiationAmbientDef {
    fn default() -> Self {
        Self::Fixed {
            temperature_k: default_initial_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    #[serde(default)]
    pub t_start_s: f64,
    pub t_step_s: f64,
    /// Defaults to the end of the trajectory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_end_s: Option<f64>,
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_initial_temperature() -> f64 {
    290.0
}

fn default_c_m() -> f64 {
    0.2
}

fn default_absorptivity() -> f64 {
    0.2
}
