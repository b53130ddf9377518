//! Compile a run configuration into a ready-to-run simulation.

use crate::error::{AppError, AppResult};
use at_gas::{AirModel, BoundaryLayerModel, ShockType, StandardAtmosphere};
use at_loads::{
    AerothermalConfig, AerothermalLoading, HeatingModel, RadiativeAmbient, RadiativeLoading,
    StagnationGeometry,
};
use at_materials::MaterialDatabase;
use at_project::ProjectError;
use at_project::schema::{
    AerothermalModelDef, BoundaryLayerDef, InnerFaceDef, LoadingDef, RadiationAmbientDef,
    RadiationDef, RunConfig, ShockDef, StagnationGeometryDef, TrajectoryDef, WallDef,
};
use at_sim::{FlightProfile, InnerFace, SimOptions, TransientSimulation};
use at_wall::{Layer, WallStack};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Paths in a config are relative to the directory holding it.
fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Built-in catalog extended by the given material files.
pub fn material_database(files: &[PathBuf], base_dir: &Path) -> AppResult<MaterialDatabase> {
    let mut db = MaterialDatabase::builtin();
    for file in files {
        let path = resolve(base_dir, file);
        debug!(path = %path.display(), "merging material file");
        db.merge_yaml_file(&path)?;
    }
    Ok(db)
}

pub fn build_wall(wall: &WallDef, db: &MaterialDatabase, t_init_k: f64) -> AppResult<WallStack> {
    let layers: Vec<Layer> = wall
        .layers
        .iter()
        .map(|l| Layer::new(l.material.clone(), l.thickness_m, l.elements))
        .collect();
    let stack = WallStack::from_layers(db, &layers, t_init_k)?;

    // ablators only work from the exposed side
    if let Some(index) = stack
        .ablative_indices()
        .into_iter()
        .enumerate()
        .find_map(|(k, i)| (k != i).then_some(i))
    {
        return Err(AppError::Compile(format!(
            "ablative element {index} sits behind a non-ablative layer"
        )));
    }
    Ok(stack)
}

pub fn build_flight(trajectory: &TrajectoryDef, base_dir: &Path) -> AppResult<FlightProfile> {
    match &trajectory.file {
        Some(file) => {
            let path = resolve(base_dir, file);
            FlightProfile::from_rasaero_file(&path)
                .map_err(|source| AppError::Trajectory { path, source })
        }
        None => {
            let (time, (mach, altitude)): (Vec<f64>, (Vec<f64>, Vec<f64>)) = trajectory
                .samples
                .iter()
                .map(|s| (s.time_s, (s.mach, s.altitude_m)))
                .unzip();
            Ok(FlightProfile::new(time, mach, altitude)?)
        }
    }
}

pub fn aerothermal_config(loading: &LoadingDef) -> AerothermalConfig {
    let model = match loading.aerothermal {
        AerothermalModelDef::FlatPlate => HeatingModel::FlatPlate,
        AerothermalModelDef::FayRiddell {
            nose_radius_m,
            geometry,
        } => HeatingModel::FayRiddell {
            nose_radius_m,
            geometry: match geometry {
                StagnationGeometryDef::Axisymmetric => StagnationGeometry::Axisymmetric,
                StagnationGeometryDef::TwoDimensional => StagnationGeometry::TwoDimensional,
            },
        },
        AerothermalModelDef::ConstantFlux { q_wpm2 } => HeatingModel::ConstantFlux { q_wpm2 },
    };
    let boundary_layer = match loading.boundary_layer {
        BoundaryLayerDef::Laminar => BoundaryLayerModel::Laminar,
        BoundaryLayerDef::Turbulent => BoundaryLayerModel::Turbulent,
        BoundaryLayerDef::Transition { c_m } => BoundaryLayerModel::Transition { c_m },
    };
    let shock = match loading.shock {
        ShockDef::Oblique => ShockType::Oblique,
        ShockDef::Normal => ShockType::Normal,
        ShockDef::Conical => ShockType::Conical,
    };
    AerothermalConfig {
        model,
        boundary_layer,
        shock,
        x_location_m: loading.x_location_m,
        deflection_rad: loading.deflection_angle_deg.to_radians(),
    }
}

pub fn radiative_loading(radiation: &RadiationDef) -> AppResult<RadiativeLoading> {
    let ambient = match radiation.ambient {
        RadiationAmbientDef::Fixed { temperature_k } => RadiativeAmbient::Fixed(temperature_k),
        RadiationAmbientDef::Freestream => RadiativeAmbient::Freestream,
    };
    Ok(RadiativeLoading::new(
        ambient,
        radiation.solar_flux_wpm2,
        radiation.absorptivity,
    )?)
}

pub fn sim_options(config: &RunConfig) -> SimOptions {
    SimOptions {
        t_start_s: config.time.t_start_s,
        t_step_s: config.time.t_step_s,
        t_end_s: config.time.t_end_s,
        initial_temperature_k: config.initial_temperature_k,
        inner_face: match config.wall.inner_face {
            InnerFaceDef::Adiabatic => InnerFace::Adiabatic,
            InnerFaceDef::Heated => InnerFace::Heated,
            InnerFaceDef::FixedTemperature { temperature_k } => {
                InnerFace::FixedTemperature(temperature_k)
            }
        },
    }
}

/// Validate `config` and assemble its simulation. Relative paths resolve
/// against `base_dir`.
pub fn compile_run(config: &RunConfig, base_dir: &Path) -> AppResult<TransientSimulation> {
    at_project::validate_config(config).map_err(ProjectError::from)?;

    let db = material_database(&config.materials_files, base_dir)?;
    let wall = build_wall(&config.wall, &db, config.initial_temperature_k)?;
    let flight = build_flight(&config.trajectory, base_dir)?;
    let aero = AerothermalLoading::new(
        aerothermal_config(&config.loading),
        Arc::new(AirModel::default()),
        Arc::new(StandardAtmosphere),
    )?;
    let radiation = radiative_loading(&config.radiation)?;

    debug!(
        name = %config.name,
        elements = wall.len(),
        samples = flight.len(),
        "compiled run"
    );
    Ok(TransientSimulation::new(
        wall,
        flight,
        aero,
        radiation,
        sim_options(config),
    )?)
}
