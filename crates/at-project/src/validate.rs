//! Range and consistency checks run before anything is simulated.

use crate::schema::{
    AerothermalModelDef, BoundaryLayerDef, InnerFaceDef, LATEST_VERSION, RadiationAmbientDef,
    RunConfig, ShockDef, TrajectoryDef,
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing: {what}")]
    Missing { what: String },

    #[error("Conflicting options: {what}")]
    Conflict { what: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }
    if config.name.trim().is_empty() {
        return Err(ValidationError::Missing {
            what: "name".to_string(),
        });
    }

    validate_wall(config)?;
    validate_trajectory(&config.trajectory)?;
    validate_loading(config)?;
    validate_radiation(config)?;

    positive("time.t_step_s", config.time.t_step_s)?;
    if !config.time.t_start_s.is_finite() {
        return Err(invalid("time.t_start_s", config.time.t_start_s, "must be finite"));
    }
    if let Some(t_end) = config.time.t_end_s {
        if !(t_end.is_finite() && t_end > config.time.t_start_s) {
            return Err(invalid("time.t_end_s", t_end, "must exceed t_start_s"));
        }
    }
    positive("initial_temperature_k", config.initial_temperature_k)?;
    Ok(())
}

fn validate_wall(config: &RunConfig) -> Result<(), ValidationError> {
    if config.wall.layers.is_empty() {
        return Err(ValidationError::Missing {
            what: "wall.layers".to_string(),
        });
    }
    for (i, layer) in config.wall.layers.iter().enumerate() {
        if layer.material.trim().is_empty() {
            return Err(ValidationError::Missing {
                what: format!("wall.layers[{i}].material"),
            });
        }
        positive(&format!("wall.layers[{i}].thickness_m"), layer.thickness_m)?;
        if layer.elements == 0 {
            return Err(invalid(
                format!("wall.layers[{i}].elements"),
                0,
                "need at least one element",
            ));
        }
    }
    if let InnerFaceDef::FixedTemperature { temperature_k } = config.wall.inner_face {
        positive("wall.inner_face.temperature_k", temperature_k)?;
    }
    Ok(())
}

fn validate_trajectory(trajectory: &TrajectoryDef) -> Result<(), ValidationError> {
    match (&trajectory.file, trajectory.samples.is_empty()) {
        (Some(_), false) => Err(ValidationError::Conflict {
            what: "trajectory.file and trajectory.samples are mutually exclusive".to_string(),
        }),
        (None, true) => Err(ValidationError::Missing {
            what: "trajectory.file or trajectory.samples".to_string(),
        }),
        (Some(_), true) => Ok(()),
        (None, false) => {
            for (i, s) in trajectory.samples.iter().enumerate() {
                if !(s.time_s.is_finite() && s.mach.is_finite() && s.altitude_m.is_finite()) {
                    return Err(invalid(format!("trajectory.samples[{i}]"), "NaN", "must be finite"));
                }
                if s.mach < 0.0 {
                    return Err(invalid(
                        format!("trajectory.samples[{i}].mach"),
                        s.mach,
                        "must be non-negative",
                    ));
                }
            }
            if trajectory.samples.windows(2).any(|w| w[1].time_s <= w[0].time_s) {
                return Err(invalid(
                    "trajectory.samples",
                    "time_s",
                    "must be strictly increasing",
                ));
            }
            Ok(())
        }
    }
}

fn validate_loading(config: &RunConfig) -> Result<(), ValidationError> {
    let loading = &config.loading;
    positive("loading.x_location_m", loading.x_location_m)?;
    let theta = loading.deflection_angle_deg;
    if !(theta.is_finite() && (0.0..90.0).contains(&theta)) {
        return Err(invalid(
            "loading.deflection_angle_deg",
            theta,
            "must lie in [0, 90)",
        ));
    }
    match loading.aerothermal {
        AerothermalModelDef::FlatPlate => {
            if loading.shock == ShockDef::Conical && theta == 0.0 {
                return Err(invalid(
                    "loading.deflection_angle_deg",
                    theta,
                    "conical shock needs a positive cone half-angle",
                ));
            }
        }
        AerothermalModelDef::FayRiddell { nose_radius_m, .. } => {
            positive("loading.aerothermal.nose_radius_m", nose_radius_m)?;
        }
        AerothermalModelDef::ConstantFlux { q_wpm2 } => {
            if !q_wpm2.is_finite() {
                return Err(invalid("loading.aerothermal.q_wpm2", q_wpm2, "must be finite"));
            }
        }
    }
    if let BoundaryLayerDef::Transition { c_m } = loading.boundary_layer {
        if !c_m.is_finite() {
            return Err(invalid("loading.boundary_layer.c_m", c_m, "must be finite"));
        }
    }
    Ok(())
}

fn validate_radiation(config: &RunConfig) -> Result<(), ValidationError> {
    let rad = &config.radiation;
    if let RadiationAmbientDef::Fixed { temperature_k } = rad.ambient {
        if !(temperature_k.is_finite() && temperature_k >= 0.0) {
            return Err(invalid(
                "radiation.ambient.temperature_k",
                temperature_k,
                "must be non-negative",
            ));
        }
    }
    if !(rad.solar_flux_wpm2.is_finite() && rad.solar_flux_wpm2 >= 0.0) {
        return Err(invalid(
            "radiation.solar_flux_wpm2",
            rad.solar_flux_wpm2,
            "must be non-negative",
        ));
    }
    if !(0.0..=1.0).contains(&rad.absorptivity) {
        return Err(invalid(
            "radiation.absorptivity",
            rad.absorptivity,
            "must lie in [0, 1]",
        ));
    }
    Ok(())
}
