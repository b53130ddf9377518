//! Non-ablating wall materials.

use crate::error::{MaterialError, MaterialResult};
use serde::{Deserialize, Serialize};

/// Constant-property solid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidMaterial {
    pub name: String,
    /// [kg/m³]
    pub density: f64,
    /// [J/(kg·K)]
    pub specific_heat: f64,
    /// [W/(m·K)]
    pub conductivity: f64,
    pub emissivity: f64,
}

impl SolidMaterial {
    pub fn new(
        name: impl Into<String>,
        density: f64,
        specific_heat: f64,
        conductivity: f64,
        emissivity: f64,
    ) -> Self {
        Self {
            name: name.into(),
            density,
            specific_heat,
            conductivity,
            emissivity,
        }
    }

    pub fn validate(&self) -> MaterialResult<()> {
        let bad = |what| MaterialError::InvalidProperty {
            material: self.name.clone(),
            what,
        };
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(bad("density must be positive"));
        }
        if !(self.specific_heat.is_finite() && self.specific_heat > 0.0) {
            return Err(bad("specific heat must be positive"));
        }
        if !(self.conductivity.is_finite() && self.conductivity > 0.0) {
            return Err(bad("conductivity must be positive"));
        }
        if !(0.0..=1.0).contains(&self.emissivity) {
            return Err(bad("emissivity must lie in [0, 1]"));
        }
        Ok(())
    }

    /// Thermal diffusivity k/(ρ·cp) [m²/s].
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / (self.density * self.specific_heat)
    }
}

/// Built-in solids. Room-temperature handbook values.
pub(crate) fn builtin_solids() -> Vec<SolidMaterial> {
    vec![
        // anodized finish
        SolidMaterial::new("ALU6061", 2700.0, 896.0, 167.0, 0.8),
        SolidMaterial::new("ALU7075", 2810.0, 960.0, 130.0, 0.8),
        SolidMaterial::new("SS316", 8000.0, 500.0, 16.3, 0.4),
        SolidMaterial::new("TI6AL4V", 4430.0, 526.3, 6.7, 0.3),
        SolidMaterial::new("INCONEL718", 8190.0, 435.0, 11.4, 0.3),
        SolidMaterial::new("G10", 1850.0, 1200.0, 0.29, 0.9),
        // through-thickness conductivity
        SolidMaterial::new("CFRP", 1600.0, 1100.0, 0.8, 0.85),
    ]
}
