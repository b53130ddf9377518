//! Wall control volumes.

use crate::error::{WallError, WallResult};
use at_core::numeric::ensure_positive;
use at_materials::{AblativeMaterial, SolidMaterial};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub struct SolidElement {
    material: SolidMaterial,
    dy: f64,
}

/// Ablator control volume tracking per-channel densities.
#[derive(Clone, Debug, PartialEq)]
pub struct AblativeElement {
    material: Arc<AblativeMaterial>,
    dy: f64,
    channel_densities: Vec<f64>,
    density: f64,
    cp: f64,
    k: f64,
}

impl AblativeElement {
    pub fn material(&self) -> &AblativeMaterial {
        &self.material
    }

    pub fn channel_densities(&self) -> &[f64] {
        &self.channel_densities
    }

    /// Per-channel Arrhenius density rates at temperature `t_k` [kg/(m³·s)].
    pub fn decomposition_rates(&self, t_k: f64) -> WallResult<Vec<f64>> {
        ensure_positive(t_k, "element temperature")?;
        Ok(self
            .material
            .channels
            .iter()
            .zip(&self.channel_densities)
            .map(|(c, &rho)| c.rate(rho, t_k))
            .collect())
    }

    /// Replace the channel densities; the total density follows.
    pub fn set_channel_densities(&mut self, densities: Vec<f64>) -> WallResult<()> {
        if densities.len() != self.channel_densities.len() {
            return Err(WallError::SizeMismatch {
                what: "channel densities",
                expected: self.channel_densities.len(),
                got: densities.len(),
            });
        }
        if densities.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(WallError::NonPhysical {
                what: "channel density",
            });
        }
        self.density = self.material.combine(&densities);
        self.channel_densities = densities;
        Ok(())
    }

    /// Effective heat of ablation Q* at unblown convective flux `q` [J/kg].
    pub fn heat_of_ablation(&self, q: f64) -> WallResult<f64> {
        Ok(self.material.heat_of_ablation.evaluate(q)?)
    }

    pub fn ablation_onset_k(&self) -> f64 {
        self.material.ablation_onset_k
    }
}

/// One node of the wall: solid or ablative.
#[derive(Clone, Debug, PartialEq)]
pub enum WallElement {
    Solid(SolidElement),
    Ablative(AblativeElement),
}

impl WallElement {
    pub fn solid(material: SolidMaterial, dy: f64) -> WallResult<Self> {
        ensure_positive(dy, "element thickness")?;
        material.validate()?;
        Ok(WallElement::Solid(SolidElement { material, dy }))
    }

    /// Ablative element in its virgin state, properties evaluated at `t_k`.
    pub fn ablative(material: Arc<AblativeMaterial>, dy: f64, t_k: f64) -> WallResult<Self> {
        ensure_positive(dy, "element thickness")?;
        ensure_positive(t_k, "initial temperature")?;
        material.validate()?;
        let channel_densities = material.virgin_densities();
        let density = material.initial_density();
        let cp = material.specific_heat.evaluate(t_k)?;
        let k = material.conductivity.evaluate(t_k)?;
        Ok(WallElement::Ablative(AblativeElement {
            material,
            dy,
            channel_densities,
            density,
            cp,
            k,
        }))
    }

    pub fn material_name(&self) -> &str {
        match self {
            WallElement::Solid(e) => &e.material.name,
            WallElement::Ablative(e) => &e.material.name,
        }
    }

    pub fn is_ablative(&self) -> bool {
        matches!(self, WallElement::Ablative(_))
    }

    pub fn as_ablative(&self) -> Option<&AblativeElement> {
        match self {
            WallElement::Ablative(e) => Some(e),
            WallElement::Solid(_) => None,
        }
    }

    pub fn as_ablative_mut(&mut self) -> Option<&mut AblativeElement> {
        match self {
            WallElement::Ablative(e) => Some(e),
            WallElement::Solid(_) => None,
        }
    }

    /// [kg/m³]
    pub fn density(&self) -> f64 {
        match self {
            WallElement::Solid(e) => e.material.density,
            WallElement::Ablative(e) => e.density,
        }
    }

    /// [J/(kg·K)]
    pub fn specific_heat(&self) -> f64 {
        match self {
            WallElement::Solid(e) => e.material.specific_heat,
            WallElement::Ablative(e) => e.cp,
        }
    }

    /// [W/(m·K)]
    pub fn conductivity(&self) -> f64 {
        match self {
            WallElement::Solid(e) => e.material.conductivity,
            WallElement::Ablative(e) => e.k,
        }
    }

    pub fn emissivity(&self) -> f64 {
        match self {
            WallElement::Solid(e) => e.material.emissivity,
            WallElement::Ablative(e) => e.material.emissivity,
        }
    }

    /// [m]
    pub fn thickness(&self) -> f64 {
        match self {
            WallElement::Solid(e) => e.dy,
            WallElement::Ablative(e) => e.dy,
        }
    }

    pub(crate) fn set_thickness(&mut self, dy: f64) {
        match self {
            WallElement::Solid(e) => e.dy = dy,
            WallElement::Ablative(e) => e.dy = dy,
        }
    }

    /// Re-evaluate temperature dependent properties. Solids are constant.
    pub fn update_thermal_props(&mut self, t_k: f64) -> WallResult<()> {
        if let WallElement::Ablative(e) = self {
            ensure_positive(t_k, "element temperature")?;
            e.cp = e.material.specific_heat.evaluate(t_k)?;
            e.k = e.material.conductivity.evaluate(t_k)?;
        }
        Ok(())
    }
}
