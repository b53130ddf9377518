//! Charring ablators described by parallel Arrhenius decomposition channels.

use crate::curve::PropertyCurve;
use crate::error::{MaterialError, MaterialResult};
use serde::{Deserialize, Serialize};

/// Which constituent a decomposition channel belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelGroup {
    Resin,
    Reinforcement,
}

/// One Arrhenius channel: dρ/dt = -B·exp(-E/RT)·ρv·((ρ - ρc)/ρv)^N.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecompositionChannel {
    /// [kg/m³]
    pub virgin_density: f64,
    /// [kg/m³]
    pub char_density: f64,
    /// B [1/s]
    pub pre_exponential: f64,
    /// E/R [K]
    pub activation_temperature: f64,
    pub reaction_order: f64,
    pub group: ChannelGroup,
}

impl DecompositionChannel {
    /// Density rate of this channel at density `rho` and temperature `t_k`.
    ///
    /// A channel at or below its char density no longer reacts.
    pub fn rate(&self, rho: f64, t_k: f64) -> f64 {
        if self.pre_exponential == 0.0 || self.virgin_density <= 0.0 {
            return 0.0;
        }
        let remaining = ((rho - self.char_density) / self.virgin_density).max(0.0);
        -self.pre_exponential
            * (-self.activation_temperature / t_k).exp()
            * self.virgin_density
            * remaining.powf(self.reaction_order)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AblativeMaterial {
    pub name: String,
    /// Γ: weight of the resin channels in the total density.
    pub resin_fraction: f64,
    pub channels: Vec<DecompositionChannel>,
    pub emissivity: f64,
    /// Surface temperature below which no recession occurs [K].
    pub ablation_onset_k: f64,
    /// cp vs temperature [J/(kg·K)]
    pub specific_heat: PropertyCurve,
    /// k vs temperature [W/(m·K)]
    pub conductivity: PropertyCurve,
    /// Q* vs unblown convective heat flux [J/kg]
    pub heat_of_ablation: PropertyCurve,
}

impl AblativeMaterial {
    /// Γ·Σ(resin) + (1 - Γ)·Σ(reinforcement) over per-channel values.
    pub fn combine(&self, per_channel: &[f64]) -> f64 {
        let mut resin = 0.0;
        let mut reinforcement = 0.0;
        for (channel, value) in self.channels.iter().zip(per_channel) {
            match channel.group {
                ChannelGroup::Resin => resin += value,
                ChannelGroup::Reinforcement => reinforcement += value,
            }
        }
        self.resin_fraction * resin + (1.0 - self.resin_fraction) * reinforcement
    }

    pub fn virgin_densities(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.virgin_density).collect()
    }

    /// Total density of undecomposed material.
    pub fn initial_density(&self) -> f64 {
        self.combine(&self.virgin_densities())
    }

    /// Total density of fully charred material.
    pub fn char_density(&self) -> f64 {
        let chars: Vec<f64> = self.channels.iter().map(|c| c.char_density).collect();
        self.combine(&chars)
    }

    pub fn validate(&self) -> MaterialResult<()> {
        let bad = |what| MaterialError::InvalidProperty {
            material: self.name.clone(),
            what,
        };
        if self.channels.is_empty() {
            return Err(bad("at least one decomposition channel is required"));
        }
        if !(0.0..=1.0).contains(&self.resin_fraction) {
            return Err(bad("resin fraction must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.emissivity) {
            return Err(bad("emissivity must lie in [0, 1]"));
        }
        if !(self.ablation_onset_k.is_finite() && self.ablation_onset_k >= 0.0) {
            return Err(bad("ablation onset temperature must be non-negative"));
        }
        for c in &self.channels {
            let values = [
                c.virgin_density,
                c.char_density,
                c.pre_exponential,
                c.activation_temperature,
                c.reaction_order,
            ];
            if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(bad("channel parameters must be finite and non-negative"));
            }
            if c.char_density > c.virgin_density {
                return Err(bad("char density cannot exceed virgin density"));
            }
        }
        self.specific_heat.validate()?;
        self.conductivity.validate()?;
        self.heat_of_ablation.validate()?;
        if self.specific_heat.min_value() <= 0.0 || self.conductivity.min_value() <= 0.0 {
            return Err(bad("cp and k must be positive"));
        }
        if self.heat_of_ablation.min_value() <= 0.0 {
            return Err(bad("heat of ablation must be positive"));
        }
        if self.initial_density() <= 0.0 {
            return Err(bad("initial density must be positive"));
        }
        Ok(())
    }
}

/// Phenolic impregnated carbon ablator.
///
/// Kinetics after the three-channel resin/reinforcement model (two resin
/// channels, inert carbon fibre). Property curves are representative
/// low-density PICA values.
pub(crate) fn pica() -> AblativeMaterial {
    AblativeMaterial {
        name: "PICA".into(),
        resin_fraction: 0.1,
        channels: vec![
            DecompositionChannel {
                virgin_density: 229.0,
                char_density: 0.0,
                pre_exponential: 1.4e4,
                activation_temperature: 8555.6,
                reaction_order: 3.0,
                group: ChannelGroup::Resin,
            },
            DecompositionChannel {
                virgin_density: 972.0,
                char_density: 792.0,
                pre_exponential: 4.48e9,
                activation_temperature: 20444.4,
                reaction_order: 3.0,
                group: ChannelGroup::Resin,
            },
            DecompositionChannel {
                virgin_density: 160.0,
                char_density: 160.0,
                pre_exponential: 0.0,
                activation_temperature: 0.0,
                reaction_order: 0.0,
                group: ChannelGroup::Reinforcement,
            },
        ],
        emissivity: 0.9,
        ablation_onset_k: 644.0,
        specific_heat: PropertyCurve::table(&[
            (300.0, 1000.0),
            (500.0, 1400.0),
            (1000.0, 1800.0),
            (1500.0, 2000.0),
            (2000.0, 2100.0),
            (3000.0, 2200.0),
        ]),
        conductivity: PropertyCurve::table(&[
            (300.0, 0.20),
            (500.0, 0.25),
            (1000.0, 0.40),
            (1500.0, 0.65),
            (2000.0, 1.00),
            (3000.0, 1.60),
        ]),
        heat_of_ablation: PropertyCurve::table(&[
            (1.0e5, 1.5e7),
            (1.0e6, 2.5e7),
            (5.0e6, 4.0e7),
            (1.0e7, 5.5e7),
            (5.0e7, 9.0e7),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pica_initial_density_matches_channel_weighting() {
        let m = pica();
        m.validate().unwrap();
        // 0.1*(229 + 972) + 0.9*160
        assert!((m.initial_density() - 264.1).abs() < 1e-9);
        assert!(m.char_density() < m.initial_density());
    }

    #[test]
    fn rates_are_non_positive_and_grow_with_temperature() {
        let m = pica();
        let c = &m.channels[0];
        let cold = c.rate(c.virgin_density, 400.0);
        let hot = c.rate(c.virgin_density, 1200.0);
        assert!(cold <= 0.0 && hot <= 0.0);
        assert!(hot < cold);
    }

    #[test]
    fn charred_and_inert_channels_do_not_react() {
        let m = pica();
        assert_eq!(m.channels[1].rate(792.0, 2000.0), 0.0);
        assert_eq!(m.channels[1].rate(700.0, 2000.0), 0.0);
        assert_eq!(m.channels[2].rate(160.0, 3000.0), 0.0);
    }

    #[test]
    fn validate_rejects_inverted_char_density() {
        let mut m = pica();
        m.channels[0].char_density = 300.0;
        assert!(m.validate().is_err());
    }

    #[test]
    fn grouping_is_configuration() {
        let mut m = pica();
        m.channels[2].group = ChannelGroup::Resin;
        // every channel now weighted by the resin fraction
        assert!((m.initial_density() - 0.1 * (229.0 + 972.0 + 160.0)).abs() < 1e-9);
    }
}
