//! Pyrolysis, surface recession and the convective blowing correction.
//!
//! [`AblationModel::evaluate`] reads the wall and returns an [`AblationStep`];
//! nothing changes until the caller applies that step to the wall.

use crate::aerothermal::ConvectiveHeating;
use crate::error::{LoadError, LoadResult, wall_at};
use at_core::Stage;
use at_wall::{WallError, WallStack};
use tracing::warn;

/// Blowing factor η = Φ/(e^Φ - 1), with η = 1 as Φ → 0.
pub fn blowing_factor(phi: f64) -> f64 {
    if phi.abs() <= f64::EPSILON {
        return 1.0;
    }
    let eta = phi / phi.exp_m1();
    if eta.is_nan() { 1.0 } else { eta }
}

/// Outcome of one ablation evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct AblationStep {
    /// (element index, channel densities after this step)
    pub channel_updates: Vec<(usize, Vec<f64>)>,
    /// Pyrolysis gas injection [kg/(m²·s)]
    pub mdot_pyro: f64,
    /// Surface recession rate, non-positive [m/s]
    pub s_dot: f64,
    /// Thickness removed this step [m]
    pub recession_m: f64,
    /// Mass injection from recession [kg/(m²·s)]
    pub mdot_recess: f64,
    pub eta: f64,
    /// A positive recession rate was computed and zeroed.
    pub clamped: bool,
}

impl AblationStep {
    pub fn mdot_total(&self) -> f64 {
        self.mdot_pyro + self.mdot_recess
    }

    /// Write the new densities into the wall and recede it.
    ///
    /// Returns the thickness actually removed.
    pub fn apply(&self, wall: &mut WallStack) -> LoadResult<f64> {
        for (index, densities) in &self.channel_updates {
            let element = wall
                .element_mut(*index)
                .and_then(|e| e.as_ablative_mut())
                .ok_or(LoadError::NonPhysical {
                    stage: Stage::Ablation,
                    what: "density update for a non-ablative element",
                })?;
            element
                .set_channel_densities(densities.clone())
                .map_err(wall_at(Stage::Ablation))?;
        }
        Ok(wall.recede(self.recession_m))
    }
}

/// Ablation of a wall whose exposed element is an ablator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AblationModel;

impl AblationModel {
    /// Evaluate one explicit step of length `dt`.
    ///
    /// Returns `None` when the exposed element is not ablative; the blowing
    /// factor is then 1.
    pub fn evaluate(
        &self,
        wall: &WallStack,
        temps: &[f64],
        heating: &ConvectiveHeating,
        dt: f64,
    ) -> LoadResult<Option<AblationStep>> {
        let Some(surface) = wall.exposed().as_ablative() else {
            return Ok(None);
        };
        if temps.len() != wall.len() {
            return Err(LoadError::Wall {
                stage: Stage::Ablation,
                source: WallError::SizeMismatch {
                    what: "temperatures",
                    expected: wall.len(),
                    got: temps.len(),
                },
            });
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(LoadError::NonPhysical {
                stage: Stage::Ablation,
                what: "time step",
            });
        }

        // pyrolysis, every ablative element at its own temperature
        let mut channel_updates = Vec::new();
        let mut mdot_pyro = 0.0;
        let mut surface_density = wall.exposed().density();
        for (i, element) in wall.elements().iter().enumerate() {
            let Some(abl) = element.as_ablative() else {
                continue;
            };
            let rates = abl
                .decomposition_rates(temps[i])
                .map_err(wall_at(Stage::Ablation))?;
            let next: Vec<f64> = abl
                .material()
                .channels
                .iter()
                .zip(abl.channel_densities())
                .zip(&rates)
                .map(|((channel, &rho), rate)| {
                    (rho + rate * dt).max(channel.char_density.min(rho))
                })
                .collect();
            let before = element.density();
            let after = abl.material().combine(&next);
            mdot_pyro -= (after - before) / dt * element.thickness();
            if i == 0 {
                surface_density = after;
            }
            channel_updates.push((i, next));
        }

        // recession, driven by the unblown flux
        let q = heating.q_unblown;
        let mut s_dot = 0.0;
        if temps[0] > surface.ablation_onset_k() {
            if surface_density <= 0.0 {
                return Err(LoadError::NonPhysical {
                    stage: Stage::Ablation,
                    what: "surface density",
                });
            }
            let q_star = surface
                .heat_of_ablation(q)
                .map_err(wall_at(Stage::Ablation))?;
            s_dot = -q / (surface_density * q_star);
        }
        let clamped = s_dot > 0.0;
        if clamped {
            warn!(s_dot, t_surface_k = temps[0], "positive recession rate; clamping to zero");
            s_dot = 0.0;
        }
        // avoid reporting -0
        s_dot += 0.0;

        let recession_m = -s_dot * dt;
        let mdot_recess = -surface_density * s_dot;
        let mdot_total = mdot_pyro + mdot_recess;
        let eta = if heating.h_unblown > 0.0 {
            blowing_factor(2.0 * heating.lambda * mdot_total / heating.h_unblown)
        } else {
            1.0
        };

        Ok(Some(AblationStep {
            channel_updates,
            mdot_pyro,
            s_dot,
            recession_m,
            mdot_recess,
            eta,
            clamped,
        }))
    }
}
