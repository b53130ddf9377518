//! Convective heating of the exposed wall face.

use crate::error::{LoadError, LoadResult, gas_at};
use at_core::Stage;
use at_gas::{
    AeroState, Atmosphere, BoundaryLayerModel, BoundaryLayerState, EdgeConditions, Freestream,
    GasModel, ShockType, classify, complete_state, freestream, post_shock_state, total_temperature,
};
use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;
use tracing::info;

/// Body shape at a stagnation point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StagnationGeometry {
    #[default]
    Axisymmetric,
    TwoDimensional,
}

impl StagnationGeometry {
    /// Fay-Riddell leading coefficient.
    pub fn coefficient(self) -> f64 {
        match self {
            StagnationGeometry::Axisymmetric => 0.763,
            StagnationGeometry::TwoDimensional => 0.57,
        }
    }
}

/// Which correlation produces the unblown convective flux.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeatingModel {
    /// Eckert reference-temperature flat plate at distance x.
    FlatPlate,
    /// Stagnation point behind a normal shock.
    FayRiddell {
        nose_radius_m: f64,
        geometry: StagnationGeometry,
    },
    /// Prescribed flux into the wall [W/m²], independent of the flow.
    ConstantFlux { q_wpm2: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AerothermalConfig {
    pub model: HeatingModel,
    pub boundary_layer: BoundaryLayerModel,
    pub shock: ShockType,
    /// Running length from the leading edge [m]
    pub x_location_m: f64,
    /// Flow deflection (wedge or cone half-angle) [rad]
    pub deflection_rad: f64,
}

impl AerothermalConfig {
    /// Flat plate behind an oblique shock with the transition model.
    pub fn flat_plate(x_location_m: f64, deflection_rad: f64) -> Self {
        Self {
            model: HeatingModel::FlatPlate,
            boundary_layer: BoundaryLayerModel::default(),
            shock: ShockType::Oblique,
            x_location_m,
            deflection_rad,
        }
    }

    pub fn validate(&self) -> LoadResult<()> {
        if !(self.x_location_m.is_finite() && self.x_location_m > 0.0) {
            return Err(LoadError::Config {
                what: "x location must be positive",
            });
        }
        if !(self.deflection_rad.is_finite()
            && (0.0..FRAC_PI_2).contains(&self.deflection_rad))
        {
            return Err(LoadError::Config {
                what: "deflection angle must lie in [0, 90) deg",
            });
        }
        if self.shock == ShockType::Conical
            && self.deflection_rad == 0.0
            && self.model == HeatingModel::FlatPlate
        {
            return Err(LoadError::Config {
                what: "conical shock needs a positive cone half-angle",
            });
        }
        if let BoundaryLayerModel::Transition { c_m } = self.boundary_layer {
            if !c_m.is_finite() {
                return Err(LoadError::Config {
                    what: "transition Mach coefficient must be finite",
                });
            }
        }
        match self.model {
            HeatingModel::FayRiddell { nose_radius_m, .. }
                if !(nose_radius_m.is_finite() && nose_radius_m > 0.0) =>
            {
                return Err(LoadError::Config {
                    what: "nose radius must be positive",
                });
            }
            HeatingModel::ConstantFlux { q_wpm2 } if !q_wpm2.is_finite() => {
                return Err(LoadError::Config {
                    what: "constant heat flux must be finite",
                });
            }
            _ => {}
        }
        Ok(())
    }
}

/// Unblown convective heating at one instant, plus the flow state behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvectiveHeating {
    /// [W/m²], positive into the wall
    pub q_unblown: f64,
    /// [W/(m²·K)]
    pub h_unblown: f64,
    /// Transpiration coefficient λ of the correlation.
    pub lambda: f64,
    pub t_recovery_k: f64,
    pub t_edge_k: f64,
    pub t_edge_total_k: f64,
    /// Freestream stagnation temperature
    pub t_total_k: f64,
    pub mach_edge: f64,
    pub re_edge: f64,
    pub re_inf: f64,
    /// Freestream dynamic pressure [Pa]
    pub qbar_pa: f64,
    pub freestream: Freestream,
    pub boundary_layer: BoundaryLayerState,
    /// Set for a prescribed flux; blowing does not act on it.
    pub q_prescribed: Option<f64>,
}

impl ConvectiveHeating {
    /// Film coefficient and flux after scaling by the blowing factor η.
    pub fn corrected(&self, eta: f64, t_wall_k: f64) -> (f64, f64) {
        if let Some(q) = self.q_prescribed {
            return (0.0, q);
        }
        let h = eta * self.h_unblown;
        (h, h * (self.t_recovery_k - t_wall_k))
    }
}

/// λ: 0.4 turbulent, 0.5 laminar.
fn lambda_factor(state: BoundaryLayerState) -> f64 {
    match state {
        BoundaryLayerState::Turbulent => 0.4,
        BoundaryLayerState::Laminar => 0.5,
    }
}

pub struct AerothermalLoading {
    config: AerothermalConfig,
    gas: Arc<dyn GasModel>,
    atmosphere: Arc<dyn Atmosphere>,
}

impl AerothermalLoading {
    pub fn new(
        config: AerothermalConfig,
        gas: Arc<dyn GasModel>,
        atmosphere: Arc<dyn Atmosphere>,
    ) -> LoadResult<Self> {
        config.validate()?;
        let mut config = config;
        if matches!(config.model, HeatingModel::FayRiddell { .. })
            && config.shock != ShockType::Normal
        {
            info!(
                configured = ?config.shock,
                "stagnation heating uses a normal shock; overriding shock type"
            );
            config.shock = ShockType::Normal;
        }
        Ok(Self {
            config,
            gas,
            atmosphere,
        })
    }

    pub fn config(&self) -> &AerothermalConfig {
        &self.config
    }

    pub fn gas(&self) -> &dyn GasModel {
        self.gas.as_ref()
    }

    pub fn atmosphere(&self) -> &dyn Atmosphere {
        self.atmosphere.as_ref()
    }

    /// Convective heating before any blowing correction.
    ///
    /// `altitude_m` must already lie inside the atmosphere's valid range.
    pub fn unblown(&self, t_wall_k: f64, mach: f64, altitude_m: f64) -> LoadResult<ConvectiveHeating> {
        if !(t_wall_k.is_finite() && t_wall_k > 0.0) {
            return Err(LoadError::NonPhysical {
                stage: Stage::Aerothermal,
                what: "wall temperature",
            });
        }
        let gas = self.gas();
        let x = self.config.x_location_m;

        let fs = freestream(self.atmosphere(), gas, altitude_m, mach)
            .map_err(gas_at(Stage::Freestream))?;
        let inf = complete_state(gas, fs.p_pa, fs.t_k, fs.u_mps, x)
            .map_err(gas_at(Stage::Freestream))?;

        let edge = post_shock_state(
            gas,
            fs.mach,
            fs.p_pa,
            fs.t_k,
            self.config.shock,
            self.config.deflection_rad,
        )
        .map_err(gas_at(Stage::ShockSolve))?;
        let (edge_state, t_te) = self.edge_state(&edge)?;

        let bl = classify(self.config.boundary_layer, edge_state.re, edge.mach)
            .map_err(gas_at(Stage::BoundaryLayer))?;

        let (h, t_r) = match self.config.model {
            HeatingModel::FlatPlate => self.flat_plate(t_wall_k, &edge, &edge_state, t_te, bl)?,
            HeatingModel::FayRiddell {
                nose_radius_m,
                geometry,
            } => self.fay_riddell(t_wall_k, &fs, &edge_state, t_te, nose_radius_m, geometry)?,
            HeatingModel::ConstantFlux { .. } => (0.0, t_te),
        };
        let q_prescribed = match self.config.model {
            HeatingModel::ConstantFlux { q_wpm2 } => Some(q_wpm2),
            _ => None,
        };

        Ok(ConvectiveHeating {
            q_unblown: q_prescribed.unwrap_or(h * (t_r - t_wall_k)),
            h_unblown: h,
            lambda: lambda_factor(bl),
            t_recovery_k: t_r,
            t_edge_k: edge.t_k,
            t_edge_total_k: t_te,
            t_total_k: total_temperature(fs.t_k, fs.mach, gas.gamma()),
            mach_edge: edge.mach,
            re_edge: edge_state.re,
            re_inf: inf.re,
            qbar_pa: fs.dynamic_pressure(),
            freestream: fs,
            boundary_layer: bl,
            q_prescribed,
        })
    }

    /// Complete edge state and edge total temperature.
    fn edge_state(&self, edge: &EdgeConditions) -> LoadResult<(AeroState, f64)> {
        let gas = self.gas();
        let a_e = gas
            .speed_of_sound(edge.t_k)
            .map_err(gas_at(Stage::ShockSolve))?;
        let state = complete_state(gas, edge.p_pa, edge.t_k, edge.mach * a_e, self.config.x_location_m)
            .map_err(gas_at(Stage::Aerothermal))?;
        Ok((state, total_temperature(edge.t_k, edge.mach, gas.gamma())))
    }

    /// Returns (h, T_recovery).
    fn flat_plate(
        &self,
        t_wall_k: f64,
        edge: &EdgeConditions,
        edge_state: &AeroState,
        t_te: f64,
        bl: BoundaryLayerState,
    ) -> LoadResult<(f64, f64)> {
        let x = self.config.x_location_m;
        let r = bl.recovery_factor(edge_state.pr);
        let t_r = r * (t_te - edge.t_k) + edge.t_k;
        let t_ref = 0.5 * (edge.t_k + t_wall_k) + 0.22 * r * (t_te - edge.t_k);

        let reference = complete_state(self.gas(), edge.p_pa, t_ref, edge_state.u_mps, x)
            .map_err(gas_at(Stage::Aerothermal))?;
        let h = match bl {
            BoundaryLayerState::Turbulent => {
                reference.k / x * 0.02914 * reference.re.powf(0.8) * reference.pr.cbrt()
            }
            BoundaryLayerState::Laminar => {
                reference.k / x * 0.33206 * reference.re.sqrt() * reference.pr.cbrt()
            }
        };
        if !h.is_finite() {
            return Err(LoadError::NonPhysical {
                stage: Stage::Aerothermal,
                what: "film coefficient",
            });
        }
        Ok((h, t_r))
    }

    /// Stagnation heating expressed as an equivalent film coefficient on
    /// T_te - T_w. Returns (h, T_te).
    fn fay_riddell(
        &self,
        t_wall_k: f64,
        fs: &Freestream,
        edge: &AeroState,
        t_te: f64,
        nose_radius_m: f64,
        geometry: StagnationGeometry,
    ) -> LoadResult<(f64, f64)> {
        let gas = self.gas();
        let props = |t| -> LoadResult<(f64, f64)> {
            Ok((
                gas.cp(t).map_err(gas_at(Stage::Aerothermal))?,
                gas.viscosity(t).map_err(gas_at(Stage::Aerothermal))?,
            ))
        };
        let (cp_e, _) = props(edge.t_k)?;
        let (cp_w, mu_w) = props(t_wall_k)?;
        let rho_w = gas
            .density(edge.p_pa, t_wall_k)
            .map_err(gas_at(Stage::Aerothermal))?;

        let h0_e = cp_e * edge.t_k + 0.5 * edge.u_mps * edge.u_mps;
        let h_w = cp_w * t_wall_k;
        // no pressure rise ahead of a subsonic stagnation point
        let dp = (edge.p_pa - fs.p_pa).max(0.0);
        let due_dx = (2.0 * dp / edge.rho_kgpm3).sqrt() / nose_radius_m;

        let q = geometry.coefficient()
            * (edge.rho_kgpm3 * edge.mu).powf(0.4)
            * (rho_w * mu_w).powf(0.1)
            * (h0_e - h_w)
            * due_dx.sqrt();
        let dt = t_te - t_wall_k;
        let h = if dt.abs() <= f64::EPSILON * t_te { 0.0 } else { q / dt };
        if !h.is_finite() {
            return Err(LoadError::NonPhysical {
                stage: Stage::Aerothermal,
                what: "stagnation heat flux",
            });
        }
        Ok((h, t_te))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_gas::{AirModel, StandardAtmosphere};

    fn loading(config: AerothermalConfig) -> LoadResult<AerothermalLoading> {
        AerothermalLoading::new(
            config,
            Arc::new(AirModel::default()),
            Arc::new(StandardAtmosphere),
        )
    }

    #[test]
    fn configuration_is_checked_up_front() {
        assert!(loading(AerothermalConfig::flat_plate(0.0, 0.0)).is_err());
        assert!(loading(AerothermalConfig::flat_plate(-1.0, 0.0)).is_err());
        assert!(loading(AerothermalConfig::flat_plate(0.5, FRAC_PI_2)).is_err());

        let mut cfg = AerothermalConfig::flat_plate(0.5, 0.1);
        cfg.model = HeatingModel::FayRiddell {
            nose_radius_m: 0.0,
            geometry: StagnationGeometry::Axisymmetric,
        };
        let err = loading(cfg).err().unwrap();
        assert!(matches!(err, LoadError::Config { .. }));

        let mut cfg = AerothermalConfig::flat_plate(0.5, 0.0);
        cfg.shock = ShockType::Conical;
        assert!(loading(cfg).is_err());
    }

    #[test]
    fn supersonic_flat_plate_heats_a_cold_wall() {
        let aero = loading(AerothermalConfig::flat_plate(0.5, 5f64.to_radians())).unwrap();
        let h = aero.unblown(300.0, 3.0, 10_000.0).unwrap();

        assert!(h.q_unblown > 0.0);
        assert!(h.h_unblown > 0.0);
        assert!(h.t_edge_k > h.freestream.t_k);
        assert!(h.t_recovery_k > h.t_edge_k && h.t_recovery_k < h.t_edge_total_k);
        assert!(h.mach_edge < 3.0);
        assert!((h.q_unblown - h.h_unblown * (h.t_recovery_k - 300.0)).abs() < 1e-6);
        // total temperature is conserved across the shock
        assert!((h.t_total_k - h.t_edge_total_k).abs() / h.t_total_k < 1e-8);
    }

    #[test]
    fn wall_at_recovery_temperature_sees_no_flux() {
        let aero = loading(AerothermalConfig::flat_plate(0.5, 0.05)).unwrap();
        let cold = aero.unblown(300.0, 2.5, 5_000.0).unwrap();
        let hot = aero.unblown(cold.t_recovery_k, 2.5, 5_000.0).unwrap();
        assert_eq!(hot.q_unblown, 0.0);

        let hotter = aero.unblown(cold.t_recovery_k + 100.0, 2.5, 5_000.0).unwrap();
        assert!(hotter.q_unblown < 0.0);
    }

    #[test]
    fn fixed_boundary_layer_models_set_lambda() {
        let mut cfg = AerothermalConfig::flat_plate(0.5, 0.05);
        cfg.boundary_layer = BoundaryLayerModel::Laminar;
        let lam = loading(cfg).unwrap().unblown(300.0, 2.0, 8_000.0).unwrap();
        cfg.boundary_layer = BoundaryLayerModel::Turbulent;
        let turb = loading(cfg).unwrap().unblown(300.0, 2.0, 8_000.0).unwrap();

        assert_eq!(lam.boundary_layer, BoundaryLayerState::Laminar);
        assert_eq!(lam.lambda, 0.5);
        assert_eq!(turb.lambda, 0.4);
        assert!(turb.h_unblown > lam.h_unblown);
    }

    #[test]
    fn subsonic_flight_uses_freestream_as_edge() {
        let aero = loading(AerothermalConfig::flat_plate(0.5, 0.1)).unwrap();
        let h = aero.unblown(300.0, 0.6, 1_000.0).unwrap();
        assert_eq!(h.t_edge_k, h.freestream.t_k);
        assert_eq!(h.mach_edge, 0.6);
        assert!((h.re_edge - h.re_inf).abs() / h.re_inf < 1e-12);
    }

    #[test]
    fn detached_shock_is_a_shock_solve_error() {
        let aero = loading(AerothermalConfig::flat_plate(0.5, 40f64.to_radians())).unwrap();
        let err = aero.unblown(300.0, 1.5, 5_000.0).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::ShockSolve));
    }

    #[test]
    fn fay_riddell_forces_normal_shock_and_scales_with_geometry() {
        let mut cfg = AerothermalConfig::flat_plate(0.1, 0.0);
        cfg.model = HeatingModel::FayRiddell {
            nose_radius_m: 0.05,
            geometry: StagnationGeometry::Axisymmetric,
        };
        let axi = loading(cfg).unwrap();
        assert_eq!(axi.config().shock, ShockType::Normal);
        let q_axi = axi.unblown(300.0, 5.0, 20_000.0).unwrap();

        cfg.model = HeatingModel::FayRiddell {
            nose_radius_m: 0.05,
            geometry: StagnationGeometry::TwoDimensional,
        };
        let q_2d = loading(cfg).unwrap().unblown(300.0, 5.0, 20_000.0).unwrap();

        assert!(q_axi.q_unblown > 0.0);
        assert!((q_2d.q_unblown / q_axi.q_unblown - 0.57 / 0.763).abs() < 1e-9);
        assert_eq!(q_axi.t_recovery_k, q_axi.t_edge_total_k);
    }

    #[test]
    fn fay_riddell_grows_with_smaller_nose() {
        let run = |rn| {
            let mut cfg = AerothermalConfig::flat_plate(0.1, 0.0);
            cfg.model = HeatingModel::FayRiddell {
                nose_radius_m: rn,
                geometry: StagnationGeometry::Axisymmetric,
            };
            loading(cfg).unwrap().unblown(300.0, 4.0, 15_000.0).unwrap().q_unblown
        };
        // q ∝ Rn^-1/2
        assert!((run(0.01) / run(0.04) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn constant_flux_ignores_flow_and_blowing() {
        let mut cfg = AerothermalConfig::flat_plate(0.5, 0.0);
        cfg.model = HeatingModel::ConstantFlux { q_wpm2: 2.5e4 };
        let aero = loading(cfg).unwrap();

        let slow = aero.unblown(300.0, 0.3, 1_000.0).unwrap();
        let fast = aero.unblown(900.0, 3.0, 12_000.0).unwrap();
        for h in [slow, fast] {
            assert_eq!(h.q_unblown, 2.5e4);
            assert_eq!(h.h_unblown, 0.0);
            assert_eq!(h.corrected(0.3, 1500.0), (0.0, 2.5e4));
        }

        cfg.model = HeatingModel::ConstantFlux { q_wpm2: f64::NAN };
        assert!(matches!(loading(cfg).err().unwrap(), LoadError::Config { .. }));
    }

    #[test]
    fn bad_wall_temperature_is_rejected() {
        let aero = loading(AerothermalConfig::flat_plate(0.5, 0.05)).unwrap();
        let err = aero.unblown(f64::NAN, 2.0, 5_000.0).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Aerothermal));
    }
}
