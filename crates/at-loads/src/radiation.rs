//! Grey-body radiative exchange at the exposed face.

use crate::error::{LoadError, LoadResult};
use at_core::Stage;
use at_core::units::constants::{DEFAULT_AMBIENT_K, STEFAN_BOLTZMANN};

/// Temperature the surface radiates against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadiativeAmbient {
    Fixed(f64),
    /// Freestream static temperature along the trajectory.
    Freestream,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiativeLoading {
    pub ambient: RadiativeAmbient,
    /// Incident solar flux [W/m²]
    pub solar_flux_wpm2: f64,
    pub absorptivity: f64,
}

impl Default for RadiativeLoading {
    fn default() -> Self {
        Self {
            ambient: RadiativeAmbient::Fixed(DEFAULT_AMBIENT_K),
            solar_flux_wpm2: 0.0,
            absorptivity: 0.2,
        }
    }
}

impl RadiativeLoading {
    pub fn new(ambient: RadiativeAmbient, solar_flux_wpm2: f64, absorptivity: f64) -> LoadResult<Self> {
        if let RadiativeAmbient::Fixed(t) = ambient {
            if !(t.is_finite() && t >= 0.0) {
                return Err(LoadError::Config {
                    what: "ambient radiation temperature must be non-negative",
                });
            }
        }
        if !(solar_flux_wpm2.is_finite() && solar_flux_wpm2 >= 0.0) {
            return Err(LoadError::Config {
                what: "solar flux must be non-negative",
            });
        }
        if !(0.0..=1.0).contains(&absorptivity) {
            return Err(LoadError::Config {
                what: "absorptivity must lie in [0, 1]",
            });
        }
        Ok(Self {
            ambient,
            solar_flux_wpm2,
            absorptivity,
        })
    }

    pub fn ambient_temperature(&self, t_inf_k: f64) -> f64 {
        match self.ambient {
            RadiativeAmbient::Fixed(t) => t,
            RadiativeAmbient::Freestream => t_inf_k,
        }
    }

    /// Net radiative flux into the wall: σ·ε·(T_amb⁴ - T_w⁴) + solar·α.
    pub fn q_rad(&self, t_wall_k: f64, emissivity: f64, t_inf_k: f64) -> LoadResult<f64> {
        if !(t_wall_k.is_finite() && t_wall_k > 0.0) {
            return Err(LoadError::NonPhysical {
                stage: Stage::Radiation,
                what: "wall temperature",
            });
        }
        let t_amb = self.ambient_temperature(t_inf_k);
        if !(t_amb.is_finite() && t_amb >= 0.0) {
            return Err(LoadError::NonPhysical {
                stage: Stage::Radiation,
                what: "ambient temperature",
            });
        }
        Ok(STEFAN_BOLTZMANN * emissivity * (t_amb.powi(4) - t_wall_k.powi(4))
            + self.solar_flux_wpm2 * self.absorptivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_wall_loses_heat() {
        let rad = RadiativeLoading::default();
        let q = rad.q_rad(1000.0, 0.8, 220.0).unwrap();
        let expected = 5.6704e-8 * 0.8 * (290f64.powi(4) - 1000f64.powi(4));
        assert!((q - expected).abs() < 1e-9);
        assert!(q < 0.0);
    }

    #[test]
    fn equilibrium_without_sun_is_zero() {
        let rad = RadiativeLoading::default();
        assert_eq!(rad.q_rad(290.0, 0.9, 200.0).unwrap(), 0.0);
    }

    #[test]
    fn freestream_ambient_follows_trajectory() {
        let rad = RadiativeLoading::new(RadiativeAmbient::Freestream, 0.0, 0.2).unwrap();
        assert_eq!(rad.q_rad(216.65, 0.5, 216.65).unwrap(), 0.0);
        assert!(rad.q_rad(300.0, 0.5, 216.65).unwrap() < 0.0);
    }

    #[test]
    fn solar_term_is_added() {
        let rad = RadiativeLoading::new(RadiativeAmbient::Fixed(290.0), 1361.0, 0.3).unwrap();
        let q = rad.q_rad(290.0, 0.9, 0.0).unwrap();
        assert!((q - 1361.0 * 0.3).abs() < 1e-9);
    }

    #[test]
    fn invalid_settings_are_configuration_errors() {
        assert!(RadiativeLoading::new(RadiativeAmbient::Fixed(-1.0), 0.0, 0.2).is_err());
        assert!(RadiativeLoading::new(RadiativeAmbient::Freestream, -5.0, 0.2).is_err());
        assert!(RadiativeLoading::new(RadiativeAmbient::Freestream, 0.0, 1.5).is_err());
        let err = RadiativeLoading::default().q_rad(f64::NAN, 0.8, 250.0).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Radiation));
    }
}
