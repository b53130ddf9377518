//! Gas property model trait and the ideal-gas air model.

use crate::error::{GasResult, check_positive};
use at_core::numeric::interp_clamped;

/// Trait for ideal-gas property models.
///
/// Implementations must be thread-safe (Send + Sync) so independent runs can
/// share one model. Temperatures are in K, results in SI.
pub trait GasModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Specific gas constant [J/(kg·K)].
    fn gas_constant(&self) -> f64;

    /// Ratio of specific heats.
    fn gamma(&self) -> f64;

    /// Specific heat at constant pressure [J/(kg·K)].
    fn cp(&self, t_k: f64) -> GasResult<f64>;

    /// Thermal conductivity [W/(m·K)].
    fn conductivity(&self, t_k: f64) -> GasResult<f64>;

    /// Dynamic viscosity [Pa·s].
    fn viscosity(&self, t_k: f64) -> GasResult<f64>;

    /// Density from the ideal-gas law [kg/m³].
    fn density(&self, p_pa: f64, t_k: f64) -> GasResult<f64> {
        let p = check_positive(p_pa, "pressure")?;
        let t = check_positive(t_k, "temperature")?;
        Ok(p / (self.gas_constant() * t))
    }

    /// Speed of sound [m/s].
    fn speed_of_sound(&self, t_k: f64) -> GasResult<f64> {
        let t = check_positive(t_k, "temperature")?;
        Ok((self.gamma() * self.gas_constant() * t).sqrt())
    }
}

/// Air specific heat at 1 atm, T [K] vs cp [J/(kg·K)].
const AIR_CP_TABLE: [(f64, f64); 33] = [
    (100.0, 1032.0),
    (150.0, 1012.0),
    (200.0, 1007.0),
    (250.0, 1006.0),
    (300.0, 1007.0),
    (350.0, 1009.0),
    (400.0, 1014.0),
    (450.0, 1021.0),
    (500.0, 1030.0),
    (550.0, 1040.0),
    (600.0, 1051.0),
    (650.0, 1063.0),
    (700.0, 1075.0),
    (750.0, 1087.0),
    (800.0, 1099.0),
    (850.0, 1110.0),
    (900.0, 1121.0),
    (950.0, 1131.0),
    (1000.0, 1141.0),
    (1100.0, 1159.0),
    (1200.0, 1175.0),
    (1300.0, 1189.0),
    (1400.0, 1207.0),
    (1500.0, 1230.0),
    (1600.0, 1248.0),
    (1700.0, 1267.0),
    (1800.0, 1286.0),
    (1900.0, 1307.0),
    (2000.0, 1337.0),
    (2200.0, 1417.0),
    (2400.0, 1558.0),
    (2500.0, 1665.0),
    (3000.0, 2726.0),
];

#[derive(Clone, Debug, PartialEq)]
enum CpCurve {
    Table { t_k: Vec<f64>, cp: Vec<f64> },
    Constant(f64),
}

/// Ideal-gas air: R = 287, γ = 1.4.
///
/// cp is tabulated (held constant beyond the table ends), conductivity and
/// viscosity follow closed-form Sutherland-type fits.
#[derive(Clone, Debug, PartialEq)]
pub struct AirModel {
    cp: CpCurve,
}

impl AirModel {
    pub const GAS_CONSTANT: f64 = 287.0;
    pub const GAMMA: f64 = 1.4;

    /// Air with a fixed cp, for closed-form comparisons.
    pub fn with_constant_cp(cp: f64) -> Self {
        Self {
            cp: CpCurve::Constant(cp),
        }
    }
}

impl Default for AirModel {
    fn default() -> Self {
        let (t_k, cp) = AIR_CP_TABLE.iter().copied().unzip();
        Self {
            cp: CpCurve::Table { t_k, cp },
        }
    }
}

impl GasModel for AirModel {
    fn name(&self) -> &str {
        "ideal-gas air"
    }

    fn gas_constant(&self) -> f64 {
        Self::GAS_CONSTANT
    }

    fn gamma(&self) -> f64 {
        Self::GAMMA
    }

    fn cp(&self, t_k: f64) -> GasResult<f64> {
        let t = check_positive(t_k, "temperature")?;
        match &self.cp {
            CpCurve::Constant(cp) => Ok(*cp),
            CpCurve::Table { t_k, cp } => {
                interp_clamped(t_k, cp, t).map_err(|_| crate::GasError::InvalidArg {
                    what: "air cp table",
                })
            }
        }
    }

    fn conductivity(&self, t_k: f64) -> GasResult<f64> {
        let t = check_positive(t_k, "temperature")?;
        Ok(2.648151e-3 * t.powf(1.5) / (t + 245.4 * 10f64.powf(-12.0 / t)))
    }

    fn viscosity(&self, t_k: f64) -> GasResult<f64> {
        let t = check_positive(t_k, "temperature")?;
        Ok(1.458e-6 * t.powf(1.5) / (t + 110.4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_air_properties() {
        let air = AirModel::default();
        let mu = air.viscosity(288.15).unwrap();
        assert!((mu - 1.789e-5).abs() / 1.789e-5 < 1e-2);

        let k = air.conductivity(300.0).unwrap();
        assert!((k - 0.0263).abs() < 1.5e-3, "k = {k}");

        let rho = air.density(101_325.0, 288.15).unwrap();
        assert!((rho - 1.225).abs() < 5e-3);
    }

    #[test]
    fn cp_interpolates_and_clamps() {
        let air = AirModel::default();
        assert!((air.cp(325.0).unwrap() - 1008.0).abs() < 1e-9);
        assert_eq!(air.cp(50.0).unwrap(), 1032.0);
        assert_eq!(air.cp(5000.0).unwrap(), 2726.0);
    }

    #[test]
    fn constant_cp_is_constant() {
        let air = AirModel::with_constant_cp(1004.5);
        assert_eq!(air.cp(250.0).unwrap(), 1004.5);
        assert_eq!(air.cp(2500.0).unwrap(), 1004.5);
    }

    #[test]
    fn rejects_non_physical_temperature() {
        let air = AirModel::default();
        assert!(air.viscosity(0.0).is_err());
        assert!(air.conductivity(-5.0).is_err());
        assert!(air.cp(f64::NAN).is_err());
        assert!(air.density(-1.0, 300.0).is_err());
    }

    #[test]
    fn speed_of_sound_at_sea_level() {
        let air = AirModel::default();
        let a = air.speed_of_sound(288.15).unwrap();
        assert!((a - 340.3).abs() < 0.5);
    }
}
