//! Standard atmosphere lookup.

use crate::error::{GasError, GasResult};
use at_core::units::{Density, DynVisc, Length, Pressure, Temperature, k, kgpm3, pa, pa_s};
use uom::si::length::meter;

/// Static atmospheric conditions at one altitude.
#[derive(Clone, Copy, Debug)]
pub struct AtmosphereState {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub density: Density,
    pub viscosity: DynVisc,
}

/// Atmosphere model: altitude in, static conditions out.
pub trait Atmosphere: Send + Sync {
    fn name(&self) -> &str;

    /// Geometric altitude range over which `lookup` is valid [m].
    fn altitude_range_m(&self) -> (f64, f64);

    fn lookup(&self, altitude: Length) -> GasResult<AtmosphereState>;

    /// Clip an altitude into the valid range, returning whether clipping happened.
    fn clip_altitude_m(&self, altitude_m: f64) -> (f64, bool) {
        let (lo, hi) = self.altitude_range_m();
        let clipped = altitude_m.clamp(lo, hi);
        (clipped, clipped != altitude_m)
    }
}

/// Geopotential base height [m], base temperature [K], lapse rate [K/m], base pressure [Pa].
const LAYERS: [(f64, f64, f64, f64); 7] = [
    (0.0, 288.15, -0.0065, 101_325.0),
    (11_000.0, 216.65, 0.0, 22_632.06),
    (20_000.0, 216.65, 0.001, 5_474.889),
    (32_000.0, 228.65, 0.0028, 868.0187),
    (47_000.0, 270.65, 0.0, 110.9063),
    (51_000.0, 270.65, -0.0028, 66.93887),
    (71_000.0, 214.65, -0.002, 3.956_420),
];

const EARTH_RADIUS_M: f64 = 6_356_766.0;
/// g0·M0/R* [K/m]
const GMR: f64 = 0.034_163_195;
const R_AIR: f64 = 287.052_87;

/// US Standard Atmosphere 1976, geometric altitudes from -5004 m to 81020 m.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardAtmosphere;

impl StandardAtmosphere {
    pub const MIN_ALTITUDE_M: f64 = -5004.0;
    pub const MAX_ALTITUDE_M: f64 = 81_020.0;
}

impl Atmosphere for StandardAtmosphere {
    fn name(&self) -> &str {
        "US Standard Atmosphere 1976"
    }

    fn altitude_range_m(&self) -> (f64, f64) {
        (Self::MIN_ALTITUDE_M, Self::MAX_ALTITUDE_M)
    }

    fn lookup(&self, altitude: Length) -> GasResult<AtmosphereState> {
        let z = altitude.get::<meter>();
        if !z.is_finite() {
            return Err(GasError::NonPhysical { what: "altitude" });
        }
        if !(Self::MIN_ALTITUDE_M..=Self::MAX_ALTITUDE_M).contains(&z) {
            return Err(GasError::OutOfRange {
                what: "altitude outside standard atmosphere range",
            });
        }

        let h = EARTH_RADIUS_M * z / (EARTH_RADIUS_M + z);
        let idx = LAYERS.iter().rposition(|l| l.0 <= h).unwrap_or(0);
        let (hb, tb, lapse, pb) = LAYERS[idx];

        let t = tb + lapse * (h - hb);
        let p = if lapse == 0.0 {
            pb * (-GMR * (h - hb) / tb).exp()
        } else {
            pb * (tb / t).powf(GMR / lapse)
        };
        let rho = p / (R_AIR * t);
        let mu = 1.458e-6 * t.powf(1.5) / (t + 110.4);

        Ok(AtmosphereState {
            pressure: pa(p),
            temperature: k(t),
            density: kgpm3(rho),
            viscosity: pa_s(mu),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::units::m;
    use uom::si::mass_density::kilogram_per_cubic_meter;
    use uom::si::pressure::pascal;
    use uom::si::thermodynamic_temperature::kelvin;

    fn rel(a: f64, b: f64) -> f64 {
        (a - b).abs() / b.abs()
    }

    #[test]
    fn sea_level_matches_standard_values() {
        let s = StandardAtmosphere.lookup(m(0.0)).unwrap();
        assert!(rel(s.pressure.get::<pascal>(), 101_325.0) < 1e-9);
        assert!(rel(s.temperature.get::<kelvin>(), 288.15) < 1e-9);
        assert!(rel(s.density.get::<kilogram_per_cubic_meter>(), 1.225) < 1e-3);
    }

    #[test]
    fn ten_km_matches_tables() {
        let s = StandardAtmosphere.lookup(m(10_000.0)).unwrap();
        assert!(rel(s.temperature.get::<kelvin>(), 223.252) < 1e-4);
        assert!(rel(s.pressure.get::<pascal>(), 26_499.9) < 1e-3);
    }

    #[test]
    fn stratosphere_is_isothermal() {
        let a = StandardAtmosphere.lookup(m(12_000.0)).unwrap();
        let b = StandardAtmosphere.lookup(m(18_000.0)).unwrap();
        assert!((a.temperature.get::<kelvin>() - 216.65).abs() < 1e-9);
        assert!((b.temperature.get::<kelvin>() - 216.65).abs() < 1e-9);
        assert!(b.pressure < a.pressure);
    }

    #[test]
    fn pressure_is_continuous_across_layers() {
        // geometric altitude of the 20 km geopotential boundary
        let z = EARTH_RADIUS_M * 20_000.0 / (EARTH_RADIUS_M - 20_000.0);
        let below = StandardAtmosphere.lookup(m(z - 1e-3)).unwrap();
        let above = StandardAtmosphere.lookup(m(z + 1e-3)).unwrap();
        assert!(rel(below.pressure.get::<pascal>(), above.pressure.get::<pascal>()) < 1e-4);
    }

    #[test]
    fn out_of_range_is_rejected_and_clip_reports() {
        assert!(StandardAtmosphere.lookup(m(90_000.0)).is_err());
        assert!(StandardAtmosphere.lookup(m(-6_000.0)).is_err());

        let (alt, clipped) = StandardAtmosphere.clip_altitude_m(90_000.0);
        assert!(clipped);
        assert_eq!(alt, StandardAtmosphere::MAX_ALTITUDE_M);
        assert!(StandardAtmosphere.lookup(m(alt)).is_ok());

        let (alt, clipped) = StandardAtmosphere.clip_altitude_m(1_000.0);
        assert!(!clipped);
        assert_eq!(alt, 1_000.0);
    }
}
