//! Freestream and boundary-layer edge states.

use crate::atmosphere::Atmosphere;
use crate::error::{GasError, GasResult, check_positive};
use crate::model::GasModel;
use at_core::units::m;
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

/// Undisturbed flow ahead of the vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Freestream {
    pub mach: f64,
    pub p_pa: f64,
    pub t_k: f64,
    pub rho_kgpm3: f64,
    pub u_mps: f64,
}

impl Freestream {
    /// Dynamic pressure ½ρu² [Pa].
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.rho_kgpm3 * self.u_mps * self.u_mps
    }
}

/// Fully specified local gas state at a streamwise position x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AeroState {
    pub p_pa: f64,
    pub t_k: f64,
    pub u_mps: f64,
    pub rho_kgpm3: f64,
    pub cp: f64,
    pub k: f64,
    pub mu: f64,
    /// Prandtl number cp·μ/k
    pub pr: f64,
    /// Local Reynolds number ρ·u·x/μ
    pub re: f64,
}

/// Freestream state at an altitude and Mach number.
pub fn freestream(
    atmosphere: &dyn Atmosphere,
    gas: &dyn GasModel,
    altitude_m: f64,
    mach: f64,
) -> GasResult<Freestream> {
    if !mach.is_finite() || mach < 0.0 {
        return Err(GasError::NonPhysical { what: "Mach number" });
    }
    let atm = atmosphere.lookup(m(altitude_m))?;
    let t_k = atm.temperature.get::<kelvin>();
    let a = gas.speed_of_sound(t_k)?;
    Ok(Freestream {
        mach,
        p_pa: atm.pressure.get::<pascal>(),
        t_k,
        rho_kgpm3: atm.density.get::<kilogram_per_cubic_meter>(),
        u_mps: mach * a,
    })
}

/// Transport properties and local Reynolds number from (p, T, u) at position x.
pub fn complete_state(
    gas: &dyn GasModel,
    p_pa: f64,
    t_k: f64,
    u_mps: f64,
    x_m: f64,
) -> GasResult<AeroState> {
    let p = check_positive(p_pa, "pressure")?;
    let t = check_positive(t_k, "temperature")?;
    if !u_mps.is_finite() {
        return Err(GasError::NonPhysical { what: "velocity" });
    }
    if !(x_m.is_finite() && x_m > 0.0) {
        return Err(GasError::InvalidArg {
            what: "x location must be positive",
        });
    }

    let rho = gas.density(p, t)?;
    let cp = gas.cp(t)?;
    let k = gas.conductivity(t)?;
    let mu = gas.viscosity(t)?;

    Ok(AeroState {
        p_pa: p,
        t_k: t,
        u_mps,
        rho_kgpm3: rho,
        cp,
        k,
        mu,
        pr: cp * mu / k,
        re: rho * u_mps * x_m / mu,
    })
}

/// Stagnation temperature T·(1 + (γ-1)/2·M²).
pub fn total_temperature(t_k: f64, mach: f64, gamma: f64) -> f64 {
    t_k * (1.0 + 0.5 * (gamma - 1.0) * mach * mach)
}
