//! Explicit finite-difference conduction through the wall stack.

use crate::error::{WallError, WallResult};
use crate::stack::WallStack;

/// Thermal condition applied at a wall face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceCondition {
    /// Net heat flux supplied by the caller each step [W/m²].
    AppliedFlux,
    Adiabatic,
    /// Face node held at a fixed temperature [K].
    FixedTemperature(f64),
}

/// Forward-Euler conduction: every node rate is evaluated from the current
/// temperatures before any node is advanced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConductionSolver {
    pub outer: FaceCondition,
    pub inner: FaceCondition,
}

impl Default for ConductionSolver {
    fn default() -> Self {
        Self {
            outer: FaceCondition::AppliedFlux,
            inner: FaceCondition::Adiabatic,
        }
    }
}

impl ConductionSolver {
    pub fn new(outer: FaceCondition, inner: FaceCondition) -> WallResult<Self> {
        for face in [outer, inner] {
            if let FaceCondition::FixedTemperature(t) = face {
                if !(t.is_finite() && t > 0.0) {
                    return Err(WallError::InvalidArg {
                        what: "fixed face temperature must be positive",
                    });
                }
            }
        }
        Ok(Self { outer, inner })
    }

    /// Uniform start temperature with fixed faces imposed.
    pub fn initial_temperatures(&self, n: usize, t_init_k: f64) -> Vec<f64> {
        let mut temps = vec![t_init_k; n];
        self.impose_fixed(&mut temps);
        temps
    }

    fn impose_fixed(&self, temps: &mut [f64]) {
        if let (FaceCondition::FixedTemperature(t), Some(last)) = (self.inner, temps.last_mut()) {
            *last = t;
        }
        if let (FaceCondition::FixedTemperature(t), Some(first)) = (self.outer, temps.first_mut()) {
            *first = t;
        }
    }

    /// dT/dt for every node [K/s].
    ///
    /// `q_outer` and `q_inner` are the net fluxes into the exposed and inner
    /// faces; each is ignored unless that face is `AppliedFlux`.
    pub fn rates(
        &self,
        wall: &WallStack,
        temps: &[f64],
        q_outer: f64,
        q_inner: f64,
    ) -> WallResult<Vec<f64>> {
        let n = wall.len();
        if temps.len() != n {
            return Err(WallError::SizeMismatch {
                what: "temperatures",
                expected: n,
                got: temps.len(),
            });
        }
        if temps.iter().any(|t| !t.is_finite()) {
            return Err(WallError::NonPhysical {
                what: "wall temperature",
            });
        }
        if !(q_outer.is_finite() && q_inner.is_finite()) {
            return Err(WallError::NonPhysical {
                what: "face heat flux",
            });
        }

        // (k, ρ·cp, dy) per node
        let mut props = Vec::with_capacity(n);
        for el in wall.elements() {
            let (k, rho, cp, dy) = (
                el.conductivity(),
                el.density(),
                el.specific_heat(),
                el.thickness(),
            );
            if !(dy.is_finite() && dy > 0.0) {
                return Err(WallError::NonPhysical {
                    what: "element thickness reached zero",
                });
            }
            if !(k > 0.0 && rho > 0.0 && cp > 0.0) || !(k * rho * cp).is_finite() {
                return Err(WallError::NonPhysical {
                    what: "element thermal properties",
                });
            }
            props.push((k, rho * cp, dy));
        }

        let mut rates = vec![0.0; n];
        if n == 1 {
            let (_, rc, dy) = props[0];
            let q = face_flux(self.outer, q_outer) + face_flux(self.inner, q_inner);
            let fixed = matches!(self.outer, FaceCondition::FixedTemperature(_))
                || matches!(self.inner, FaceCondition::FixedTemperature(_));
            rates[0] = if fixed { 0.0 } else { q / (dy * rc) };
            return Ok(rates);
        }

        rates[0] = face_rate(self.outer, q_outer, props[0], temps[1] - temps[0]);
        for j in 1..n - 1 {
            let (k, rc, dy) = props[j];
            rates[j] = k / (rc * dy * dy) * (temps[j + 1] - 2.0 * temps[j] + temps[j - 1]);
        }
        rates[n - 1] = face_rate(self.inner, q_inner, props[n - 1], temps[n - 2] - temps[n - 1]);
        Ok(rates)
    }

    /// Advance temperatures by one explicit step of `dt` seconds.
    pub fn step(
        &self,
        wall: &WallStack,
        temps: &[f64],
        q_outer: f64,
        q_inner: f64,
        dt: f64,
    ) -> WallResult<Vec<f64>> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(WallError::InvalidArg {
                what: "dt must be positive",
            });
        }
        let rates = self.rates(wall, temps, q_outer, q_inner)?;
        let mut next: Vec<f64> = temps.iter().zip(&rates).map(|(t, r)| t + dt * r).collect();
        self.impose_fixed(&mut next);
        if next.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(WallError::NonPhysical {
                what: "wall temperature left the physical range",
            });
        }
        Ok(next)
    }
}

fn face_flux(face: FaceCondition, q: f64) -> f64 {
    match face {
        FaceCondition::AppliedFlux => q,
        FaceCondition::Adiabatic | FaceCondition::FixedTemperature(_) => 0.0,
    }
}

/// Face node rate; `dt_neighbor` is T(neighbour) - T(face).
fn face_rate(face: FaceCondition, q: f64, (k, rc, dy): (f64, f64, f64), dt_neighbor: f64) -> f64 {
    match face {
        FaceCondition::AppliedFlux => (q + k * dt_neighbor / dy) / (dy * rc),
        FaceCondition::Adiabatic => k / (rc * dy * dy) * dt_neighbor,
        FaceCondition::FixedTemperature(_) => 0.0,
    }
}
