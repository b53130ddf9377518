//! Normal and oblique shock relations for a calorically perfect gas.

use crate::conical::conical_shock;
use crate::error::{GasError, GasResult, check_positive};
use crate::model::GasModel;
use std::f64::consts::FRAC_PI_2;

/// Upper bound on the wave angle searched by the oblique solve.
const BETA_MAX: f64 = FRAC_PI_2 - 1e-6;

/// Slack allowed below M = 1 before a normal shock is rejected.
const SONIC_SLACK: f64 = 1e-9;

/// Which shock sits between the freestream and the boundary-layer edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShockType {
    #[default]
    Oblique,
    Normal,
    Conical,
}

/// Jump conditions across a normal shock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalShock {
    pub m2: f64,
    pub p2_p1: f64,
    pub rho2_rho1: f64,
    pub t2_t1: f64,
    /// Entropy rise Δs/R
    pub ds_r: f64,
    /// Total pressure ratio p02/p01
    pub p02_p01: f64,
}

/// Oblique shock solution (weak branch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObliqueShock {
    pub beta_rad: f64,
    pub theta_rad: f64,
    /// Jump conditions on the normal component M1·sin β.
    pub normal: NormalShock,
    pub m2: f64,
}

/// Static conditions at the boundary-layer edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeConditions {
    pub mach: f64,
    pub p_pa: f64,
    pub t_k: f64,
    /// Wave angle of the shock that produced this state, if any.
    pub beta_rad: Option<f64>,
}

pub fn normal_shock(m1: f64, gamma: f64) -> GasResult<NormalShock> {
    check_positive(m1, "upstream Mach number")?;
    if !(gamma.is_finite() && gamma > 1.0) {
        return Err(GasError::InvalidArg {
            what: "gamma must exceed 1",
        });
    }
    if m1 < 1.0 - SONIC_SLACK {
        return Err(GasError::OutOfRange {
            what: "normal shock requires a supersonic upstream Mach number",
        });
    }
    let m1 = m1.max(1.0);
    let g = gamma;
    let m1sq = m1 * m1;

    let m2 = ((1.0 + 0.5 * (g - 1.0) * m1sq) / (g * m1sq - 0.5 * (g - 1.0))).sqrt();
    let p2_p1 = 1.0 + 2.0 * g / (g + 1.0) * (m1sq - 1.0);
    let rho2_rho1 = (g + 1.0) * m1sq / (2.0 + (g - 1.0) * m1sq);
    let t2_t1 = p2_p1 / rho2_rho1;
    let ds_r = g / (g - 1.0) * t2_t1.ln() - p2_p1.ln();

    Ok(NormalShock {
        m2,
        p2_p1,
        rho2_rho1,
        t2_t1,
        ds_r,
        p02_p01: (-ds_r).exp(),
    })
}

/// Flow deflection produced by a wave angle β (the β-θ-M relation).
pub fn deflection_angle(m1: f64, gamma: f64, beta: f64) -> f64 {
    let m1sq = m1 * m1;
    let sin_b = beta.sin();
    let num = 2.0 * (m1sq * sin_b * sin_b - 1.0) / beta.tan();
    let den = m1sq * (gamma + (2.0 * beta).cos()) + 2.0;
    (num / den).atan()
}

/// Wave angle that maximises the deflection, and that maximum.
pub(crate) fn max_deflection(m1: f64, gamma: f64, lo: f64, hi: f64) -> (f64, f64) {
    // golden-section search; deflection is unimodal on [μ, π/2)
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lo, hi);
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = deflection_angle(m1, gamma, c);
    let mut fd = deflection_angle(m1, gamma, d);
    for _ in 0..200 {
        if (b - a).abs() < 1e-12 {
            break;
        }
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = deflection_angle(m1, gamma, c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = deflection_angle(m1, gamma, d);
        }
    }
    let beta = 0.5 * (a + b);
    (beta, deflection_angle(m1, gamma, beta))
}

/// Weak-branch wave angle for deflection θ.
///
/// The root is bracketed between the Mach angle (zero deflection) and the
/// wave angle of maximum deflection, then refined by bisection.
pub fn wave_angle(m1: f64, gamma: f64, theta: f64) -> GasResult<f64> {
    if (m1 - 1.0).abs() <= SONIC_SLACK {
        return Ok(FRAC_PI_2);
    }
    if m1 < 1.0 {
        return Err(GasError::OutOfRange {
            what: "oblique shock requires a supersonic upstream Mach number",
        });
    }
    let mu = (1.0 / m1).asin();
    if theta == 0.0 {
        return Ok(mu);
    }

    let (beta_peak, theta_max) = max_deflection(m1, gamma, mu.max(theta), BETA_MAX);
    if theta > theta_max {
        return Err(GasError::Detached {
            mach: m1,
            theta_deg: theta.to_degrees(),
        });
    }

    let (mut lo, mut hi) = (mu, beta_peak);
    let mut converged = false;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if deflection_angle(m1, gamma, mid) < theta {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-13 {
            converged = true;
            break;
        }
    }
    let beta = 0.5 * (lo + hi);
    if !converged || beta >= FRAC_PI_2 {
        return Err(GasError::ConvergenceFailed {
            what: "oblique shock wave angle",
        });
    }
    Ok(beta)
}

pub fn oblique_shock(m1: f64, gamma: f64, theta_rad: f64) -> GasResult<ObliqueShock> {
    check_positive(m1, "upstream Mach number")?;
    if !(theta_rad.is_finite() && (0.0..FRAC_PI_2).contains(&theta_rad)) {
        return Err(GasError::InvalidArg {
            what: "deflection angle must lie in [0, pi/2)",
        });
    }
    let beta = wave_angle(m1, gamma, theta_rad)?;
    let normal = normal_shock(m1 * beta.sin(), gamma)?;
    let m2 = normal.m2 / (beta - theta_rad).sin();
    Ok(ObliqueShock {
        beta_rad: beta,
        theta_rad,
        normal,
        m2,
    })
}

/// Boundary-layer edge conditions behind the chosen shock.
///
/// Subsonic and sonic freestreams pass through unchanged.
pub fn post_shock_state(
    gas: &dyn GasModel,
    m1: f64,
    p1_pa: f64,
    t1_k: f64,
    shock: ShockType,
    theta_rad: f64,
) -> GasResult<EdgeConditions> {
    let gamma = gas.gamma();
    if m1 <= 1.0 {
        return Ok(EdgeConditions {
            mach: m1,
            p_pa: p1_pa,
            t_k: t1_k,
            beta_rad: None,
        });
    }
    match shock {
        ShockType::Normal => {
            let ns = normal_shock(m1, gamma)?;
            Ok(EdgeConditions {
                mach: ns.m2,
                p_pa: p1_pa * ns.p2_p1,
                t_k: t1_k * ns.t2_t1,
                beta_rad: Some(FRAC_PI_2),
            })
        }
        ShockType::Oblique => {
            let os = oblique_shock(m1, gamma, theta_rad)?;
            Ok(EdgeConditions {
                mach: os.m2,
                p_pa: p1_pa * os.normal.p2_p1,
                t_k: t1_k * os.normal.t2_t1,
                beta_rad: Some(os.beta_rad),
            })
        }
        ShockType::Conical => {
            let cs = conical_shock(m1, gamma, theta_rad)?;
            Ok(EdgeConditions {
                mach: cs.m_surface,
                p_pa: p1_pa * cs.p_surface_p1,
                t_k: t1_k * cs.t_surface_t1,
                beta_rad: Some(cs.beta_rad),
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normal_shock_invariants(m1 in 1.0_f64..10.0) {
            let ns = normal_shock(m1, 1.4).unwrap();
            prop_assert!(ns.m2 <= 1.0 + 1e-12);
            prop_assert!(ns.ds_r >= -1e-12);
            prop_assert!(ns.p02_p01 <= 1.0 + 1e-12);
            prop_assert!(ns.p2_p1 >= 1.0 - 1e-12);
        }

        #[test]
        fn weak_oblique_stays_attached_and_compressive(m1 in 1.5_f64..6.0, frac in 0.01_f64..0.9) {
            let mu = (1.0 / m1).asin();
            let (_, theta_max) = max_deflection(m1, 1.4, mu, BETA_MAX);
            let theta = frac * theta_max;
            let os = oblique_shock(m1, 1.4, theta).unwrap();
            prop_assert!(os.beta_rad > mu && os.beta_rad < FRAC_PI_2);
            prop_assert!(os.m2 < m1);
            prop_assert!(os.normal.p2_p1 > 1.0);
            prop_assert!((deflection_angle(m1, 1.4, os.beta_rad) - theta).abs() < 1e-9);
        }
    }
}
