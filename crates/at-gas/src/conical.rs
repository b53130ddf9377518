//! Conical shock via Taylor-Maccoll integration.
//!
//! For a trial shock angle the oblique-shock jump gives the flow just behind
//! the wave; the Taylor-Maccoll equations are then marched (RK4) towards the
//! axis until the polar velocity vanishes, which locates the cone surface.
//! A secant corrector adjusts the shock angle until that surface matches the
//! requested cone half-angle.

use crate::error::{GasError, GasResult};
use crate::shock::{deflection_angle, max_deflection, normal_shock, wave_angle};
use std::f64::consts::FRAC_PI_2;

/// Polar step of the Taylor-Maccoll march [rad].
const STEP_RAD: f64 = 1e-4;
const MAX_ITERATIONS: usize = 20;
/// Cone-angle tolerance of the secant corrector [deg].
const TOLERANCE_DEG: f64 = 1e-2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConicalShock {
    pub beta_rad: f64,
    pub cone_rad: f64,
    pub m_surface: f64,
    pub p_surface_p1: f64,
    pub t_surface_t1: f64,
    pub iterations: usize,
}

/// Taylor-Maccoll right-hand side in (V_r, V_θ), velocities scaled by V_max.
fn taylor_maccoll(theta: f64, vr: f64, vt: f64, g: f64) -> (f64, f64) {
    let b = 0.5 * (g - 1.0) * (1.0 - vr * vr - vt * vt);
    let dvt = (vr * vt * vt - b * (2.0 * vr + vt / theta.tan())) / (b - vt * vt);
    (vt, dvt)
}

/// Flow just behind the shock, marched to the surface where V_θ = 0.
struct MarchResult {
    cone_rad: f64,
    v_surface: f64,
    m2: f64,
    p2_p1: f64,
    t2_t1: f64,
}

fn march_to_surface(m1: f64, g: f64, beta: f64) -> GasResult<MarchResult> {
    let delta = deflection_angle(m1, g, beta);
    if delta.is_nan() || delta <= 0.0 {
        return Err(GasError::OutOfRange {
            what: "conical shock angle at or below the Mach angle",
        });
    }
    let ns = normal_shock(m1 * beta.sin(), g)?;
    let m2 = ns.m2 / (beta - delta).sin();
    let v = (2.0 / ((g - 1.0) * m2 * m2) + 1.0).powf(-0.5);

    let mut theta = beta;
    let mut vr = v * (beta - delta).cos();
    let mut vt = -v * (beta - delta).sin();
    let h = -STEP_RAD;

    while theta > STEP_RAD {
        let (k1r, k1t) = taylor_maccoll(theta, vr, vt, g);
        let (k2r, k2t) =
            taylor_maccoll(theta + 0.5 * h, vr + 0.5 * h * k1r, vt + 0.5 * h * k1t, g);
        let (k3r, k3t) =
            taylor_maccoll(theta + 0.5 * h, vr + 0.5 * h * k2r, vt + 0.5 * h * k2t, g);
        let (k4r, k4t) = taylor_maccoll(theta + h, vr + h * k3r, vt + h * k3t, g);
        let vr_next = vr + h / 6.0 * (k1r + 2.0 * k2r + 2.0 * k3r + k4r);
        let vt_next = vt + h / 6.0 * (k1t + 2.0 * k2t + 2.0 * k3t + k4t);
        let theta_next = theta + h;

        if !(vr_next.is_finite() && vt_next.is_finite()) {
            break;
        }
        if vt_next >= 0.0 {
            let frac = vt / (vt - vt_next);
            return Ok(MarchResult {
                cone_rad: theta + frac * h,
                v_surface: vr + frac * (vr_next - vr),
                m2,
                p2_p1: ns.p2_p1,
                t2_t1: ns.t2_t1,
            });
        }
        theta = theta_next;
        vr = vr_next;
        vt = vt_next;
    }
    Err(GasError::ConvergenceFailed {
        what: "Taylor-Maccoll march did not reach the cone surface",
    })
}

/// Cone angle reached from a trial wave angle; a march that never reaches a
/// surface counts as a vanishing cone.
fn cone_residual(m1: f64, g: f64, beta: f64, cone_rad: f64) -> (f64, Option<MarchResult>) {
    match march_to_surface(m1, g, beta) {
        Ok(r) => (r.cone_rad - cone_rad, Some(r)),
        Err(_) => (-cone_rad, None),
    }
}

/// Attached conical shock on a cone of half-angle `cone_rad`.
pub fn conical_shock(m1: f64, gamma: f64, cone_rad: f64) -> GasResult<ConicalShock> {
    if !(m1.is_finite() && m1 > 1.0) {
        return Err(GasError::OutOfRange {
            what: "conical shock requires a supersonic upstream Mach number",
        });
    }
    if !(cone_rad.is_finite() && cone_rad > 0.0 && cone_rad < FRAC_PI_2) {
        return Err(GasError::InvalidArg {
            what: "cone half-angle must lie in (0, pi/2)",
        });
    }
    let g = gamma;
    let mu = (1.0 / m1).asin();
    let (beta_peak, _) = max_deflection(m1, g, mu, FRAC_PI_2 - 1e-6);

    // predictor: the wedge wave angle bounds the cone wave angle from above
    let upper = wave_angle(m1, g, cone_rad).unwrap_or(beta_peak);
    let (f_upper, _) = cone_residual(m1, g, upper, cone_rad);
    if f_upper < 0.0 {
        return Err(GasError::Detached {
            mach: m1,
            theta_deg: cone_rad.to_degrees(),
        });
    }

    let (mut b0, mut f0) = (upper, f_upper);
    let mut b1 = mu + 0.5 * (upper - mu);
    let (mut f1, mut r1) = cone_residual(m1, g, b1, cone_rad);

    let tol = TOLERANCE_DEG.to_radians();
    for iteration in 1..=MAX_ITERATIONS {
        if let Some(r) = r1.as_ref().filter(|_| f1.abs() < tol) {
            let b = 1.0 + 0.5 * (g - 1.0) * r.m2 * r.m2;
            let vs2 = r.v_surface * r.v_surface;
            let ms2 = 2.0 / (g - 1.0) * vs2 / (1.0 - vs2);
            let c = 1.0 + 0.5 * (g - 1.0) * ms2;
            return Ok(ConicalShock {
                beta_rad: b1,
                cone_rad,
                m_surface: ms2.sqrt(),
                p_surface_p1: r.p2_p1 * (b / c).powf(g / (g - 1.0)),
                t_surface_t1: r.t2_t1 * b / c,
                iterations: iteration,
            });
        }
        // corrector: secant, falling back to halving when it leaves (μ, upper)
        let mut next = b1 - f1 * (b1 - b0) / (f1 - f0);
        if !next.is_finite() || next <= mu || next >= upper {
            next = if f1 > 0.0 {
                0.5 * (mu + b1)
            } else {
                0.5 * (b1 + upper)
            };
        }
        b0 = b1;
        f0 = f1;
        b1 = next;
        (f1, r1) = cone_residual(m1, g, b1, cone_rad);
    }
    Err(GasError::ConvergenceFailed {
        what: "conical shock angle",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shock::oblique_shock;

    #[test]
    fn cone_wave_is_weaker_than_wedge_wave() {
        let theta = 10f64.to_radians();
        let cone = conical_shock(2.0, 1.4, theta).unwrap();
        let wedge = oblique_shock(2.0, 1.4, theta).unwrap();
        let mu = (1.0f64 / 2.0).asin();

        assert!(cone.beta_rad > mu);
        assert!(cone.beta_rad < wedge.beta_rad);
        assert!(cone.p_surface_p1 > 1.0);
        assert!(cone.p_surface_p1 < wedge.normal.p2_p1);
        assert!(cone.m_surface < 2.0 && cone.m_surface > wedge.m2);
        assert!(cone.t_surface_t1 > 1.0);
        assert!(cone.iterations <= MAX_ITERATIONS);
    }

    #[test]
    fn hypersonic_cone_converges() {
        let cone = conical_shock(6.0, 1.4, 15f64.to_radians()).unwrap();
        assert!(cone.beta_rad > 15f64.to_radians());
        assert!(cone.m_surface > 1.0);
    }

    #[test]
    fn rejects_subsonic_and_bad_angles() {
        assert!(conical_shock(0.9, 1.4, 0.1).is_err());
        assert!(conical_shock(3.0, 1.4, 0.0).is_err());
        assert!(conical_shock(3.0, 1.4, FRAC_PI_2).is_err());
    }
}
