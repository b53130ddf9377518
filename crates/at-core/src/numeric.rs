use crate::AtError;

/// Floating point type of every physical quantity.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AtError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, AtError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(AtError::InvalidArg { what })
    }
}

pub fn is_strictly_increasing(xs: &[Real]) -> bool {
    xs.windows(2).all(|w| w[1] > w[0])
}

/// Piecewise-linear interpolation on a strictly increasing abscissa.
///
/// Values outside the table are held at the end points.
pub fn interp_clamped(xs: &[Real], ys: &[Real], x: Real) -> Result<Real, AtError> {
    if xs.is_empty() || xs.len() != ys.len() {
        return Err(AtError::InvalidArg {
            what: "interpolation table must be non-empty with matching lengths",
        });
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Ok(ys[0]);
    }
    if x >= xs[last] {
        return Ok(ys[last]);
    }
    // first index with xs[i] > x; guaranteed in 1..=last here
    let hi = xs.partition_point(|&xi| xi <= x);
    let lo = hi - 1;
    let frac = (x - xs[lo]) / (xs[hi] - xs[lo]);
    Ok(ys[lo] + frac * (ys[hi] - ys[lo]))
}
