use super::constants::DPI;
use std::f64::consts::PI;

/// Maximum number of Newton iterations for both conic regimes.
const JMAX: usize = 200;

/// Returns the principal value of an angle in radians, in `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `2π`; that case is folded
/// back to `0` so the half-open interval holds.
pub(crate) fn principal_angle(a: f64) -> f64 {
    let r = a.rem_euclid(DPI);
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Returns the principal value of an angle in degrees, in `[0, 360)`.
pub(crate) fn principal_angle_deg(a: f64) -> f64 {
    let r = a.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Solve Kepler's equation `M = E − e·sin(E)` for the eccentric anomaly of an
/// elliptical orbit (`0 ≤ e < 1`).
///
/// The mean anomaly is reduced to `[0, 2π)` before iterating and the whole turns are
/// added back, so the result is continuous in `mean_anomaly`.
///
/// Return
/// ------
/// * `Some(E)` on convergence, `None` if Newton's method did not settle or the
///   input is not finite.
pub(crate) fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> Option<f64> {
    if !mean_anomaly.is_finite() || !(0.0..1.0).contains(&ecc) {
        return None;
    }
    let contr = 100.0 * f64::EPSILON;

    let turns = (mean_anomaly / DPI).floor() * DPI;
    let ell = mean_anomaly - turns;

    let mut u = if ecc > 0.8 { PI } else { ell };
    for _ in 0..JMAX {
        let du = -(u - ecc * u.sin() - ell) / (1.0 - ecc * u.cos());
        u += du;
        if du.abs() < contr * (1.0 + u.abs()) {
            return Some(u + turns);
        }
    }
    None
}

/// Solve the hyperbolic Kepler equation `M = e·sinh(H) − H` for `e > 1`.
///
/// The root is bracketed by `asinh(|M|/e) ≤ |H| ≤ asinh(|M|/(e − 1))`. Newton's method
/// starts from the upper bound, where the residual is non-negative; the function is
/// convex and increasing there, so the iterates decrease monotonically onto the root.
pub(crate) fn hyperbolic_anomaly(mean_anomaly: f64, ecc: f64) -> Option<f64> {
    if !mean_anomaly.is_finite() || !ecc.is_finite() || ecc <= 1.0 {
        return None;
    }
    let contr = 100.0 * f64::EPSILON;
    let ell = mean_anomaly.abs();
    if ell == 0.0 {
        return Some(0.0);
    }

    let mut f = (ell / (ecc - 1.0)).asinh();
    for _ in 0..JMAX {
        let df = -(ecc * f.sinh() - f - ell) / (ecc * f.cosh() - 1.0);
        f += df;
        if df.abs() < contr * (1.0 + f.abs()) {
            return Some(f.copysign(mean_anomaly));
        }
    }
    None
}

/// True anomaly (radians, in `(−π, π]`) from the eccentric anomaly of an ellipse.
pub(crate) fn true_from_eccentric(ecc_anomaly: f64, ecc: f64) -> f64 {
    let (s, c) = (ecc_anomaly / 2.0).sin_cos();
    2.0 * ((1.0 + ecc).sqrt() * s).atan2((1.0 - ecc).sqrt() * c)
}

/// True anomaly (radians) from the hyperbolic anomaly.
pub(crate) fn true_from_hyperbolic(hyp_anomaly: f64, ecc: f64) -> f64 {
    2.0 * (((ecc + 1.0) / (ecc - 1.0)).sqrt() * (hyp_anomaly / 2.0).tanh()).atan()
}

/// Mean anomaly of an ellipse from its true anomaly, in `[0, 2π)`.
pub(crate) fn mean_from_true_elliptic(true_anomaly: f64, ecc: f64) -> f64 {
    let (s, c) = (true_anomaly / 2.0).sin_cos();
    let u = 2.0 * ((1.0 - ecc).sqrt() * s).atan2((1.0 + ecc).sqrt() * c);
    principal_angle(u - ecc * u.sin())
}

/// Mean anomaly of a hyperbola from its true anomaly (unbounded, signed).
pub(crate) fn mean_from_true_hyperbolic(true_anomaly: f64, ecc: f64) -> f64 {
    let f = 2.0 * (((ecc - 1.0) / (ecc + 1.0)).sqrt() * (true_anomaly / 2.0).tan()).atanh();
    ecc * f.sinh() - f
}
