//! # Canonical orbit elements
//!
//! This module defines [`CanonicalOrbit`], the **single orbit representation** every
//! editing form converts to, and [`LiveOrbit`], the mutable orbit record a
//! simulation entity carries together with its derived state.
//!
//! ## Elements
//!
//! 1. **i** – Inclination (degrees)
//! 2. **e** – Eccentricity (unitless, ≥ 0)
//! 3. **a** – Semi-major axis (meters, **negative** for hyperbolic orbits)
//! 4. **Ω** – Longitude of ascending node (degrees)
//! 5. **ω** – Argument of periapsis (degrees)
//! 6. **M₀** – Mean anomaly at epoch (radians)
//!
//! plus the epoch (seconds of universal time) and the [`BodyId`] of the reference body.
//!
//! ## Sanitizing
//!
//! Every editing form funnels its raw numbers through [`CanonicalOrbit::sanitized`],
//! which replaces non-finite values, enforces the sign convention of the semi-major
//! axis and wraps the mean anomaly of closed orbits into `[0, 2π)`.
//!
//! ## Frames
//!
//! State vectors are expressed in the inertial frame of the reference body, with `+z`
//! along its polar axis. The perifocal → inertial rotation is `Rz(Ω)·Rx(i)·Rz(ω)`.
//!
//! ## See also
//!
//! - [`principal_angle`] – angle normalization helper.
//! - [`crate::committer`] – applies a [`CanonicalOrbit`] to a live entity.
use std::fmt;

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    body::{BodyId, CelestialBody},
    constants::{Degree, Meter, Radian, Seconds, DPI, EPS, RADEG},
    kepler::{
        eccentric_anomaly, hyperbolic_anomaly, mean_from_true_elliptic,
        mean_from_true_hyperbolic, principal_angle, principal_angle_deg, true_from_eccentric,
        true_from_hyperbolic,
    },
    params::EditorParams,
};

/// Position and velocity relative to the reference body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Classical orbit elements, epoch and reference body.
///
/// Units
/// -----
/// * `inclination`, `longitude_ascending_node`, `argument_of_periapsis`: degrees.
/// * `eccentricity`: unitless.
/// * `semi_major_axis`: meters, signed (negative for `e > 1`).
/// * `mean_anomaly_at_epoch`: radians.
/// * `epoch`: seconds of universal time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalOrbit {
    pub inclination: Degree,
    pub eccentricity: f64,
    pub semi_major_axis: Meter,
    pub longitude_ascending_node: Degree,
    pub argument_of_periapsis: Degree,
    pub mean_anomaly_at_epoch: Radian,
    pub epoch: Seconds,
    pub reference_body: BodyId,
}

/// Sign of `x` as -1, 0 or 1. Zero (either sign) maps to 0.
fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

impl CanonicalOrbit {
    /// Apply the shared edge-case policy of every editing form.
    ///
    /// Steps, in order:
    /// 1. Non-finite inclination, eccentricity, node, periapsis argument or mean anomaly → `0`.
    /// 2. Non-finite semi-major axis → `radius + max_atmosphere_altitude + fallback_altitude_margin`.
    /// 3. Non-finite epoch → the **mean anomaly** is set to `universal_time`; the epoch is
    ///    left untouched.
    /// 4. If `sign(e − 1) == sign(a)` the sign of `a` is flipped, so closed orbits carry a
    ///    positive and open orbits a negative semi-major axis.
    /// 5. If `a ≥ 0` the mean anomaly is wrapped into `[0, 2π)`.
    ///
    /// Arguments
    /// ---------
    /// * `body` – the reference body (its radius and atmosphere define the fallback axis).
    /// * `universal_time` – current simulation time.
    /// * `params` – editor configuration.
    pub fn sanitized(
        mut self,
        body: &CelestialBody,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Self {
        fn finite_or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() {
                v
            } else {
                fallback
            }
        }

        self.inclination = finite_or(self.inclination, 0.0);
        self.eccentricity = finite_or(self.eccentricity, 0.0);
        self.semi_major_axis = finite_or(
            self.semi_major_axis,
            body.radius + body.max_atmosphere_altitude + params.fallback_altitude_margin,
        );
        self.longitude_ascending_node = finite_or(self.longitude_ascending_node, 0.0);
        self.argument_of_periapsis = finite_or(self.argument_of_periapsis, 0.0);
        self.mean_anomaly_at_epoch = finite_or(self.mean_anomaly_at_epoch, 0.0);
        if !self.epoch.is_finite() {
            self.mean_anomaly_at_epoch = universal_time;
        }

        if sign(self.eccentricity - 1.0) == sign(self.semi_major_axis) {
            self.semi_major_axis = -self.semi_major_axis;
        }

        if sign(self.semi_major_axis) >= 0 {
            self.mean_anomaly_at_epoch = principal_angle(self.mean_anomaly_at_epoch);
        }
        self
    }

    /// `true` for orbits with a negative semi-major axis.
    pub fn is_hyperbolic(&self) -> bool {
        self.semi_major_axis < 0.0
    }

    /// Periapsis radius `a(1 − e)` (meters, from the body center).
    pub fn periapsis(&self) -> Meter {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Mean motion `n = sqrt(μ / |a|³)` (rad/s).
    pub fn mean_motion(&self, mu: f64) -> f64 {
        (mu / self.semi_major_axis.abs().powi(3)).sqrt()
    }

    /// Mean anomaly at `universal_time`. Wrapped into `[0, 2π)` for closed orbits only.
    pub fn mean_anomaly_at(&self, mu: f64, universal_time: Seconds) -> Radian {
        let m = self.mean_anomaly_at_epoch + self.mean_motion(mu) * (universal_time - self.epoch);
        if self.is_hyperbolic() {
            m
        } else {
            principal_angle(m)
        }
    }

    /// True anomaly at `universal_time` (radians).
    ///
    /// Return
    /// ------
    /// * `None` for parabolic (`e = 1`), negative-eccentricity or non-finite element sets,
    ///   and when the Kepler solver does not converge.
    pub fn true_anomaly_at(&self, mu: f64, universal_time: Seconds) -> Option<Radian> {
        let e = self.eccentricity;
        let m = self.mean_anomaly_at(mu, universal_time);
        if e < 1.0 {
            eccentric_anomaly(m, e).map(|u| true_from_eccentric(u, e))
        } else if e > 1.0 {
            hyperbolic_anomaly(m, e).map(|f| true_from_hyperbolic(f, e))
        } else {
            None
        }
    }

    /// Evaluate the two-body position and velocity at `universal_time`.
    ///
    /// Arguments
    /// ---------
    /// * `mu` – gravitational parameter of the reference body (m³/s²).
    /// * `universal_time` – evaluation time (s).
    ///
    /// Return
    /// ------
    /// * `Some(StateVector)` when the state is finite, `None` otherwise (parabolic orbits,
    ///   zero semi-major axis, non-finite epoch, …).
    pub fn state_at(&self, mu: f64, universal_time: Seconds) -> Option<StateVector> {
        let e = self.eccentricity;
        let a = self.semi_major_axis.abs();
        if mu.is_nan() || a.is_nan() || mu <= 0.0 || a <= 0.0 {
            return None;
        }
        let m = self.mean_anomaly_at(mu, universal_time);

        let (pos_pf, vel_pf) = if e < 1.0 {
            let u = eccentric_anomaly(m, e)?;
            let (sin_u, cos_u) = u.sin_cos();
            let b = (1.0 - e * e).sqrt();
            let r = a * (1.0 - e * cos_u);
            let k = (mu * a).sqrt() / r;
            (
                Vector3::new(a * (cos_u - e), a * b * sin_u, 0.0),
                Vector3::new(-k * sin_u, k * b * cos_u, 0.0),
            )
        } else if e > 1.0 {
            let f = hyperbolic_anomaly(m, e)?;
            let (sinh_f, cosh_f) = (f.sinh(), f.cosh());
            let b = (e * e - 1.0).sqrt();
            let r = a * (e * cosh_f - 1.0);
            let k = (mu * a).sqrt() / r;
            (
                Vector3::new(a * (e - cosh_f), a * b * sinh_f, 0.0),
                Vector3::new(-k * sinh_f, k * b * cosh_f, 0.0),
            )
        } else {
            return None;
        };

        let rot = self.perifocal_rotation();
        let state = StateVector {
            position: rot * pos_pf,
            velocity: rot * vel_pf,
        };
        let finite = state.position.iter().all(|c| c.is_finite())
            && state.velocity.iter().all(|c| c.is_finite());
        finite.then_some(state)
    }

    /// Rotation from the perifocal frame to the reference body's inertial frame.
    fn perifocal_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.longitude_ascending_node * RADEG)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), self.inclination * RADEG)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), self.argument_of_periapsis * RADEG)
    }

    /// Build the osculating elements of a state vector, with the epoch set to
    /// `universal_time`.
    ///
    /// Degenerate directions follow the usual conventions:
    /// - equatorial orbits (`i ≈ 0` or `i ≈ 180°`): `Ω = 0` and angles are measured from `+x`;
    /// - circular orbits (`e ≈ 0`): `ω = 0` and the mean anomaly is the argument of latitude.
    ///
    /// Arguments
    /// ---------
    /// * `position`, `velocity` – state relative to the reference body (m, m/s).
    /// * `mu` – gravitational parameter of the reference body (m³/s²).
    /// * `universal_time` – time the state refers to; becomes the epoch.
    /// * `reference_body` – identity stored in the result.
    ///
    /// Return
    /// ------
    /// * The element set. The semi-major axis is negative for hyperbolic states and
    ///   non-finite for exactly parabolic ones.
    pub fn from_state_vectors(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        mu: f64,
        universal_time: Seconds,
        reference_body: BodyId,
    ) -> Self {
        let r = position.norm();
        let angular_momentum = position.cross(velocity);
        let hmag = angular_momentum.norm();
        let h_hat = angular_momentum / hmag;

        let inclination = (angular_momentum.z / hmag).clamp(-1.0, 1.0).acos();

        let node = Vector3::z().cross(&angular_momentum);
        let (node_hat, longitude_ascending_node) = if node.norm() > EPS * hmag {
            (node.normalize(), principal_angle(node.y.atan2(node.x)))
        } else {
            (Vector3::x(), 0.0)
        };

        let lenz_vector = velocity.cross(&angular_momentum) / mu - position / r;
        let eccentricity = lenz_vector.norm();

        let energy = velocity.norm_squared() / 2.0 - mu / r;
        let semi_major_axis = -mu / (2.0 * energy);

        let r_hat = position / r;
        let angle_from = |from: &Vector3<f64>, to: &Vector3<f64>| -> f64 {
            h_hat.dot(&from.cross(to)).atan2(from.dot(to))
        };

        let (argument_of_periapsis, true_anomaly) = if eccentricity > EPS {
            let e_hat = lenz_vector / eccentricity;
            (
                principal_angle(angle_from(&node_hat, &e_hat)),
                principal_angle(angle_from(&e_hat, &r_hat)),
            )
        } else {
            (0.0, principal_angle(angle_from(&node_hat, &r_hat)))
        };

        let mean_anomaly_at_epoch = if eccentricity < 1.0 {
            mean_from_true_elliptic(true_anomaly, eccentricity)
        } else {
            mean_from_true_hyperbolic(true_anomaly, eccentricity)
        };

        CanonicalOrbit {
            inclination: inclination / RADEG,
            eccentricity,
            semi_major_axis,
            longitude_ascending_node: principal_angle_deg(longitude_ascending_node / RADEG),
            argument_of_periapsis: principal_angle_deg(argument_of_periapsis / RADEG),
            mean_anomaly_at_epoch,
            epoch: universal_time,
            reference_body,
        }
    }
}

impl fmt::Display for CanonicalOrbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Canonical orbit around body #{} @ epoch {:.3} s",
            self.reference_body.0, self.epoch
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.3} m",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.longitude_ascending_node
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.argument_of_periapsis
        )?;
        writeln!(
            f,
            "  M₀  (mean anomaly at epoch) = {:.6} rad ({:.6}°)",
            self.mean_anomaly_at_epoch,
            self.mean_anomaly_at_epoch / RADEG
        )
    }
}

/// Mutable orbit record of a simulation entity.
///
/// Holds the stored elements together with the derived state the simulation reads:
/// mean motion, period, anomalies and the relative position/velocity at the last
/// update time. The derived fields are only meaningful after [`LiveOrbit::init`] and
/// [`LiveOrbit::update_from_ut`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiveOrbit {
    pub elements: CanonicalOrbit,
    /// Gravitational parameter of the reference body (m³/s²).
    pub mu: f64,
    pub mean_motion: f64,
    /// Orbital period (s); infinite for open orbits.
    pub period: Seconds,
    pub mean_anomaly: Radian,
    pub true_anomaly: Radian,
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
    pub last_update: Seconds,
}

impl LiveOrbit {
    /// Build an initialized record evaluated at `universal_time`.
    ///
    /// Return
    /// ------
    /// * `None` if the state cannot be evaluated at `universal_time`.
    pub fn new(elements: CanonicalOrbit, mu: f64, universal_time: Seconds) -> Option<Self> {
        let mut orbit = LiveOrbit {
            elements,
            mu,
            mean_motion: 0.0,
            period: f64::INFINITY,
            mean_anomaly: 0.0,
            true_anomaly: 0.0,
            pos: Vector3::zeros(),
            vel: Vector3::zeros(),
            last_update: universal_time,
        };
        orbit.init();
        orbit.update_from_ut(universal_time).then_some(orbit)
    }

    pub fn reference_body(&self) -> BodyId {
        self.elements.reference_body
    }

    /// Recompute the time-independent derived quantities from the stored elements.
    pub fn init(&mut self) {
        self.mean_motion = self.elements.mean_motion(self.mu);
        self.period = if self.elements.is_hyperbolic() {
            f64::INFINITY
        } else {
            DPI / self.mean_motion
        };
    }

    /// Recompute anomalies, position and velocity at `universal_time`.
    ///
    /// Returns `false` and leaves the cached state untouched when the elements cannot be
    /// evaluated at that time.
    pub fn update_from_ut(&mut self, universal_time: Seconds) -> bool {
        let state = self.elements.state_at(self.mu, universal_time);
        let nu = self.elements.true_anomaly_at(self.mu, universal_time);
        match (state, nu) {
            (Some(state), Some(nu)) => {
                self.mean_anomaly = self.elements.mean_anomaly_at(self.mu, universal_time);
                self.true_anomaly = nu;
                self.pos = state.position;
                self.vel = state.velocity;
                self.last_update = universal_time;
                true
            }
            _ => false,
        }
    }

    /// Evaluate the stored elements at an arbitrary time without touching the cache.
    pub fn state_at(&self, universal_time: Seconds) -> Option<StateVector> {
        self.elements.state_at(self.mu, universal_time)
    }

    /// Unit vector along the orbital angular momentum at the last update.
    pub fn orbit_normal(&self) -> Vector3<f64> {
        self.pos.cross(&self.vel).normalize()
    }
}
