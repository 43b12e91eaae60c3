//! Instantaneous velocity change ("burn") form.
//!
//! The change is expressed in a frame built from the entity's state at the current
//! simulation time, relative to its reference body:
//!
//! | Direction  | Unit vector              |
//! |------------|--------------------------|
//! | `Prograde` | `v̂`                      |
//! | `Normal`   | `ĥ = (r × v)^`           |
//! | `Radial`   | `(v × h)^`               |
//! | `North`    | `((û × ẑ) × û)^`         |
//! | `East`     | `(ẑ × û)^`               |
//! | `Up`       | `û = r̂`                  |
//!
//! North and East are undefined straight above a pole; the change is then dropped with a
//! warning.
use std::{fmt, str::FromStr};

use log::warn;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{MeterPerSecond, Seconds, EPS},
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::{OrbitingEntity, Universe},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VelocityChangeDirection {
    #[default]
    Prograde,
    Normal,
    Radial,
    North,
    East,
    Up,
}

impl VelocityChangeDirection {
    /// Every direction, in the order a picker lists them.
    pub const ALL: [VelocityChangeDirection; 6] = [
        VelocityChangeDirection::Prograde,
        VelocityChangeDirection::Normal,
        VelocityChangeDirection::Radial,
        VelocityChangeDirection::North,
        VelocityChangeDirection::East,
        VelocityChangeDirection::Up,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VelocityChangeDirection::Prograde => "Prograde",
            VelocityChangeDirection::Normal => "Normal",
            VelocityChangeDirection::Radial => "Radial",
            VelocityChangeDirection::North => "North",
            VelocityChangeDirection::East => "East",
            VelocityChangeDirection::Up => "Up",
        }
    }

    /// Unit vector of this direction for the state `(position, velocity)`.
    ///
    /// Returns `None` when the direction is undefined for that state (zero velocity,
    /// radial motion, or a position on the polar axis).
    pub fn unit_vector(
        &self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Option<Vector3<f64>> {
        let up = position.try_normalize(EPS)?;
        let angular_momentum = position.cross(velocity);
        let raw = match self {
            VelocityChangeDirection::Prograde => *velocity,
            VelocityChangeDirection::Normal => angular_momentum,
            VelocityChangeDirection::Radial => velocity.cross(&angular_momentum),
            VelocityChangeDirection::North => up.cross(&Vector3::z()).cross(&up),
            VelocityChangeDirection::East => Vector3::z().cross(&up),
            VelocityChangeDirection::Up => up,
        };
        raw.try_normalize(EPS)
    }
}

impl fmt::Display for VelocityChangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VelocityChangeDirection {
    type Err = EditorError;

    /// Parse a direction name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EditorError::UnknownVelocityDirection(s.to_string()))
    }
}

/// A velocity change of `speed` m/s along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityParams {
    pub direction: VelocityChangeDirection,
    pub speed: MeterPerSecond,
}

impl VelocityParams {
    /// Value shown for an existing orbit. There is no change to read back, so this is
    /// always `(Prograde, 0)`.
    pub fn current() -> Self {
        VelocityParams::default()
    }

    /// Velocity change vector for the state `(position, velocity)`.
    pub fn delta_v(&self, position: &Vector3<f64>, velocity: &Vector3<f64>) -> Vector3<f64> {
        match self.direction.unit_vector(position, velocity) {
            Some(unit) => unit * self.speed,
            None => {
                warn!(
                    "{} direction is undefined at position {:?}, velocity change ignored",
                    self.direction,
                    position.as_slice()
                );
                Vector3::zeros()
            }
        }
    }

    /// Apply the change to the entity's state at `universal_time` and derive the new
    /// elements, with the epoch set to `universal_time`.
    ///
    /// Errors
    /// ------
    /// * `UnknownEntity` / `UnknownBody` for missing ids.
    /// * `NonFiniteState` if the entity's current orbit cannot be evaluated.
    pub fn to_orbit(
        &self,
        universe: &Universe,
        entity: OrbitingEntity,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        let orbit = &universe.driver(entity)?.orbit;
        let body_id = orbit.reference_body();
        let body = universe.body(body_id)?;
        let state = orbit
            .state_at(universal_time)
            .ok_or(EditorError::NonFiniteState)?;

        let velocity = state.velocity + self.delta_v(&state.position, &state.velocity);
        Ok(CanonicalOrbit::from_state_vectors(
            &state.position,
            &velocity,
            orbit.mu,
            universal_time,
            body_id,
        )
        .sanitized(body, universal_time, params))
    }
}

#[cfg(test)]
mod velocity_test {
    use super::*;
    use crate::universe::test_universe::{kerbol_system, KERBIN_MU};
    use crate::vessel::VesselId;
    use approx::assert_relative_eq;

    const VESSEL: OrbitingEntity = OrbitingEntity::Vessel(VesselId(0));

    #[test]
    fn test_direction_names() {
        for d in VelocityChangeDirection::ALL {
            assert_eq!(d.to_string().parse::<VelocityChangeDirection>(), Ok(d));
        }
        assert_eq!("east".parse::<VelocityChangeDirection>(), Ok(VelocityChangeDirection::East));
        assert_eq!(
            "Sideways".parse::<VelocityChangeDirection>(),
            Err(EditorError::UnknownVelocityDirection("Sideways".into()))
        );
    }

    #[test]
    fn test_local_frame_on_equatorial_orbit() {
        let r = Vector3::new(700_000.0, 0.0, 0.0);
        let v = Vector3::new(0.0, 2_000.0, 0.0);
        let unit = |d: VelocityChangeDirection| d.unit_vector(&r, &v).unwrap();
        assert_relative_eq!(unit(VelocityChangeDirection::Prograde), Vector3::y());
        assert_relative_eq!(unit(VelocityChangeDirection::Normal), Vector3::z());
        assert_relative_eq!(unit(VelocityChangeDirection::Radial), Vector3::x());
        assert_relative_eq!(unit(VelocityChangeDirection::North), Vector3::z());
        assert_relative_eq!(unit(VelocityChangeDirection::East), Vector3::y());
        assert_relative_eq!(unit(VelocityChangeDirection::Up), Vector3::x());
    }

    #[test]
    fn test_pole_drops_north_and_east() {
        let r = Vector3::new(0.0, 0.0, 700_000.0);
        let v = Vector3::new(2_000.0, 0.0, 0.0);
        let p = VelocityParams {
            direction: VelocityChangeDirection::North,
            speed: 50.0,
        };
        assert_eq!(p.delta_v(&r, &v), Vector3::zeros());
        let up = VelocityParams {
            direction: VelocityChangeDirection::Up,
            speed: 50.0,
        };
        assert_relative_eq!(up.delta_v(&r, &v), Vector3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn test_up_burn_keeps_tangential_speed() {
        let universe = kerbol_system();
        let params = EditorParams::default();
        let t = 300.0;
        let before = universe
            .driver(VESSEL)
            .unwrap()
            .orbit
            .state_at(t)
            .unwrap();

        let orbit = VelocityParams {
            direction: VelocityChangeDirection::Up,
            speed: 100.0,
        }
        .to_orbit(&universe, VESSEL, t, &params)
        .unwrap();
        assert_eq!(orbit.epoch, t);

        let after = orbit.state_at(KERBIN_MU, t).unwrap();
        let up = before.position.normalize();
        assert_relative_eq!(after.position, before.position, epsilon = 1e-2);
        assert_relative_eq!(after.velocity.dot(&up), 100.0, epsilon = 1e-6);
        let tangential = |v: Vector3<f64>| (v - up * v.dot(&up)).norm();
        assert_relative_eq!(
            tangential(after.velocity),
            tangential(before.velocity),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_zero_speed_keeps_orbit() {
        let universe = kerbol_system();
        let orbit = VelocityParams::current()
            .to_orbit(&universe, VESSEL, 0.0, &EditorParams::default())
            .unwrap();
        assert_relative_eq!(orbit.semi_major_axis, 700_000.0, max_relative = 1e-9);
        assert!(orbit.eccentricity < 1e-9);
    }
}
