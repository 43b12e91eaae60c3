//! Celestial bodies and the body hierarchy.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{constants::Meter, driver::OrbitDriver, params::EditorParams};

/// Index of a [`CelestialBody`] inside its [`Universe`](crate::universe::Universe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// A celestial body.
///
/// Every body except the root of the hierarchy owns an [`OrbitDriver`] describing its
/// orbit around its parent and is listed exactly once in that parent's
/// `orbiting_bodies`.
#[derive(Debug)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    /// Mean radius (m)
    pub radius: Meter,
    /// Height of the top of the atmosphere above the surface, 0 without atmosphere (m)
    pub max_atmosphere_altitude: Meter,
    /// Raw sphere-of-influence radius as computed by the simulation (m)
    pub sphere_of_influence: Meter,
    /// Standard gravitational parameter μ (m³/s²)
    pub gravitational_parameter: f64,
    /// Bodies whose reference body is this one.
    pub orbiting_bodies: Vec<BodyId>,
    pub orbit_driver: Option<OrbitDriver>,
    /// Position relative to the parent, refreshed by [`CelestialBody::cb_update`].
    pub position: Vector3<f64>,
}

impl CelestialBody {
    /// Create a body without an orbit (the root of a hierarchy, or a body whose driver
    /// is attached later).
    pub fn new(
        id: BodyId,
        name: impl Into<String>,
        radius: Meter,
        max_atmosphere_altitude: Meter,
        sphere_of_influence: Meter,
        gravitational_parameter: f64,
    ) -> Self {
        CelestialBody {
            id,
            name: name.into(),
            radius,
            max_atmosphere_altitude,
            sphere_of_influence,
            gravitational_parameter,
            orbiting_bodies: Vec::new(),
            orbit_driver: None,
            position: Vector3::zeros(),
        }
    }

    /// Usable sphere of influence: `soi_scale × sphere_of_influence`, replaced by
    /// `soi_ceiling` when that value is non-finite, negative or above the ceiling.
    pub fn soi(&self, params: &EditorParams) -> Meter {
        let radius = self.sphere_of_influence * params.soi_scale;
        if !radius.is_finite() || radius < 0.0 || radius > params.soi_ceiling {
            params.soi_ceiling
        } else {
            radius
        }
    }

    /// Reference body of this body's orbit, `None` for the root.
    pub fn reference_body(&self) -> Option<BodyId> {
        self.orbit_driver
            .as_ref()
            .map(|driver| driver.orbit.reference_body())
    }

    /// Refresh the state derived from the body's orbit.
    pub fn cb_update(&mut self) {
        self.position = self
            .orbit_driver
            .as_ref()
            .map_or_else(Vector3::zeros, |driver| driver.orbit.pos);
    }
}
