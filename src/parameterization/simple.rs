use serde::{Deserialize, Serialize};

use crate::{
    body::{BodyId, CelestialBody},
    constants::{Meter, Seconds},
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::Universe,
};

/// Circular, equatorial orbit `altitude` meters above the surface of `body`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleParams {
    pub altitude: Meter,
    pub body: BodyId,
}

impl SimpleParams {
    /// Canonical elements `{0, 0, altitude + radius, 0, 0, 0}` at epoch 0 around `body`.
    pub fn to_orbit(
        &self,
        universe: &Universe,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        let body = universe.body(self.body)?;
        Ok(CanonicalOrbit {
            inclination: 0.0,
            eccentricity: 0.0,
            semi_major_axis: self.altitude + body.radius,
            longitude_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly_at_epoch: 0.0,
            epoch: 0.0,
            reference_body: self.body,
        }
        .sanitized(body, universal_time, params))
    }

    /// Read an orbit back as an altitude, floored at `params.min_simple_altitude`.
    pub fn from_orbit(orbit: &CanonicalOrbit, body: &CelestialBody, params: &EditorParams) -> Self {
        SimpleParams {
            altitude: (orbit.semi_major_axis - body.radius).max(params.min_simple_altitude),
            body: orbit.reference_body,
        }
    }
}
