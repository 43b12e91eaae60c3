use serde::{Deserialize, Serialize};

use crate::{
    body::BodyId,
    constants::{Degree, Meter, Radian, Seconds},
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::Universe,
};

/// The seven raw elements and the reference body, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexParams {
    pub inclination: Degree,
    pub eccentricity: f64,
    pub semi_major_axis: Meter,
    pub longitude_ascending_node: Degree,
    pub argument_of_periapsis: Degree,
    pub mean_anomaly_at_epoch: Radian,
    pub epoch: Seconds,
    pub body: BodyId,
}

impl ComplexParams {
    pub fn to_orbit(
        &self,
        universe: &Universe,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        let body = universe.body(self.body)?;
        Ok(CanonicalOrbit::from(*self).sanitized(body, universal_time, params))
    }

    pub fn from_orbit(orbit: &CanonicalOrbit) -> Self {
        ComplexParams {
            inclination: orbit.inclination,
            eccentricity: orbit.eccentricity,
            semi_major_axis: orbit.semi_major_axis,
            longitude_ascending_node: orbit.longitude_ascending_node,
            argument_of_periapsis: orbit.argument_of_periapsis,
            mean_anomaly_at_epoch: orbit.mean_anomaly_at_epoch,
            epoch: orbit.epoch,
            body: orbit.reference_body,
        }
    }
}

impl From<ComplexParams> for CanonicalOrbit {
    fn from(p: ComplexParams) -> Self {
        CanonicalOrbit {
            inclination: p.inclination,
            eccentricity: p.eccentricity,
            semi_major_axis: p.semi_major_axis,
            longitude_ascending_node: p.longitude_ascending_node,
            argument_of_periapsis: p.argument_of_periapsis,
            mean_anomaly_at_epoch: p.mean_anomaly_at_epoch,
            epoch: p.epoch,
            reference_body: p.body,
        }
    }
}
