//! Slider form of an orbit.
//!
//! Six values in `[0, 1]` drive the orbit around the **current** reference body of the
//! edited entity. Periapsis is spread logarithmically between just above the atmosphere
//! (`p = 0`) and the usable sphere of influence (`p = 1`); eccentricity follows
//! `tan(ecc · (π/2 − offset))`, so the upper half of the slider covers open orbits.
//!
//! Three inputs are not recovered by [`GraphicalParams::from_orbit`]:
//! - `ecc ≈ 0.5003` maps to `e = 1`, whose infinite semi-major axis is replaced by the
//!   sanitizer fallback;
//! - an elliptical mean anomaly of exactly `1` is one full turn and reads back as `0`;
//! - on a body whose usable sphere of influence does not reach past
//!   `radius + atmosphere + margin` the periapsis scale collapses, every `p` gives the
//!   same periapsis and the slider reads back as `0`.
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    body::CelestialBody,
    constants::{Seconds, DPI, FULL_TURN_DEG},
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::{OrbitingEntity, Universe},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphicalParams {
    pub inclination: f64,
    pub eccentricity: f64,
    pub periapsis: f64,
    pub longitude_ascending_node: f64,
    pub argument_of_periapsis: f64,
    pub mean_anomaly: f64,
}

/// `soi / (radius + atmosphere + margin)`, the base of the periapsis scale.
fn periapsis_ratio(body: &CelestialBody, soi: f64, params: &EditorParams) -> f64 {
    soi / (body.radius + body.max_atmosphere_altitude + params.graphical_surface_margin)
}

impl GraphicalParams {
    /// Convert slider values to elements around the entity's current reference body.
    ///
    /// Errors
    /// ------
    /// * `UnknownEntity` / `UnknownBody` if the entity or its reference body does not exist.
    pub fn to_orbit(
        &self,
        universe: &Universe,
        entity: OrbitingEntity,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        let body_id = universe.driver(entity)?.orbit.reference_body();
        let body = universe.body(body_id)?;
        Ok(self
            .unsanitized_orbit(body, params)
            .sanitized(body, universal_time, params))
    }

    fn unsanitized_orbit(&self, body: &CelestialBody, params: &EditorParams) -> CanonicalOrbit {
        let soi = body.soi(params);
        let ratio = periapsis_ratio(body, soi, params);
        let periapsis = soi * ratio.powf(self.periapsis - 1.0);
        let eccentricity = (self.eccentricity * params.eccentricity_slider_span()).tan();
        let semi_major_axis = periapsis / (1.0 - eccentricity);

        let mut mean_anomaly = self.mean_anomaly;
        if semi_major_axis < 0.0 {
            mean_anomaly = (mean_anomaly / PI - 1.0) * params.hyperbolic_mean_anomaly_stretch;
        }

        CanonicalOrbit {
            inclination: self.inclination * FULL_TURN_DEG,
            eccentricity,
            semi_major_axis,
            longitude_ascending_node: self.longitude_ascending_node * FULL_TURN_DEG,
            argument_of_periapsis: self.argument_of_periapsis * FULL_TURN_DEG,
            mean_anomaly_at_epoch: mean_anomaly * DPI,
            epoch: 0.0,
            reference_body: body.id,
        }
    }

    /// Read an orbit back into slider values. Exact inverse of [`GraphicalParams::to_orbit`]
    /// apart from the two boundary cases listed in the module documentation.
    pub fn from_orbit(orbit: &CanonicalOrbit, body: &CelestialBody, params: &EditorParams) -> Self {
        let soi = body.soi(params);
        let scale = periapsis_ratio(body, soi, params).ln();
        let periapsis = if scale > 0.0 {
            (orbit.periapsis() / soi).ln() / scale + 1.0
        } else {
            0.0
        };

        let mut mean_anomaly = orbit.mean_anomaly_at_epoch / DPI;
        if orbit.semi_major_axis < 0.0 {
            mean_anomaly = (mean_anomaly / params.hyperbolic_mean_anomaly_stretch + 1.0) * PI;
        }

        GraphicalParams {
            inclination: orbit.inclination / FULL_TURN_DEG,
            eccentricity: orbit.eccentricity.atan() / params.eccentricity_slider_span(),
            periapsis,
            longitude_ascending_node: orbit.longitude_ascending_node / FULL_TURN_DEG,
            argument_of_periapsis: orbit.argument_of_periapsis / FULL_TURN_DEG,
            mean_anomaly,
        }
    }
}
