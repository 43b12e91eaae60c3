use serde::{Deserialize, Serialize};

use crate::{
    constants::Seconds,
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    universe::{OrbitingEntity, Universe},
    vessel::VesselId,
};

/// Place the edited entity on `target`'s orbit, `lead_time` seconds ahead of it.
///
/// A positive lead time moves the epoch back, so the edited entity reaches every point
/// of the shared orbit `lead_time` seconds before the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RendezvousParams {
    pub lead_time: Seconds,
    pub target: VesselId,
}

impl RendezvousParams {
    pub fn to_orbit(
        &self,
        universe: &Universe,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        let target = universe.driver(OrbitingEntity::Vessel(self.target))?.orbit.elements;
        let body = universe.body(target.reference_body)?;
        Ok(CanonicalOrbit {
            epoch: target.epoch - self.lead_time,
            ..target
        }
        .sanitized(body, universal_time, params))
    }
}
