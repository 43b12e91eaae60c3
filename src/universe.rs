//! # Simulation model seen by the orbit editor
//!
//! [`Universe`] owns every entity the editor can read or rewrite:
//!
//! - the **body hierarchy** ([`CelestialBody`], rooted at [`BodyId`] `0`);
//! - the **vessels** ([`Vessel`]) and which of them is the active one;
//! - **detached drivers**, orbit drivers with no live owner;
//! - the **vessel SOI-change notification channel** ([`Universe::on_vessel_soi_changed`]).
//!
//! Entities are addressed through [`OrbitingEntity`], a tagged union over the three
//! kinds of owners an orbit driver can have.
//!
//! ```rust
//! use orbit_editor::body::BodyId;
//! use orbit_editor::orbit::CanonicalOrbit;
//! use orbit_editor::universe::Universe;
//!
//! let mut universe = Universe::new("Kerbol", 261_600_000.0, 0.0, 1.1723328e18);
//! let kerbin_orbit = CanonicalOrbit {
//!     inclination: 0.0,
//!     eccentricity: 0.0,
//!     semi_major_axis: 13_599_840_256.0,
//!     longitude_ascending_node: 0.0,
//!     argument_of_periapsis: 0.0,
//!     mean_anomaly_at_epoch: 3.14,
//!     epoch: 0.0,
//!     reference_body: BodyId(0),
//! };
//! let kerbin = universe
//!     .add_body("Kerbin", 600_000.0, 70_000.0, 84_159_286.0, 3.5316e12, kerbin_orbit, 0.0)
//!     .unwrap();
//! assert_eq!(universe.body_by_name("Kerbin"), Some(kerbin));
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    body::{BodyId, CelestialBody},
    constants::{Meter, Seconds},
    driver::OrbitDriver,
    editor_errors::EditorError,
    orbit::{CanonicalOrbit, LiveOrbit},
    vessel::{Part, Vessel, VesselId},
};

/// Index of a detached [`OrbitDriver`] inside its [`Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub usize);

/// Owner of an orbit driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitingEntity {
    Vessel(VesselId),
    Body(BodyId),
    /// A driver with no live owner.
    Detached(DriverId),
}

impl fmt::Display for OrbitingEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrbitingEntity::Vessel(id) => write!(f, "vessel #{}", id.0),
            OrbitingEntity::Body(id) => write!(f, "body #{}", id.0),
            OrbitingEntity::Detached(id) => write!(f, "driver #{}", id.0),
        }
    }
}

/// Payload of the vessel SOI-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoiChange {
    pub vessel: VesselId,
    pub from: BodyId,
    pub to: BodyId,
}

pub type SoiChangeListener = Box<dyn FnMut(&SoiChange)>;

pub struct Universe {
    bodies: Vec<CelestialBody>,
    vessels: Vec<Vessel>,
    detached: Vec<OrbitDriver>,
    active_vessel: Option<VesselId>,
    soi_listeners: Vec<SoiChangeListener>,
}

impl Universe {
    /// Create a universe containing only the root body (id `0`), whose sphere of
    /// influence is infinite.
    pub fn new(root_name: impl Into<String>, radius: Meter, max_atmosphere_altitude: Meter, mu: f64) -> Self {
        let root = CelestialBody::new(
            BodyId(0),
            root_name,
            radius,
            max_atmosphere_altitude,
            f64::INFINITY,
            mu,
        );
        Universe {
            bodies: vec![root],
            vessels: Vec::new(),
            detached: Vec::new(),
            active_vessel: None,
            soi_listeners: Vec::new(),
        }
    }

    fn live_orbit(&self, orbit: CanonicalOrbit, universal_time: Seconds) -> Result<LiveOrbit, EditorError> {
        let mu = self.body(orbit.reference_body)?.gravitational_parameter;
        LiveOrbit::new(orbit, mu, universal_time).ok_or(EditorError::NonFiniteState)
    }

    /// Add a body orbiting `orbit.reference_body` and register it as a child of that body.
    #[allow(clippy::too_many_arguments)]
    pub fn add_body(
        &mut self,
        name: impl Into<String>,
        radius: Meter,
        max_atmosphere_altitude: Meter,
        sphere_of_influence: Meter,
        mu: f64,
        orbit: CanonicalOrbit,
        universal_time: Seconds,
    ) -> Result<BodyId, EditorError> {
        let live = self.live_orbit(orbit, universal_time)?;
        let id = BodyId(self.bodies.len());
        let name = name.into();
        let mut body = CelestialBody::new(
            id,
            name.clone(),
            radius,
            max_atmosphere_altitude,
            sphere_of_influence,
            mu,
        );
        body.orbit_driver = Some(OrbitDriver::new(name, live));
        body.cb_update();
        self.bodies.push(body);
        self.body_mut(orbit.reference_body)?.orbiting_bodies.push(id);
        Ok(id)
    }

    /// Add an unpacked vessel in flight on `orbit`.
    pub fn add_vessel(
        &mut self,
        name: impl Into<String>,
        parts: Vec<Part>,
        orbit: CanonicalOrbit,
        universal_time: Seconds,
    ) -> Result<VesselId, EditorError> {
        let live = self.live_orbit(orbit, universal_time)?;
        let id = VesselId(self.vessels.len());
        let name = name.into();
        let mut vessel = Vessel::new(id, name.clone(), parts, OrbitDriver::new(name, live));
        vessel.packed = false;
        self.vessels.push(vessel);
        Ok(id)
    }

    /// Add a driver that is owned by neither a vessel nor a body.
    pub fn add_detached(
        &mut self,
        name: impl Into<String>,
        orbit: CanonicalOrbit,
        universal_time: Seconds,
    ) -> Result<DriverId, EditorError> {
        let live = self.live_orbit(orbit, universal_time)?;
        let id = DriverId(self.detached.len());
        self.detached.push(OrbitDriver::new(name, live));
        Ok(id)
    }

    pub fn set_active_vessel(&mut self, vessel: Option<VesselId>) -> Result<(), EditorError> {
        if let Some(id) = vessel {
            self.vessel(id)?;
        }
        self.active_vessel = vessel;
        Ok(())
    }

    pub fn active_vessel(&self) -> Option<VesselId> {
        self.active_vessel
    }

    pub fn body(&self, id: BodyId) -> Result<&CelestialBody, EditorError> {
        self.bodies
            .get(id.0)
            .ok_or_else(|| EditorError::UnknownBody(format!("#{}", id.0)))
    }

    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut CelestialBody, EditorError> {
        self.bodies
            .get_mut(id.0)
            .ok_or_else(|| EditorError::UnknownBody(format!("#{}", id.0)))
    }

    pub fn vessel(&self, id: VesselId) -> Result<&Vessel, EditorError> {
        self.vessels
            .get(id.0)
            .ok_or_else(|| EditorError::UnknownEntity(OrbitingEntity::Vessel(id).to_string()))
    }

    pub fn vessel_mut(&mut self, id: VesselId) -> Result<&mut Vessel, EditorError> {
        self.vessels
            .get_mut(id.0)
            .ok_or_else(|| EditorError::UnknownEntity(OrbitingEntity::Vessel(id).to_string()))
    }

    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn vessels(&self) -> impl Iterator<Item = &Vessel> {
        self.vessels.iter()
    }

    pub(crate) fn vessels_mut(&mut self) -> impl Iterator<Item = &mut Vessel> {
        self.vessels.iter_mut()
    }

    /// Look a body up by its display name.
    pub fn body_by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().find(|b| b.name == name).map(|b| b.id)
    }

    /// Same as [`Universe::body_by_name`], reporting a missing body as an error.
    pub fn parse_body(&self, name: &str) -> Result<BodyId, EditorError> {
        self.body_by_name(name)
            .ok_or_else(|| EditorError::UnknownBody(name.to_string()))
    }

    /// Orbit driver of `entity`.
    ///
    /// Errors
    /// ------
    /// * `UnknownEntity` if the id does not exist or the body is the root (no driver).
    pub fn driver(&self, entity: OrbitingEntity) -> Result<&OrbitDriver, EditorError> {
        let driver = match entity {
            OrbitingEntity::Vessel(id) => self.vessels.get(id.0).map(|v| &v.orbit_driver),
            OrbitingEntity::Body(id) => self
                .bodies
                .get(id.0)
                .and_then(|b| b.orbit_driver.as_ref()),
            OrbitingEntity::Detached(id) => self.detached.get(id.0),
        };
        driver.ok_or_else(|| EditorError::UnknownEntity(entity.to_string()))
    }

    pub fn driver_mut(&mut self, entity: OrbitingEntity) -> Result<&mut OrbitDriver, EditorError> {
        let driver = match entity {
            OrbitingEntity::Vessel(id) => self.vessels.get_mut(id.0).map(|v| &mut v.orbit_driver),
            OrbitingEntity::Body(id) => self
                .bodies
                .get_mut(id.0)
                .and_then(|b| b.orbit_driver.as_mut()),
            OrbitingEntity::Detached(id) => self.detached.get_mut(id.0),
        };
        driver.ok_or_else(|| EditorError::UnknownEntity(entity.to_string()))
    }

    /// Entities whose orbit can be edited: the active vessel first, then every vessel,
    /// then every body that has an orbit. Each entity appears once.
    pub fn ordered_orbits(&self) -> Vec<OrbitingEntity> {
        let mut ordered: Vec<OrbitingEntity> = Vec::new();
        let candidates = self
            .active_vessel
            .map(OrbitingEntity::Vessel)
            .into_iter()
            .chain(self.vessels.iter().map(|v| OrbitingEntity::Vessel(v.id)))
            .chain(
                self.bodies
                    .iter()
                    .filter(|b| b.orbit_driver.is_some())
                    .map(|b| OrbitingEntity::Body(b.id)),
            );
        for entity in candidates {
            if !ordered.contains(&entity) {
                ordered.push(entity);
            }
        }
        ordered
    }

    /// Human-readable label of `entity`, as shown in an orbit picker.
    pub fn entity_label(&self, entity: OrbitingEntity) -> String {
        match entity {
            OrbitingEntity::Body(id) => {
                if let Ok(body) = self.body(id) {
                    return body.name.clone();
                }
            }
            OrbitingEntity::Vessel(id) => {
                if let Ok(vessel) = self.vessel(id) {
                    return if self.active_vessel == Some(id) {
                        "Active vessel".to_string()
                    } else {
                        vessel.name.clone()
                    };
                }
            }
            OrbitingEntity::Detached(_) => {}
        }
        match self.driver(entity) {
            Ok(driver) if !driver.name.is_empty() => driver.name.clone(),
            _ => "Unknown".to_string(),
        }
    }

    /// `true` if `body` is `ancestor` or orbits it, directly or through intermediate bodies.
    pub fn is_within(&self, body: BodyId, ancestor: BodyId) -> bool {
        let mut current = Some(body);
        let mut hops = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            // A malformed hierarchy must not loop forever.
            hops += 1;
            if hops > self.bodies.len() {
                return false;
            }
            current = self.body(id).ok().and_then(CelestialBody::reference_body);
        }
        false
    }

    /// Register a listener for vessel SOI changes.
    pub fn on_vessel_soi_changed(&mut self, listener: impl FnMut(&SoiChange) + 'static) {
        self.soi_listeners.push(Box::new(listener));
    }

    pub(crate) fn fire_vessel_soi_changed(&mut self, change: &SoiChange) {
        for listener in self.soi_listeners.iter_mut() {
            listener(change);
        }
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("bodies", &self.bodies)
            .field("vessels", &self.vessels)
            .field("detached", &self.detached)
            .field("active_vessel", &self.active_vessel)
            .field("soi_listeners", &self.soi_listeners.len())
            .finish()
    }
}
