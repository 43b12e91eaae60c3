//! Orbit drivers: the owner-side handle of a live orbit record.
use std::fmt;

use nalgebra::Vector3;

use crate::{body::BodyId, orbit::LiveOrbit};

/// Listener invoked with the new reference body after a hard-set changed it.
pub type ReferenceBodyListener = Box<dyn FnMut(BodyId)>;

/// Drives an entity along its [`LiveOrbit`].
///
/// `pos` and `vel` are the cached position/velocity the rest of the simulation reads;
/// they lag behind `orbit` until [`OrbitDriver::resync_from_orbit`] is called.
pub struct OrbitDriver {
    pub name: String,
    pub orbit: LiveOrbit,
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
    on_reference_body_change: Option<ReferenceBodyListener>,
}

impl OrbitDriver {
    pub fn new(name: impl Into<String>, orbit: LiveOrbit) -> Self {
        let (pos, vel) = (orbit.pos, orbit.vel);
        OrbitDriver {
            name: name.into(),
            orbit,
            pos,
            vel,
            on_reference_body_change: None,
        }
    }

    /// Register the reference-body-change listener, replacing any previous one.
    ///
    /// The listener runs synchronously inside the commit, exactly once per actual change
    /// of reference body and never when the body is unchanged.
    pub fn set_reference_body_listener(&mut self, listener: impl FnMut(BodyId) + 'static) {
        self.on_reference_body_change = Some(Box::new(listener));
    }

    pub fn clear_reference_body_listener(&mut self) {
        self.on_reference_body_change = None;
    }

    pub fn has_reference_body_listener(&self) -> bool {
        self.on_reference_body_change.is_some()
    }

    pub(crate) fn notify_reference_body_change(&mut self, new_body: BodyId) {
        if let Some(listener) = self.on_reference_body_change.as_mut() {
            listener(new_body);
        }
    }

    /// Copy the freshly recomputed orbit position/velocity into the driver cache.
    pub fn resync_from_orbit(&mut self) {
        self.pos = self.orbit.pos;
        self.vel = self.orbit.vel;
    }
}

impl fmt::Debug for OrbitDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrbitDriver")
            .field("name", &self.name)
            .field("orbit", &self.orbit)
            .field("pos", &self.pos)
            .field("vel", &self.vel)
            .field(
                "on_reference_body_change",
                &self.on_reference_body_change.is_some(),
            )
            .finish()
    }
}
