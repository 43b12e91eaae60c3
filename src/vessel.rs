//! Vessels and their parts, as far as the orbit editor needs to see them.
use serde::{Deserialize, Serialize};

use crate::driver::OrbitDriver;

/// Index of a [`Vessel`] inside its [`Universe`](crate::universe::Universe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VesselId(pub usize);

/// Behaviour module attached to a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartModule {
    /// Ground-support structure holding the vessel on the launch pad.
    LaunchClamp,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub modules: Vec<PartModule>,
}

impl Part {
    pub fn new(name: impl Into<String>, modules: Vec<PartModule>) -> Self {
        Part {
            name: name.into(),
            modules,
        }
    }

    pub fn is_launch_clamp(&self) -> bool {
        self.modules.contains(&PartModule::LaunchClamp)
    }
}

#[derive(Debug)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub landed: bool,
    pub splashed: bool,
    /// Name of the site the vessel is landed at, empty when in flight.
    pub landed_at: String,
    /// `true` while the vessel is on rails (packed, low-fidelity simulation).
    pub packed: bool,
    pub parts: Vec<Part>,
    pub orbit_driver: OrbitDriver,
}

impl Vessel {
    pub fn new(id: VesselId, name: impl Into<String>, parts: Vec<Part>, driver: OrbitDriver) -> Self {
        Vessel {
            id,
            name: name.into(),
            landed: false,
            splashed: false,
            landed_at: String::new(),
            packed: true,
            parts,
            orbit_driver: driver,
        }
    }

    /// Remove every launch-clamp part and return the removed parts.
    pub fn destroy_launch_clamps(&mut self) -> Vec<Part> {
        let (clamps, kept): (Vec<Part>, Vec<Part>) =
            self.parts.drain(..).partition(Part::is_launch_clamp);
        self.parts = kept;
        clamps
    }
}
