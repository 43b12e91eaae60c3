//! # Orbit editing forms
//!
//! Every way a user can describe an orbit is converted to a [`CanonicalOrbit`] before it
//! is committed:
//!
//! - [`simple`](crate::parameterization::simple): circular equatorial orbit at an altitude above a body.
//! - [`complex`](crate::parameterization::complex): the seven raw elements plus a reference body.
//! - [`graphical`](crate::parameterization::graphical): six normalized slider values in `[0, 1]`.
//! - [`velocity`](crate::parameterization::velocity): an instantaneous velocity change in a local frame.
//! - [`rendezvous`](crate::parameterization::rendezvous): the orbit of another vessel, shifted in time.
//!
//! Each "set" conversion ends with [`CanonicalOrbit::sanitized`], so whatever numbers the
//! caller typed, the result is finite (apart from the preserved epoch quirk) and carries
//! the semi-major axis sign of its orbit type. The "get" conversions go the other way and
//! read the current orbit of an entity back into form values.
//!
//! [`Parameterization`] wraps the five forms for callers that pick the form at run time.
//!
//! ## Typical workflow
//!
//! ```rust, no_run
//! use orbit_editor::body::BodyId;
//! use orbit_editor::params::EditorParams;
//! use orbit_editor::parameterization::{simple::SimpleParams, Parameterization};
//! use orbit_editor::universe::{OrbitingEntity, Universe};
//! use orbit_editor::vessel::VesselId;
//!
//! # fn demo(universe: &Universe) -> Result<(), orbit_editor::editor_errors::EditorError> {
//! let form = Parameterization::Simple(SimpleParams { altitude: 80_000.0, body: BodyId(1) });
//! let orbit = form.to_orbit(universe, OrbitingEntity::Vessel(VesselId(0)), 0.0, &EditorParams::default())?;
//! println!("{orbit}");
//! # Ok(()) }
//! ```
use crate::{
    constants::Seconds,
    editor_errors::EditorError,
    orbit::CanonicalOrbit,
    params::EditorParams,
    parameterization::{
        complex::ComplexParams, graphical::GraphicalParams, rendezvous::RendezvousParams,
        simple::SimpleParams, velocity::VelocityParams,
    },
    universe::{OrbitingEntity, Universe},
};

/// Circular equatorial orbit at a given altitude.
pub mod simple;

/// Raw orbital elements.
pub mod complex;

/// Normalized slider form.
pub mod graphical;

/// Velocity change in the local frame of the entity.
pub mod velocity;

/// Copy of a target vessel's orbit.
pub mod rendezvous;

/// One of the five editing forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameterization {
    Simple(SimpleParams),
    Complex(ComplexParams),
    Graphical(GraphicalParams),
    Velocity(VelocityParams),
    Rendezvous(RendezvousParams),
}

impl Parameterization {
    /// Convert the form to sanitized canonical elements for `entity`.
    ///
    /// Arguments
    /// ---------
    /// * `universe` – read-only view of the simulation.
    /// * `entity` – the entity being edited; graphical and velocity forms read its current orbit.
    /// * `universal_time` – current simulation time.
    /// * `params` – editor configuration.
    pub fn to_orbit(
        &self,
        universe: &Universe,
        entity: OrbitingEntity,
        universal_time: Seconds,
        params: &EditorParams,
    ) -> Result<CanonicalOrbit, EditorError> {
        match self {
            Parameterization::Simple(p) => p.to_orbit(universe, universal_time, params),
            Parameterization::Complex(p) => p.to_orbit(universe, universal_time, params),
            Parameterization::Graphical(p) => {
                p.to_orbit(universe, entity, universal_time, params)
            }
            Parameterization::Velocity(p) => p.to_orbit(universe, entity, universal_time, params),
            Parameterization::Rendezvous(p) => p.to_orbit(universe, universal_time, params),
        }
    }
}

impl From<SimpleParams> for Parameterization {
    fn from(p: SimpleParams) -> Self {
        Parameterization::Simple(p)
    }
}

impl From<ComplexParams> for Parameterization {
    fn from(p: ComplexParams) -> Self {
        Parameterization::Complex(p)
    }
}

impl From<GraphicalParams> for Parameterization {
    fn from(p: GraphicalParams) -> Self {
        Parameterization::Graphical(p)
    }
}

impl From<VelocityParams> for Parameterization {
    fn from(p: VelocityParams) -> Self {
        Parameterization::Velocity(p)
    }
}

impl From<RendezvousParams> for Parameterization {
    fn from(p: RendezvousParams) -> Self {
        Parameterization::Rendezvous(p)
    }
}
