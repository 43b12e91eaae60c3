//! # Orbit editor façade
//!
//! [`OrbitEditor`] bundles the universe, the host and the configuration for the duration
//! of an editing session and exposes one "set" and one "get" call per form. Each set call
//! converts the form with [`Parameterization::to_orbit`] and commits the result with
//! [`commit`].
//!
//! ```rust, no_run
//! use orbit_editor::editor::OrbitEditor;
//! use orbit_editor::host::RecordingHost;
//! use orbit_editor::params::EditorParams;
//! use orbit_editor::parameterization::velocity::VelocityChangeDirection;
//! use orbit_editor::universe::{OrbitingEntity, Universe};
//! use orbit_editor::vessel::VesselId;
//!
//! # fn demo(universe: &mut Universe) -> Result<(), orbit_editor::editor_errors::EditorError> {
//! let mut host = RecordingHost::at(1_000.0);
//! let params = EditorParams::default();
//! let mut editor = OrbitEditor::new(universe, &mut host, &params);
//!
//! let ship = OrbitingEntity::Vessel(VesselId(0));
//! editor.velocity(ship, VelocityChangeDirection::Prograde, 250.0)?;
//! println!("{:?}", editor.get_complex(ship)?);
//! # Ok(()) }
//! ```
use crate::{
    body::BodyId,
    committer::commit,
    constants::{Meter, MeterPerSecond, Seconds},
    editor_errors::EditorError,
    host::Host,
    orbit::CanonicalOrbit,
    params::EditorParams,
    parameterization::{
        complex::ComplexParams,
        graphical::GraphicalParams,
        rendezvous::RendezvousParams,
        simple::SimpleParams,
        velocity::{VelocityChangeDirection, VelocityParams},
        Parameterization,
    },
    universe::{OrbitingEntity, Universe},
    vessel::VesselId,
};

pub struct OrbitEditor<'a, H: Host + ?Sized> {
    universe: &'a mut Universe,
    host: &'a mut H,
    params: &'a EditorParams,
}

impl<'a, H: Host + ?Sized> OrbitEditor<'a, H> {
    pub fn new(universe: &'a mut Universe, host: &'a mut H, params: &'a EditorParams) -> Self {
        OrbitEditor {
            universe,
            host,
            params,
        }
    }

    pub fn universe(&self) -> &Universe {
        self.universe
    }

    /// Convert `form` for `entity` and commit the result.
    pub fn apply(
        &mut self,
        entity: OrbitingEntity,
        form: impl Into<Parameterization>,
    ) -> Result<(), EditorError> {
        let now = self.host.universal_time();
        let orbit = form
            .into()
            .to_orbit(&*self.universe, entity, now, self.params)?;
        commit(&mut *self.universe, &mut *self.host, self.params, entity, orbit)
    }

    fn current_orbit(&self, entity: OrbitingEntity) -> Result<CanonicalOrbit, EditorError> {
        Ok(self.universe.driver(entity)?.orbit.elements)
    }

    pub fn simple(
        &mut self,
        entity: OrbitingEntity,
        altitude: Meter,
        body: BodyId,
    ) -> Result<(), EditorError> {
        self.apply(entity, SimpleParams { altitude, body })
    }

    pub fn get_simple(&self, entity: OrbitingEntity) -> Result<SimpleParams, EditorError> {
        let orbit = self.current_orbit(entity)?;
        let body = self.universe.body(orbit.reference_body)?;
        Ok(SimpleParams::from_orbit(&orbit, body, self.params))
    }

    pub fn complex(&mut self, entity: OrbitingEntity, form: ComplexParams) -> Result<(), EditorError> {
        self.apply(entity, form)
    }

    pub fn get_complex(&self, entity: OrbitingEntity) -> Result<ComplexParams, EditorError> {
        Ok(ComplexParams::from_orbit(&self.current_orbit(entity)?))
    }

    pub fn graphical(
        &mut self,
        entity: OrbitingEntity,
        form: GraphicalParams,
    ) -> Result<(), EditorError> {
        self.apply(entity, form)
    }

    pub fn get_graphical(&self, entity: OrbitingEntity) -> Result<GraphicalParams, EditorError> {
        let orbit = self.current_orbit(entity)?;
        let body = self.universe.body(orbit.reference_body)?;
        Ok(GraphicalParams::from_orbit(&orbit, body, self.params))
    }

    pub fn velocity(
        &mut self,
        entity: OrbitingEntity,
        direction: VelocityChangeDirection,
        speed: MeterPerSecond,
    ) -> Result<(), EditorError> {
        self.apply(entity, VelocityParams { direction, speed })
    }

    /// Always `(Prograde, 0)` for an existing entity.
    pub fn get_velocity(&self, entity: OrbitingEntity) -> Result<VelocityParams, EditorError> {
        self.universe.driver(entity)?;
        Ok(VelocityParams::current())
    }

    pub fn rendezvous(
        &mut self,
        entity: OrbitingEntity,
        lead_time: Seconds,
        target: VesselId,
    ) -> Result<(), EditorError> {
        self.apply(entity, RendezvousParams { lead_time, target })
    }
}
