use std::{cell::Cell, rc::Rc};

use approx::assert_relative_eq;
use orbit_editor::{
    committer::commit,
    editor::OrbitEditor,
    editor_errors::EditorError,
    host::RecordingHost,
    orbit::CanonicalOrbit,
    params::EditorParams,
    parameterization::complex::ComplexParams,
    universe::OrbitingEntity,
};

mod common;
use common::{circular, kerbol_system, KERBIN, KERBOL, MINMUS, MUN};

#[test]
fn reparenting_moves_body_between_children_lists() {
    let mut universe = kerbol_system();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    universe
        .driver_mut(OrbitingEntity::Body(MINMUS))
        .unwrap()
        .set_reference_body_listener(move |_| counter.set(counter.get() + 1));

    let mut host = RecordingHost::at(1_000.0);
    let params = EditorParams::default();
    let new_orbit = CanonicalOrbit {
        eccentricity: 0.05,
        mean_anomaly_at_epoch: 1.0,
        ..circular(20_000_000_000.0, KERBOL)
    };
    commit(
        &mut universe,
        &mut host,
        &params,
        OrbitingEntity::Body(MINMUS),
        new_orbit,
    )
    .unwrap();

    assert_eq!(universe.body(KERBIN).unwrap().orbiting_bodies, vec![MUN]);
    assert_eq!(universe.body(KERBOL).unwrap().orbiting_bodies, vec![KERBIN, MINMUS]);
    assert_eq!(fired.get(), 1);

    let minmus = universe.body(MINMUS).unwrap();
    assert_eq!(minmus.reference_body(), Some(KERBOL));
    let driver = minmus.orbit_driver.as_ref().unwrap();
    assert_eq!(driver.orbit.mu, 1.1723328e18);
    assert_eq!(minmus.position, driver.orbit.pos);
    assert_relative_eq!(
        minmus.position.norm(),
        driver.orbit.state_at(1_000.0).unwrap().position.norm()
    );
    // Bodies never go on rails.
    assert!(host.railed.is_empty());
}

#[test]
fn same_parent_commit_keeps_children_unique() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::default();
    let params = EditorParams::default();
    let mut editor = OrbitEditor::new(&mut universe, &mut host, &params);

    editor.simple(OrbitingEntity::Body(MUN), 15_000_000.0, KERBIN).unwrap();
    editor.simple(OrbitingEntity::Body(MUN), 16_000_000.0, KERBIN).unwrap();

    assert_eq!(universe.body(KERBIN).unwrap().orbiting_bodies, vec![MUN, MINMUS]);
    // Altitude is measured above the new parent, not above the Mun itself.
    assert_eq!(
        universe.body(MUN).unwrap().orbit_driver.as_ref().unwrap().orbit.elements.semi_major_axis,
        16_000_000.0 + 600_000.0
    );
}

#[test]
fn body_cannot_orbit_itself_or_its_moons() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::default();
    let params = EditorParams::default();
    let mut editor = OrbitEditor::new(&mut universe, &mut host, &params);

    let kerbin = OrbitingEntity::Body(KERBIN);
    for parent in [KERBIN, MUN, MINMUS] {
        let result = editor.complex(
            kerbin,
            ComplexParams {
                inclination: 0.0,
                eccentricity: 0.0,
                semi_major_axis: 5_000_000.0,
                longitude_ascending_node: 0.0,
                argument_of_periapsis: 0.0,
                mean_anomaly_at_epoch: 0.0,
                epoch: 0.0,
                body: parent,
            },
        );
        assert!(matches!(result, Err(EditorError::ReferenceBodyCycle(_))));
    }

    assert_eq!(universe.body(KERBIN).unwrap().reference_body(), Some(KERBOL));
    assert_eq!(universe.body(KERBOL).unwrap().orbiting_bodies, vec![KERBIN]);
}

#[test]
fn root_body_has_no_editable_orbit() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::default();
    let params = EditorParams::default();
    let result = commit(
        &mut universe,
        &mut host,
        &params,
        OrbitingEntity::Body(KERBOL),
        circular(1.0e10, KERBIN),
    );
    assert!(matches!(result, Err(EditorError::UnknownEntity(_))));
}
