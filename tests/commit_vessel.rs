use std::{cell::RefCell, rc::Rc};

use approx::assert_relative_eq;
use orbit_editor::{
    committer::{commit, OUTSIDE_SOI_MESSAGE},
    editor::OrbitEditor,
    editor_errors::EditorError,
    host::RecordingHost,
    params::EditorParams,
    parameterization::{complex::ComplexParams, velocity::VelocityChangeDirection},
    universe::{OrbitingEntity, SoiChange},
};

mod common;
use common::{
    circular, init_logger, kerbol_system, KERBIN, KERBIN_MU, LAUNCHPAD_SHIP, MUN, MUN_RELAY,
};

const SHIP: OrbitingEntity = OrbitingEntity::Vessel(LAUNCHPAD_SHIP);
const RELAY: OrbitingEntity = OrbitingEntity::Vessel(MUN_RELAY);

#[test]
fn commit_takes_vessel_off_the_pad() {
    init_logger();
    let mut universe = kerbol_system();
    let mut host = RecordingHost::at(60.0);
    let params = EditorParams::default();

    OrbitEditor::new(&mut universe, &mut host, &params)
        .simple(SHIP, 80_000.0, KERBIN)
        .unwrap();

    let ship = universe.vessel(LAUNCHPAD_SHIP).unwrap();
    assert!(!ship.landed);
    assert!(!ship.splashed);
    assert!(ship.landed_at.is_empty());
    assert_eq!(ship.parts.len(), 2);
    assert!(ship.parts.iter().all(|p| !p.is_launch_clamp()));
    assert!(ship.packed);

    assert_eq!(host.held_frames, vec![60]);
    assert_eq!(host.railed, vec![LAUNCHPAD_SHIP, MUN_RELAY]);
    assert!(host.popups.is_empty());

    let driver = &ship.orbit_driver;
    assert_eq!(driver.orbit.elements.semi_major_axis, 680_000.0);
    assert_eq!(driver.orbit.last_update, 60.0);
    assert_eq!(driver.pos, driver.orbit.pos);
    assert_eq!(driver.vel, driver.orbit.vel);
    assert_relative_eq!(driver.pos.norm(), 680_000.0, max_relative = 1e-12);
}

#[test]
fn outside_soi_is_rejected_without_side_effects() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::at(0.0);
    let params = EditorParams::default();
    let before = universe.vessel(LAUNCHPAD_SHIP).unwrap().orbit_driver.orbit.clone();

    let result = OrbitEditor::new(&mut universe, &mut host, &params).simple(SHIP, 5.0e6, MUN);

    match result {
        Err(EditorError::OutsideSphereOfInfluence { distance, soi }) => {
            assert_relative_eq!(distance, 5.2e6, max_relative = 1e-12);
            assert_eq!(soi, 2_429_559.1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(host.popups, vec![OUTSIDE_SOI_MESSAGE.to_string()]);
    assert!(host.held_frames.is_empty());
    assert!(host.railed.is_empty());

    let ship = universe.vessel(LAUNCHPAD_SHIP).unwrap();
    assert!(ship.landed);
    assert_eq!(ship.landed_at, "LaunchPad");
    assert_eq!(ship.parts.len(), 4);
    assert_eq!(ship.orbit_driver.orbit, before);
}

#[test]
fn raw_soi_bounds_the_destination() {
    // Between 0.95 × soi and soi: accepted, the scaled radius only bounds the sliders.
    let mut universe = kerbol_system();
    let mut host = RecordingHost::default();
    let params = EditorParams::default();
    let orbit = circular(2_400_000.0, MUN);
    commit(&mut universe, &mut host, &params, RELAY, orbit).unwrap();
    assert!(host.popups.is_empty());
}

#[test]
fn parabolic_orbit_is_rejected_before_mutation() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::default();
    let params = EditorParams::default();
    let result = OrbitEditor::new(&mut universe, &mut host, &params).complex(
        SHIP,
        ComplexParams {
            inclination: 0.0,
            eccentricity: 1.0,
            semi_major_axis: 700_000.0,
            longitude_ascending_node: 0.0,
            argument_of_periapsis: 0.0,
            mean_anomaly_at_epoch: 0.0,
            epoch: 0.0,
            body: KERBIN,
        },
    );
    assert_eq!(result, Err(EditorError::NonFiniteState));
    assert!(host.popups.is_empty());
    assert!(universe.vessel(LAUNCHPAD_SHIP).unwrap().landed);
}

#[test]
fn soi_change_notifies_listeners_once() {
    let mut universe = kerbol_system();
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    universe.on_vessel_soi_changed(move |c| sink.borrow_mut().push(*c));

    let reference_changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reference_changes);
    universe
        .vessel_mut(MUN_RELAY)
        .unwrap()
        .orbit_driver
        .set_reference_body_listener(move |b| sink.borrow_mut().push(b));

    let mut host = RecordingHost::at(10.0);
    let params = EditorParams::default();
    let mut editor = OrbitEditor::new(&mut universe, &mut host, &params);
    editor.simple(RELAY, 300_000.0, MUN).unwrap();
    editor.simple(RELAY, 900_000.0, KERBIN).unwrap();
    editor.simple(RELAY, 950_000.0, KERBIN).unwrap();

    assert_eq!(
        *changes.borrow(),
        vec![SoiChange {
            vessel: MUN_RELAY,
            from: MUN,
            to: KERBIN,
        }]
    );
    assert_eq!(*reference_changes.borrow(), vec![KERBIN]);

    let orbit = &universe.vessel(MUN_RELAY).unwrap().orbit_driver.orbit;
    assert_eq!(orbit.reference_body(), KERBIN);
    assert_eq!(orbit.mu, KERBIN_MU);
}

#[test]
fn host_failures_are_swallowed() {
    init_logger();
    let mut universe = kerbol_system();
    let mut host = RecordingHost {
        fail_hold_unpack: true,
        fail_go_on_rails: true,
        ..RecordingHost::at(5.0)
    };
    let params = EditorParams::builder().hold_unpack_frames(15).build().unwrap();

    let result = OrbitEditor::new(&mut universe, &mut host, &params).simple(SHIP, 100_000.0, KERBIN);
    assert_eq!(result, Ok(()));

    assert!(host.held_frames.is_empty());
    assert!(host.railed.is_empty());
    let ship = universe.vessel(LAUNCHPAD_SHIP).unwrap();
    assert!(!ship.landed);
    assert_eq!(ship.orbit_driver.orbit.elements.semi_major_axis, 700_000.0);
}

#[test]
fn radial_burn_adds_vertical_speed_only() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::at(120.0);
    let params = EditorParams::default();
    let state = universe
        .driver(RELAY)
        .unwrap()
        .orbit
        .state_at(120.0)
        .unwrap();

    OrbitEditor::new(&mut universe, &mut host, &params)
        .velocity(RELAY, VelocityChangeDirection::Up, 100.0)
        .unwrap();

    let driver = universe.driver(RELAY).unwrap();
    let up = state.position.normalize();
    let tangential = |v: nalgebra::Vector3<f64>| (v - up * v.dot(&up)).norm();
    assert_relative_eq!(driver.pos, state.position, epsilon = 1e-3);
    assert_relative_eq!(driver.vel.dot(&up), 100.0, epsilon = 1e-6);
    assert_relative_eq!(tangential(driver.vel), tangential(state.velocity), epsilon = 1e-6);
    assert_eq!(driver.orbit.elements.epoch, 120.0);
}

#[test]
fn rendezvous_places_ship_behind_target() {
    let mut universe = kerbol_system();
    let mut host = RecordingHost::at(0.0);
    let params = EditorParams::default();

    OrbitEditor::new(&mut universe, &mut host, &params)
        .rendezvous(SHIP, -45.0, MUN_RELAY)
        .unwrap();

    let ship = universe.driver(SHIP).unwrap().orbit.elements;
    let relay = universe.driver(RELAY).unwrap().orbit.elements;
    assert_eq!(ship.reference_body, MUN);
    assert_eq!(ship.semi_major_axis, relay.semi_major_axis);
    assert_eq!(ship.epoch, relay.epoch + 45.0);
}
