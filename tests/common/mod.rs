#![allow(dead_code)]

use approx::assert_relative_eq;
use orbit_editor::{
    body::BodyId,
    orbit::CanonicalOrbit,
    universe::Universe,
    vessel::{Part, PartModule, VesselId},
};

pub const KERBOL: BodyId = BodyId(0);
pub const KERBIN: BodyId = BodyId(1);
pub const MUN: BodyId = BodyId(2);
pub const MINMUS: BodyId = BodyId(3);

pub const LAUNCHPAD_SHIP: VesselId = VesselId(0);
pub const MUN_RELAY: VesselId = VesselId(1);

pub const KERBIN_MU: f64 = 3.5316e12;
pub const MUN_MU: f64 = 6.5138398e10;

pub fn init_logger() {
    let _ = pretty_env_logger::formatted_builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub fn circular(sma: f64, body: BodyId) -> CanonicalOrbit {
    CanonicalOrbit {
        inclination: 0.0,
        eccentricity: 0.0,
        semi_major_axis: sma,
        longitude_ascending_node: 0.0,
        argument_of_periapsis: 0.0,
        mean_anomaly_at_epoch: 0.0,
        epoch: 0.0,
        reference_body: body,
    }
}

/// Stock-like Kerbol system: Kerbol, Kerbin, Mun and Minmus, one ship sitting on the
/// launch pad (held by two clamps) and one relay around the Mun.
pub fn kerbol_system() -> Universe {
    let mut universe = Universe::new("Kerbol", 261_600_000.0, 600_000.0, 1.1723328e18);
    let kerbin = universe
        .add_body(
            "Kerbin",
            600_000.0,
            70_000.0,
            84_159_286.0,
            KERBIN_MU,
            CanonicalOrbit {
                mean_anomaly_at_epoch: 3.14,
                ..circular(13_599_840_256.0, KERBOL)
            },
            0.0,
        )
        .unwrap();
    universe
        .add_body(
            "Mun",
            200_000.0,
            0.0,
            2_429_559.1,
            MUN_MU,
            CanonicalOrbit {
                mean_anomaly_at_epoch: 1.7,
                ..circular(12_000_000.0, kerbin)
            },
            0.0,
        )
        .unwrap();
    universe
        .add_body(
            "Minmus",
            60_000.0,
            0.0,
            2_247_428.4,
            1.7658e9,
            CanonicalOrbit {
                inclination: 6.0,
                longitude_ascending_node: 78.0,
                argument_of_periapsis: 38.0,
                mean_anomaly_at_epoch: 0.9,
                ..circular(47_000_000.0, kerbin)
            },
            0.0,
        )
        .unwrap();

    let parts = vec![
        Part::new("mk1pod", vec![PartModule::Other("ModuleCommand".into())]),
        Part::new("launchClamp1", vec![PartModule::LaunchClamp]),
        Part::new("fuelTank", vec![]),
        Part::new("launchClamp1", vec![PartModule::LaunchClamp]),
    ];
    let ship = universe
        .add_vessel("Kerbal X", parts, circular(600_100.0, kerbin), 0.0)
        .unwrap();
    {
        let ship = universe.vessel_mut(ship).unwrap();
        ship.landed = true;
        ship.landed_at = "LaunchPad".into();
    }
    universe
        .add_vessel("Mun Relay", vec![], circular(500_000.0, MUN), 0.0)
        .unwrap();
    universe.set_active_vessel(Some(LAUNCHPAD_SHIP)).unwrap();
    universe
}

pub fn assert_orbit_close(actual: &CanonicalOrbit, expected: &CanonicalOrbit, epsilon: f64) {
    assert_eq!(actual.reference_body, expected.reference_body);
    assert_relative_eq!(actual.epoch, expected.epoch, epsilon = epsilon);
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        max_relative = epsilon
    );
    assert_relative_eq!(actual.eccentricity, expected.eccentricity, epsilon = epsilon);
    assert_relative_eq!(actual.inclination, expected.inclination, epsilon = epsilon);
    assert_relative_eq!(
        actual.longitude_ascending_node,
        expected.longitude_ascending_node,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.argument_of_periapsis,
        expected.argument_of_periapsis,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.mean_anomaly_at_epoch,
        expected.mean_anomaly_at_epoch,
        epsilon = epsilon
    );
}
