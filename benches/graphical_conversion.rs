use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbit_editor::{
    body::BodyId,
    orbit::CanonicalOrbit,
    params::EditorParams,
    parameterization::{
        graphical::GraphicalParams,
        velocity::{VelocityChangeDirection, VelocityParams},
    },
    universe::{OrbitingEntity, Universe},
};

const KERBIN: BodyId = BodyId(1);

fn circular(sma: f64, body: BodyId) -> CanonicalOrbit {
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

fn kerbin_system() -> (Universe, OrbitingEntity) {
    let mut universe = Universe::new("Kerbol", 261_600_000.0, 600_000.0, 1.1723328e18);
    universe
        .add_body(
            "Kerbin",
            600_000.0,
            70_000.0,
            84_159_286.0,
            3.5316e12,
            circular(13_599_840_256.0, BodyId(0)),
            0.0,
        )
        .unwrap();
    let ship = universe
        .add_vessel("bench", vec![], circular(700_000.0, KERBIN), 0.0)
        .unwrap();
    (universe, OrbitingEntity::Vessel(ship))
}

/// Random sliders, eccentricity kept off the parabolic value.
fn random_sliders(rng: &mut StdRng) -> GraphicalParams {
    let ecc = if rng.random::<bool>() {
        rng.random_range(0.0..0.45)
    } else {
        rng.random_range(0.55..0.95)
    };
    GraphicalParams {
        inclination: rng.random(),
        eccentricity: ecc,
        periapsis: rng.random(),
        longitude_ascending_node: rng.random(),
        argument_of_periapsis: rng.random(),
        mean_anomaly: rng.random(),
    }
}

fn bench_graphical_round_trip(c: &mut Criterion) {
    let (universe, ship) = kerbin_system();
    let params = EditorParams::default();
    let kerbin = universe.body(KERBIN).unwrap();
    let mut rng = StdRng::seed_from_u64(0x0B17);
    let samples = 10_000usize;

    c.bench_function("graphical/to_orbit+from_orbit", |b| {
        b.iter_batched(
            || (0..samples).map(|_| random_sliders(&mut rng)).collect::<Vec<_>>(),
            |cases| {
                for sliders in cases {
                    let orbit = sliders
                        .to_orbit(&universe, ship, 0.0, &params)
                        .unwrap();
                    black_box(GraphicalParams::from_orbit(&orbit, kerbin, &params));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_velocity_change(c: &mut Criterion) {
    let (universe, ship) = kerbin_system();
    let params = EditorParams::default();
    let mut rng = StdRng::seed_from_u64(0xB0B);
    let samples = 10_000usize;

    c.bench_function("velocity/to_orbit", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| VelocityParams {
                        direction: VelocityChangeDirection::ALL[rng.random_range(0..6)],
                        speed: rng.random_range(-500.0..500.0),
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                for burn in cases {
                    black_box(burn.to_orbit(&universe, ship, 42.0, &params).unwrap());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_graphical_round_trip, bench_velocity_change);
criterion_main!(benches);
