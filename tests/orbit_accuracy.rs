//! Accuracy tests against analytic two-body solutions.
//!
//! A circular Earth/Sun orbit has a closed-form period, so a full revolution
//! is a strong end-to-end check on force accumulation and integration.

use dustbox::prelude::*;

const G: Scalar = 6.674_30e-11;
const SUN_MASS: Scalar = 1.9885e30;
const EARTH_MASS: Scalar = 5.97e24;
const ORBIT_RADIUS: Scalar = 1.5e11;

fn circular_orbit() -> Simulation {
    let orbital_speed = (G * SUN_MASS / ORBIT_RADIUS).sqrt();
    let bodies = vec![
        Body::new(Vector::ZERO, Vector::ZERO, SUN_MASS, 6.957e8).with_name("Sun"),
        Body::new(
            Vector::new(ORBIT_RADIUS, 0.0),
            Vector::new(0.0, orbital_speed),
            EARTH_MASS,
            6.371e6,
        )
        .with_name("Earth"),
    ];
    let modules: Vec<Box<dyn ForceModule>> = vec![Box::new(Gravity::new(G))];

    Simulation::new(bodies, modules).expect("valid two-body setup")
}

fn orbital_period() -> Scalar {
    std::f64::consts::TAU * (ORBIT_RADIUS.powi(3) / (G * SUN_MASS)).sqrt()
}

#[test]
fn test_circular_orbit_retains_separation_after_one_period() {
    let steps = 100_000;
    let mut simulation = circular_orbit()
        .with_time_step(orbital_period() / steps as Scalar)
        .with_step_count(steps);

    simulation.run().unwrap();

    let bodies = simulation.bodies();
    let separation = bodies[0].distance_to(&bodies[1]);
    let relative_error = (separation - ORBIT_RADIUS).abs() / ORBIT_RADIUS;

    assert!(
        relative_error < 1.0e-2,
        "separation drifted by a relative {relative_error} over one period"
    );
}

#[test]
fn test_orbiting_body_returns_to_its_starting_point() {
    let steps = 100_000;
    let mut simulation = circular_orbit()
        .with_time_step(orbital_period() / steps as Scalar)
        .with_step_count(steps);

    simulation.run().unwrap();

    let earth = &simulation.bodies()[1];
    let closure_error = earth.position.distance(Vector::new(ORBIT_RADIUS, 0.0));

    // A few percent of the orbit radius after 100k first-order steps
    assert!(
        closure_error < 0.05 * ORBIT_RADIUS,
        "orbit failed to close: off by {closure_error} m"
    );
}

#[test]
fn test_kinetic_energy_is_conserved_on_a_circular_orbit() {
    let steps = 100_000;
    let mut simulation = circular_orbit()
        .with_time_step(orbital_period() / steps as Scalar)
        .with_step_count(steps);

    let initial = simulation.kinetic_energy();
    simulation.run().unwrap();
    let final_energy = simulation.kinetic_energy();

    let relative_error = (final_energy - initial).abs() / initial;
    assert!(
        relative_error < 1.0e-2,
        "kinetic energy drifted by a relative {relative_error}"
    );
}

#[test]
fn test_momentum_is_conserved_under_pairwise_forces() {
    let bodies = vec![
        Body::new(Vector::new(0.0, 0.0), Vector::new(10.0, -4.0), 3.0e10, 1.0),
        Body::new(Vector::new(50.0, 0.0), Vector::new(-2.0, 6.0), 7.0e10, 1.0),
        Body::new(Vector::new(0.0, 80.0), Vector::new(0.0, 0.5), 1.0e10, 1.0),
    ];
    let modules: Vec<Box<dyn ForceModule>> = vec![Box::new(Gravity::new(G))];
    let mut simulation = Simulation::new(bodies, modules)
        .unwrap()
        .with_time_step(0.5)
        .with_step_count(500);

    let momentum = |simulation: &Simulation| -> Vector {
        simulation
            .bodies()
            .iter()
            .map(|b| b.velocity * b.mass)
            .sum()
    };

    let before = momentum(&simulation);
    simulation.run().unwrap();
    let after = momentum(&simulation);

    let scale = simulation
        .bodies()
        .iter()
        .map(|b| b.mass * b.speed())
        .sum::<Scalar>();
    assert!(
        (after - before).length() < 1e-9 * scale,
        "total momentum drifted from {before:?} to {after:?}"
    );
}

#[test]
fn test_speed_is_preserved_through_many_wall_bounces() {
    let bodies = vec![Body::new(
        Vector::new(0.4, 0.6),
        Vector::new(0.83, -0.41),
        1.0,
        0.02,
    )];
    let boundary = BoundaryBox::new(0.0, 1.0, 0.0, 1.0, BoundaryMode::Reflect).unwrap();
    let mut simulation = Simulation::new(bodies, Vec::new())
        .unwrap()
        .with_boundary(boundary)
        .unwrap()
        .with_time_step(0.1)
        .with_step_count(10_000);

    let speed_before = simulation.bodies()[0].speed();
    simulation.run().unwrap();
    let speed_after = simulation.bodies()[0].speed();

    assert!((speed_after - speed_before).abs() < 1e-9 * speed_before);
}
