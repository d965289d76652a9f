use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dustbox::physics::body::Body;
use dustbox::physics::boundary::{BoundaryBox, BoundaryMode};
use dustbox::physics::forces::{Contact, ForceModule, Gravity};
use dustbox::physics::math::Vector;
use dustbox::physics::simulation::Simulation;

fn generate_test_bodies(count: usize, seed: u64) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut bodies = Vec::with_capacity(count);

    let extent = 200.0;

    for _ in 0..count {
        let theta = rng.random_range(0.0..2.0 * std::f64::consts::PI);
        let r = rng.random_range(1.0..extent);

        let position = Vector::new(r * theta.cos(), r * theta.sin());
        let velocity = Vector::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let mass = rng.random_range(1.0..100.0);
        let radius = rng.random_range(0.5..2.0);

        bodies.push(Body::new(position, velocity, mass, radius));
    }

    bodies
}

fn bench_gravity_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gravity_accumulation");

    let body_counts = [10, 50, 100, 500, 1000];

    for &count in &body_counts {
        let bodies = generate_test_bodies(count, 42);
        let gravity = Gravity::default();

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| {
                let mut forces = vec![Vector::ZERO; bodies.len()];
                gravity
                    .add_force(black_box(&bodies), &mut forces)
                    .expect("bench bodies never coincide");
                black_box(forces);
            });
        });
    }

    group.finish();
}

fn bench_contact_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("contact_accumulation");

    // Dense enough that a meaningful fraction of pairs overlap
    let body_counts = [10, 50, 100, 500];

    for &count in &body_counts {
        let mut bodies = generate_test_bodies(count, 7);
        for body in &mut bodies {
            body.radius *= 10.0;
        }
        let contact = Contact::default();

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| {
                let mut forces = vec![Vector::ZERO; bodies.len()];
                contact
                    .add_force(black_box(&bodies), &mut forces)
                    .expect("bench bodies never coincide");
                black_box(forces);
            });
        });
    }

    group.finish();
}

fn bench_boundary_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_resolution");

    let boundary = BoundaryBox::new(0.0, 1.0, 0.0, 1.0, BoundaryMode::Reflect).unwrap();
    let bounce_counts = [1, 10, 100, 500];

    for &bounces in &bounce_counts {
        let displacement = Vector::new(0.9 * bounces as f64, 0.3);

        group.bench_with_input(BenchmarkId::new("bounces", bounces), &bounces, |b, _| {
            b.iter(|| {
                let resolved = boundary
                    .resolve(
                        black_box(Vector::new(0.5, 0.5)),
                        black_box(displacement),
                        0.01,
                    )
                    .expect("bounce count stays under the iteration cap");
                black_box(resolved);
            });
        });
    }

    group.finish();
}

fn bench_full_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");

    let body_counts = [10, 100, 500];

    for &count in &body_counts {
        let bodies = generate_test_bodies(count, 13);
        let modules: Vec<Box<dyn ForceModule>> =
            vec![Box::new(Gravity::default()), Box::new(Contact::default())];
        let mut simulation = Simulation::new(bodies, modules)
            .unwrap()
            .with_time_step(1.0e-3);

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| {
                simulation.step().expect("bench configuration is stable");
            });
        });
    }

    group.finish();
}

criterion::criterion_group!(
    benches,
    bench_gravity_accumulation,
    bench_contact_accumulation,
    bench_boundary_resolution,
    bench_full_simulation_step,
);

criterion::criterion_main!(benches);
