//! Scenario construction: everything that chooses initial positions, masses,
//! and force lists lives here, outside the physics core. Builders only
//! produce a valid body set and wire up modules; they never participate in
//! the stepping itself.

use crate::config::SimulationConfig;
use crate::physics::body::Body;
use crate::physics::boundary::{BoundaryBox, BoundaryMode};
use crate::physics::error::Error;
use crate::physics::forces::{
    Accretion, ConstantAcceleration, Contact, Drag, Electrostatic, ForceModule, Gravity,
    UniformField,
};
use crate::physics::math::{Scalar, Vector};
use crate::physics::simulation::Simulation;
use crate::resources::SharedRng;
use rand::Rng;
use std::fmt;

/// Scenario-side failures. Physics configuration errors pass through; the
/// rest never reach the core.
#[derive(Debug)]
pub enum ScenarioError {
    UnknownScenario(String),
    /// Random placement could not find a non-overlapping position.
    PlacementExhausted { attempts: usize },
    Physics(Error),
    Io(std::io::Error),
    Parse { line: usize, message: String },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::UnknownScenario(name) => {
                write!(
                    f,
                    "unknown scenario '{name}'; available: {}",
                    list_available().join(", ")
                )
            }
            ScenarioError::PlacementExhausted { attempts } => {
                write!(
                    f,
                    "no non-overlapping position found after {attempts} attempts; \
                     are there too many bodies for this space?"
                )
            }
            ScenarioError::Physics(error) => write!(f, "{error}"),
            ScenarioError::Io(error) => write!(f, "failed to read body table: {error}"),
            ScenarioError::Parse { line, message } => {
                write!(f, "body table line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Physics(error) => Some(error),
            ScenarioError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Error> for ScenarioError {
    fn from(error: Error) -> Self {
        ScenarioError::Physics(error)
    }
}

impl From<std::io::Error> for ScenarioError {
    fn from(error: std::io::Error) -> Self {
        ScenarioError::Io(error)
    }
}

const SCENARIOS: &[&str] = &[
    "accretion",
    "bouncy_balls",
    "bouncy_stars",
    "magnetic_rotation",
    "single_ball",
    "solar_system",
];

pub fn list_available() -> Vec<&'static str> {
    SCENARIOS.to_vec()
}

/// Build a ready-to-run simulation by scenario name, then apply the
/// configuration's step-count, step-size, and adaptive-control overrides.
pub fn build(
    name: &str,
    config: &SimulationConfig,
    rng: &mut SharedRng,
) -> Result<Simulation, ScenarioError> {
    let simulation = match name {
        "accretion" => accretion(config, rng)?,
        "bouncy_balls" => bouncy_balls(config, rng)?,
        "bouncy_stars" => bouncy_stars(config, rng)?,
        "magnetic_rotation" => magnetic_rotation(config)?,
        "single_ball" => single_ball(config)?,
        "solar_system" => solar_system(config)?,
        unknown => return Err(ScenarioError::UnknownScenario(unknown.to_string())),
    };
    Ok(apply_overrides(simulation, config))
}

/// Build a gravity-only simulation from a tab-delimited body table.
pub fn from_table(path: &str, config: &SimulationConfig) -> Result<Simulation, ScenarioError> {
    let bodies = load_bodies(path)?;
    let modules: Vec<Box<dyn ForceModule>> =
        vec![Box::new(Gravity::new(config.physics.gravitational_constant))];
    let simulation = Simulation::new(bodies, modules)?;
    Ok(apply_overrides(simulation, config))
}

/// Parse a tab-delimited body table: one body per line, columns
/// name, x, y, vx, vy, mass, radius, charge. Blank lines and lines starting
/// with `#` are skipped.
pub fn load_bodies(path: &str) -> Result<Vec<Body>, ScenarioError> {
    let content = std::fs::read_to_string(path)?;
    let mut bodies = Vec::new();

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 8 {
            return Err(ScenarioError::Parse {
                line: number + 1,
                message: format!("expected 8 tab-separated columns, found {}", fields.len()),
            });
        }

        let parse = |column: usize| -> Result<Scalar, ScenarioError> {
            fields[column].trim().parse().map_err(|e| ScenarioError::Parse {
                line: number + 1,
                message: format!("column {}: {e}", column + 1),
            })
        };

        bodies.push(
            Body::new(
                Vector::new(parse(1)?, parse(2)?),
                Vector::new(parse(3)?, parse(4)?),
                parse(5)?,
                parse(6)?,
            )
            .with_charge(parse(7)?)
            .with_name(fields[0].trim()),
        );
    }

    Ok(bodies)
}

fn apply_overrides(mut simulation: Simulation, config: &SimulationConfig) -> Simulation {
    simulation = simulation.with_step_count(config.physics.step_count);
    if let Some(time_step) = config.physics.time_step {
        simulation = simulation.with_time_step(time_step);
    }

    let floor = config.physics.min_velocity_delta;
    let ceiling = config.physics.max_velocity_delta;
    if floor.is_some() || ceiling.is_some() {
        let (current_floor, current_ceiling) = simulation.adaptive_control();
        simulation = simulation.with_adaptive_control(
            floor.unwrap_or(current_floor),
            ceiling.unwrap_or(current_ceiling),
        );
    }
    simulation
}

fn configured_box(config: &SimulationConfig) -> Result<Option<BoundaryBox>, Error> {
    if !config.boundary.enabled {
        return Ok(None);
    }
    BoundaryBox::new(
        config.boundary.left,
        config.boundary.right,
        config.boundary.bottom,
        config.boundary.top,
        config.boundary.mode,
    )
    .map(Some)
}

fn random_heading(rng: &mut SharedRng) -> Vector {
    let angle = rng.random_range(0.0..std::f64::consts::TAU);
    Vector::new(angle.cos(), angle.sin())
}

/// Randomize a body the way the sandbox scenarios like it: mass follows the
/// cube of the radius so big bodies are proportionally heavy.
fn random_body(config: &SimulationConfig, rng: &mut SharedRng) -> Body {
    let scenario = &config.scenario;
    let radius_multiplier = rng.random_range(1.0 / scenario.radius_spread..=1.0);
    let speed = rng.random_range(-1.0..=1.0);

    Body {
        position: Vector::ZERO,
        velocity: random_heading(rng) * speed,
        mass: scenario.max_body_mass * radius_multiplier.powi(3),
        radius: scenario.max_body_radius * radius_multiplier,
        charge: if rng.random_range(0..2) == 0 {
            -1.0e-5
        } else {
            1.0e-5
        },
        name: String::new(),
    }
}

/// Draw positions until `body` overlaps nothing already placed, up to the
/// configured attempt limit.
fn place_without_overlap(
    body: &mut Body,
    placed: &[Body],
    x_range: (Scalar, Scalar),
    y_range: (Scalar, Scalar),
    attempts: usize,
    rng: &mut SharedRng,
) -> Result<(), ScenarioError> {
    for _ in 0..attempts {
        body.position = Vector::new(
            rng.random_range(x_range.0..=x_range.1),
            rng.random_range(y_range.0..=y_range.1),
        );
        if placed
            .iter()
            .all(|other| body.distance_to(other) >= body.radius + other.radius)
        {
            return Ok(());
        }
    }
    Err(ScenarioError::PlacementExhausted { attempts })
}

/// One ball dropped into a reflecting box under constant acceleration.
fn single_ball(config: &SimulationConfig) -> Result<Simulation, ScenarioError> {
    let bodies = vec![
        Body::new(Vector::new(0.5, 0.9), Vector::new(0.7, 0.0), 1.0, 0.05).with_name("ball"),
    ];
    let modules: Vec<Box<dyn ForceModule>> = vec![Box::new(ConstantAcceleration::default())];

    let mut simulation = Simulation::new(bodies, modules)?.with_time_step(0.02);
    if let Some(boundary) = configured_box(config)? {
        simulation = simulation.with_boundary(boundary)?;
    }
    Ok(simulation)
}

/// A boxful of randomized balls colliding under constant acceleration.
fn bouncy_balls(
    config: &SimulationConfig,
    rng: &mut SharedRng,
) -> Result<Simulation, ScenarioError> {
    let (left, right) = (config.boundary.left, config.boundary.right);
    let (bottom, top) = (config.boundary.bottom, config.boundary.top);
    // Keep spawns away from the walls
    let x_range = (
        left + 0.1 * (right - left),
        left + 0.9 * (right - left),
    );
    let y_range = (
        bottom + 0.1 * (top - bottom),
        bottom + 0.9 * (top - bottom),
    );

    let mut bodies: Vec<Body> = Vec::with_capacity(config.scenario.body_count);
    for _ in 0..config.scenario.body_count {
        let mut body = random_body(config, rng);
        place_without_overlap(
            &mut body,
            &bodies,
            x_range,
            y_range,
            config.scenario.placement_attempts,
            rng,
        )?;
        bodies.push(body);
    }

    let modules: Vec<Box<dyn ForceModule>> = vec![
        Box::new(Contact::new(config.physics.spring_constant)),
        Box::new(ConstantAcceleration::default()),
    ];

    let mut simulation = Simulation::new(bodies, modules)?.with_time_step(1.0e-3);
    if let Some(boundary) = configured_box(config)? {
        simulation = simulation.with_boundary(boundary)?;
    }
    Ok(simulation)
}

/// A cluster of stars around a heavy central body, with self-tuning contact
/// springs, wrapped in a periodic box.
fn bouncy_stars(
    config: &SimulationConfig,
    rng: &mut SharedRng,
) -> Result<Simulation, ScenarioError> {
    const ORBIT_EXTENT: Scalar = 1.0e12; // m
    const MAX_MASS: Scalar = 1.0e33; // kg
    let max_radius = 2.0 * ORBIT_EXTENT / 40.0;
    let g = config.physics.gravitational_constant;

    let mut bodies = vec![
        Body::new(Vector::ZERO, Vector::ZERO, MAX_MASS * 1.0e2, max_radius * 4.0)
            .with_name("core"),
    ];
    let central_mass = bodies[0].mass;

    for _ in 1..config.scenario.body_count.max(2) {
        let mut body = random_star(MAX_MASS, max_radius, 4.0, rng);
        place_without_overlap(
            &mut body,
            &bodies,
            (-ORBIT_EXTENT, ORBIT_EXTENT),
            (-ORBIT_EXTENT, ORBIT_EXTENT),
            config.scenario.placement_attempts,
            rng,
        )?;
        body.velocity = circular_orbit_velocity(body.position, central_mass, g)
            * rng.random_range(0.8..=1.2);
        bodies.push(body);
    }

    let modules: Vec<Box<dyn ForceModule>> = vec![
        Box::new(Gravity::new(g)),
        Box::new(Contact::self_tuning()),
    ];

    let span = 1.5 * ORBIT_EXTENT;
    let boundary = BoundaryBox::new(-span, span, -span, span, BoundaryMode::Periodic)?;

    Ok(Simulation::new(bodies, modules)?
        .with_boundary(boundary)?
        .with_time_step(20.0 * 60.0))
}

/// Debris orbiting a dominant attractor that eats what falls in and lets go
/// of what breaks away.
fn accretion(config: &SimulationConfig, rng: &mut SharedRng) -> Result<Simulation, ScenarioError> {
    const ORBIT_EXTENT: Scalar = 1.0e12; // m
    const MAX_MASS: Scalar = 1.0e33; // kg
    let max_radius = 2.0 * ORBIT_EXTENT / 40.0;
    let g = config.physics.gravitational_constant;

    let mut bodies = vec![
        Body::new(Vector::ZERO, Vector::ZERO, MAX_MASS * 1.0e2, max_radius * 4.0)
            .with_name("attractor"),
    ];
    let central_mass = bodies[0].mass;
    let capture_distance = bodies[0].radius;

    for _ in 1..config.scenario.body_count.max(2) {
        let mut body = random_star(MAX_MASS, max_radius, 4.0, rng);
        place_without_overlap(
            &mut body,
            &bodies,
            (-ORBIT_EXTENT, ORBIT_EXTENT),
            (-ORBIT_EXTENT, ORBIT_EXTENT),
            config.scenario.placement_attempts,
            rng,
        )?;
        body.velocity = circular_orbit_velocity(body.position, central_mass, g)
            * rng.random_range(0.8..=1.2);
        bodies.push(body);
    }

    let modules: Vec<Box<dyn ForceModule>> = vec![Box::new(
        Accretion::new(g, capture_distance).with_escape_radius_multiplier(50.0),
    )];

    Ok(Simulation::new(bodies, modules)?.with_time_step(20.0 * 60.0))
}

/// A line of charged balls spiraling in a uniform magnetic field, damped by
/// drag and nudged apart by their own electrostatics.
fn magnetic_rotation(config: &SimulationConfig) -> Result<Simulation, ScenarioError> {
    let mut bodies = Vec::with_capacity(config.scenario.body_count);
    for i in 0..config.scenario.body_count {
        bodies.push(
            Body::new(
                Vector::new(0.0, i as Scalar * 2.0),
                Vector::new(1.0, 0.0),
                1.0,
                0.5,
            )
            .with_charge(-1.0e-5),
        );
    }

    let modules: Vec<Box<dyn ForceModule>> = vec![
        Box::new(UniformField::new(Vector::ZERO, 1.0e5)),
        Box::new(Drag::quadratic(0.01)),
        Box::new(Electrostatic::new(config.physics.coulomb_constant)),
    ];

    Ok(Simulation::new(bodies, modules)?
        .with_time_step(0.2)
        .with_adaptive_control(0.0, 1.0e10))
}

/// Sun through Pluto plus the Moon, from the NASA planetary fact sheets.
fn solar_system(config: &SimulationConfig) -> Result<Simulation, ScenarioError> {
    // https://nssdc.gsfc.nasa.gov/planetary/factsheet/
    const NAMES: [&str; 11] = [
        "Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        "Pluto", "Moon",
    ];
    const DISTANCES_GM: [Scalar; 11] = [
        0.0, 57.9, 108.0, 150.0, 228.0, 779.0, 1430.0, 2870.0, 4520.0, 5910.0, 0.384,
    ];
    const MASSES_YG: [Scalar; 11] = [
        1.9885e6, 0.330, 4.87, 5.97, 0.642, 1.90e3, 5.68e2, 86.8, 102.0, 0.0130, 0.0730,
    ];
    const RADII_KM: [Scalar; 11] = [
        6.957e5, 4.88e3, 1.21e4, 1.28e4, 6.79e3, 1.43e5, 1.21e5, 5.11e4, 4.95e4, 2.38e3, 3.48e3,
    ];
    const SPEEDS_KM_S: [Scalar; 11] = [
        0.0, 47.4, 35.0, 29.8, 24.1, 13.1, 9.7, 6.8, 5.4, 4.7, 1.0,
    ];

    let mut bodies: Vec<Body> = (0..NAMES.len())
        .map(|i| {
            Body::new(
                Vector::new(1.0e9 * DISTANCES_GM[i], 0.0),
                Vector::new(0.0, 1.0e3 * SPEEDS_KM_S[i]),
                1.0e24 * MASSES_YG[i],
                1.0e3 * RADII_KM[i],
            )
            .with_name(NAMES[i])
        })
        .collect();

    // The Moon's table entry is relative to the Earth
    let earth_position = bodies[3].position;
    let earth_velocity = bodies[3].velocity;
    bodies[10].position += earth_position;
    bodies[10].velocity += earth_velocity;

    let modules: Vec<Box<dyn ForceModule>> =
        vec![Box::new(Gravity::new(config.physics.gravitational_constant))];

    // Ten-day steps
    Ok(Simulation::new(bodies, modules)?.with_time_step(10.0 * 24.0 * 3600.0))
}

fn random_star(
    max_mass: Scalar,
    max_radius: Scalar,
    radius_spread: Scalar,
    rng: &mut SharedRng,
) -> Body {
    let radius_multiplier = rng.random_range(1.0 / radius_spread..=1.0);
    Body::new(
        Vector::ZERO,
        Vector::ZERO,
        max_mass * radius_multiplier.powi(3),
        max_radius * radius_multiplier,
    )
}

/// Tangential velocity for a circular orbit of `central_mass` at `position`.
fn circular_orbit_velocity(position: Vector, central_mass: Scalar, g: Scalar) -> Vector {
    let dist = position.length();
    let tangent = Vector::new(-position.y, position.x) / dist;
    tangent * (g * central_mass / dist).sqrt()
}
