//! The stepper: force accumulation, integration, boundary resolution, and
//! adaptive step-size control.

use crate::physics::body::Body;
use crate::physics::boundary::BoundaryBox;
use crate::physics::error::Error;
use crate::physics::forces::ForceModule;
use crate::physics::math::{Scalar, Vector};
use tracing::debug;

/// Read-only observation contract for telemetry and visualization layers.
///
/// Observers run after every completed step and never influence the physics.
pub trait StepObserver {
    fn after_step(&mut self, simulation: &Simulation);
}

/// Owns the body array, an ordered list of force modules, and the clock.
///
/// Modules see the bodies only for the duration of a single call; everything
/// else about a step (accumulator, compaction, adaptive control) lives here.
pub struct Simulation {
    bodies: Vec<Body>,
    modules: Vec<Box<dyn ForceModule>>,
    boundary: Option<BoundaryBox>,
    forces: Vec<Vector>,
    time: Scalar,
    time_step: Scalar,
    step_count: usize,
    steps_completed: usize,
    /// The step doubles when every body's velocity change is below this.
    min_velocity_delta: Scalar,
    /// The step halves when any body's velocity change exceeds this.
    max_velocity_delta: Scalar,
    kinetic_energy: Scalar,
}

impl Simulation {
    /// Validates the body set: at least one body, positive masses,
    /// non-negative radii.
    pub fn new(bodies: Vec<Body>, modules: Vec<Box<dyn ForceModule>>) -> Result<Self, Error> {
        if bodies.is_empty() {
            return Err(Error::EmptyBodySet);
        }
        for (index, body) in bodies.iter().enumerate() {
            if body.mass <= 0.0 {
                return Err(Error::NonPositiveMass {
                    index,
                    mass: body.mass,
                });
            }
            if body.radius < 0.0 {
                return Err(Error::NegativeRadius {
                    index,
                    radius: body.radius,
                });
            }
        }

        let forces = vec![Vector::ZERO; bodies.len()];
        let kinetic_energy = bodies.iter().map(Body::kinetic_energy).sum();

        Ok(Self {
            bodies,
            modules,
            boundary: None,
            forces,
            time: 0.0,
            time_step: 1.0,
            step_count: 1000,
            steps_completed: 0,
            min_velocity_delta: 0.0,
            max_velocity_delta: Scalar::INFINITY,
            kinetic_energy,
        })
    }

    /// Attach the domain boundary. Every body must already sit inside it,
    /// accounting for its radius.
    pub fn with_boundary(mut self, boundary: BoundaryBox) -> Result<Self, Error> {
        boundary.check_inside(&self.bodies)?;
        self.boundary = Some(boundary);
        Ok(self)
    }

    pub fn with_time_step(mut self, time_step: Scalar) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_step_count(mut self, step_count: usize) -> Self {
        self.step_count = step_count;
        self
    }

    /// Step-size control bounds. The defaults (0, +∞) disable the control.
    pub fn with_adaptive_control(mut self, floor: Scalar, ceiling: Scalar) -> Self {
        self.min_velocity_delta = floor;
        self.max_velocity_delta = ceiling;
        self
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn boundary(&self) -> Option<&BoundaryBox> {
        self.boundary.as_ref()
    }

    pub fn time(&self) -> Scalar {
        self.time
    }

    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed
    }

    /// Current adaptive-control bounds as (floor, ceiling).
    pub fn adaptive_control(&self) -> (Scalar, Scalar) {
        (self.min_velocity_delta, self.max_velocity_delta)
    }

    /// Aggregate kinetic energy Σ ½·m·‖v‖² as of the last completed step.
    pub fn kinetic_energy(&self) -> Scalar {
        self.kinetic_energy
    }

    /// Advance the simulation by one step.
    pub fn step(&mut self) -> Result<(), Error> {
        let step = self.steps_completed;
        let dt = self.time_step;

        // Pre-step hooks run first, in module-list order: self-tuning
        // modules retune here and lifecycle modules mark departures. Marks
        // are compacted once, before any force is summed, so every module's
        // add_force sees the same body set.
        let mut departed: Vec<usize> = Vec::new();
        for module in &mut self.modules {
            departed.extend(module.pre_step_update(&mut self.bodies, dt));
        }
        if !departed.is_empty() {
            self.compact(&departed);
        }

        // Accumulate forces in module-list order; pairwise modules walk
        // pairs in ascending index order. The fixed order keeps results
        // bit-identical run to run.
        self.forces.clear();
        self.forces.resize(self.bodies.len(), Vector::ZERO);
        for module in &self.modules {
            module
                .add_force(&self.bodies, &mut self.forces)
                .map_err(|error| error.located(0, step))?;
        }

        let mut min_delta = Scalar::INFINITY;
        let mut max_delta: Scalar = 0.0;
        for index in 0..self.bodies.len() {
            let body = &mut self.bodies[index];
            let acceleration = self.forces[index] / body.mass;
            let velocity_delta = acceleration * dt;
            body.velocity += velocity_delta;

            let delta = velocity_delta.length();
            min_delta = min_delta.min(delta);
            max_delta = max_delta.max(delta);

            let displacement = body.velocity * dt;
            match &self.boundary {
                Some(boundary) if displacement.length_squared() > 0.0 => {
                    let speed = body.velocity.length();
                    let (position, direction) = boundary
                        .resolve(body.position, displacement, body.radius)
                        .map_err(|error| error.located(index, step))?;
                    body.position = position;
                    body.velocity = direction * speed;
                }
                _ => body.position += displacement,
            }
        }

        // Soft step-size control: shrink when any body moved too violently,
        // grow when every body barely moved. The ceiling wins when both
        // fire; oscillation across consecutive steps is accepted.
        if max_delta > self.max_velocity_delta {
            self.time_step *= 0.5;
            debug!(step, time_step = self.time_step, "halving step size");
        } else if min_delta < self.min_velocity_delta {
            self.time_step *= 2.0;
            debug!(step, time_step = self.time_step, "doubling step size");
        }

        self.kinetic_energy = self.bodies.iter().map(Body::kinetic_energy).sum();
        self.time += self.time_step;
        self.steps_completed += 1;
        Ok(())
    }

    /// Run until the configured step count is reached.
    pub fn run(&mut self) -> Result<(), Error> {
        while self.steps_completed < self.step_count {
            self.step()?;
        }
        Ok(())
    }

    /// Run until the configured step count is reached, notifying `observer`
    /// after each completed step.
    pub fn run_with_observer(&mut self, observer: &mut dyn StepObserver) -> Result<(), Error> {
        while self.steps_completed < self.step_count {
            self.step()?;
            observer.after_step(self);
        }
        Ok(())
    }

    /// Drop departed bodies, preserving the relative order of the rest.
    fn compact(&mut self, departed: &[usize]) {
        let mut index = 0;
        self.bodies.retain(|_| {
            let keep = !departed.contains(&index);
            index += 1;
            keep
        });
    }
}
