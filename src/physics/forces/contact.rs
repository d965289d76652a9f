//! Elastic contact between overlapping bodies.

use super::ForceModule;
use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};

const DEFAULT_SPRING_CONSTANT: Scalar = 1.0e5; // kg / s^2

/// Hooke's-law repulsion along the line of centers, active only while two
/// disks overlap.
///
/// The spring constant can be fixed, or retuned every step from the current
/// body population so the elastic timescale stays resolvable by the step
/// size. Retuning is a numerical-stability device, not physics.
#[derive(Debug, Clone)]
pub struct Contact {
    spring_constant: Scalar,
    retune_each_step: bool,
}

impl Contact {
    pub fn new(spring_constant: Scalar) -> Self {
        Self {
            spring_constant,
            retune_each_step: false,
        }
    }

    /// A contact module that recomputes its spring constant each step as
    /// mean_mass · (max_speed / min_radius)².
    pub fn self_tuning() -> Self {
        Self {
            spring_constant: DEFAULT_SPRING_CONSTANT,
            retune_each_step: true,
        }
    }

    pub fn spring_constant(&self) -> Scalar {
        self.spring_constant
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new(DEFAULT_SPRING_CONSTANT)
    }
}

impl ForceModule for Contact {
    fn pre_step_update(&mut self, bodies: &mut [Body], _dt: Scalar) -> Vec<usize> {
        if self.retune_each_step && !bodies.is_empty() {
            let mean_mass =
                bodies.iter().map(|b| b.mass).sum::<Scalar>() / bodies.len() as Scalar;
            let max_speed = bodies.iter().map(Body::speed).fold(0.0, Scalar::max);
            let min_radius = bodies
                .iter()
                .map(|b| b.radius)
                .fold(Scalar::INFINITY, Scalar::min);

            // A motionless population or a zero radius would tune the spring
            // to 0 or infinity; keep the previous constant instead.
            if max_speed > 0.0 && min_radius > 0.0 && min_radius.is_finite() {
                self.spring_constant = mean_mass * (max_speed / min_radius).powi(2);
            }
        }
        Vec::new()
    }

    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        for first in 0..bodies.len() {
            for second in (first + 1)..bodies.len() {
                let r = bodies[first].position - bodies[second].position;
                let dist = r.length();

                let overlap = bodies[first].radius + bodies[second].radius - dist;
                if overlap < 0.0 {
                    // Disks are separated; the contribution is exactly zero.
                    continue;
                }
                if dist * dist <= Scalar::EPSILON {
                    return Err(Error::DegenerateSeparation {
                        first,
                        second,
                        step: 0,
                    });
                }

                let rhat = r / dist;
                let force = rhat * (self.spring_constant * overlap);

                forces[first] += force;
                forces[second] -= force;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "contact"
    }
}
