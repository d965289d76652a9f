//! Accretion: gravity plus capture and escape around the dominant body.

use super::{ForceModule, add_inverse_square_forces};
use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};
use tracing::debug;

/// Gravity variant whose pre-step hook grows the most massive body by
/// swallowing anything inside the capture distance, and retires bodies that
/// have clearly left the system.
///
/// A swallowed body's momentum transfers to the primary (velocity becomes
/// the momentum-weighted average), masses sum, and radii combine by the
/// equal-volume rule (r₁³ + r₂³)^(1/3). A body farther out than
/// `escape_radius_multiplier` primary radii whose speed exceeds the local
/// escape velocity √(2·G·M/d) is removed from the active set.
#[derive(Debug, Clone)]
pub struct Accretion {
    g: Scalar,
    capture_distance: Scalar,
    escape_radius_multiplier: Scalar,
}

impl Accretion {
    pub fn new(g: Scalar, capture_distance: Scalar) -> Self {
        Self {
            g,
            capture_distance,
            escape_radius_multiplier: 50.0,
        }
    }

    pub fn with_escape_radius_multiplier(mut self, multiplier: Scalar) -> Self {
        self.escape_radius_multiplier = multiplier;
        self
    }

    /// Index of the most massive active body, the accretor.
    fn primary_index(bodies: &[Body]) -> Option<usize> {
        bodies
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.mass.total_cmp(&b.mass))
            .map(|(index, _)| index)
    }
}

impl ForceModule for Accretion {
    fn pre_step_update(&mut self, bodies: &mut [Body], _dt: Scalar) -> Vec<usize> {
        let Some(primary) = Self::primary_index(bodies) else {
            return Vec::new();
        };

        let mut departed = Vec::new();
        for index in 0..bodies.len() {
            if index == primary {
                continue;
            }

            let dist = bodies[index].position.distance(bodies[primary].position);
            if dist < self.capture_distance {
                let captured_mass = bodies[index].mass;
                let captured_momentum = bodies[index].velocity * captured_mass;
                let captured_radius = bodies[index].radius;

                let accretor = &mut bodies[primary];
                let total_mass = accretor.mass + captured_mass;
                accretor.velocity =
                    (accretor.velocity * accretor.mass + captured_momentum) / total_mass;
                accretor.mass = total_mass;
                accretor.radius =
                    (accretor.radius.powi(3) + captured_radius.powi(3)).cbrt();

                debug!(index, dist, "body captured by primary");
                departed.push(index);
            } else {
                let escape_speed = (2.0 * self.g * bodies[primary].mass / dist).sqrt();
                if bodies[index].speed() > escape_speed
                    && dist > self.escape_radius_multiplier * bodies[primary].radius
                {
                    debug!(index, dist, "body escaped the system");
                    departed.push(index);
                }
            }
        }
        departed
    }

    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        add_inverse_square_forces(bodies, forces, |a, b| -self.g * a.mass * b.mass)
    }

    fn name(&self) -> &'static str {
        "accretion"
    }
}
