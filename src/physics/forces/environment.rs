//! Environment forces: each body interacts with a field, not with its peers.

use super::ForceModule;
use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector, cross_with_field};

/// Below this speed, drag is exactly zero rather than a division by a
/// vanishing magnitude.
const DRAG_SPEED_FLOOR: Scalar = 1.0e-20;

/// Uniform acceleration field, F = m·a₀ (gravity near a planet's surface).
#[derive(Debug, Clone)]
pub struct ConstantAcceleration {
    acceleration: Vector,
}

impl ConstantAcceleration {
    pub fn new(acceleration: Vector) -> Self {
        Self { acceleration }
    }
}

impl Default for ConstantAcceleration {
    fn default() -> Self {
        // https://en.wikipedia.org/wiki/Gravity_of_Earth
        Self::new(Vector::new(0.0, -9.81))
    }
}

impl ForceModule for ConstantAcceleration {
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        for (index, body) in bodies.iter().enumerate() {
            forces[index] += self.acceleration * body.mass;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "constant_acceleration"
    }
}

/// Uniform electromagnetic background, F = q·(E + v × B), with B pointing
/// out of the simulation plane.
#[derive(Debug, Clone)]
pub struct UniformField {
    electric: Vector,  // m kg / (s^3 A)
    magnetic: Scalar,  // kg / (s^2 A)
}

impl UniformField {
    pub fn new(electric: Vector, magnetic: Scalar) -> Self {
        Self { electric, magnetic }
    }
}

impl Default for UniformField {
    fn default() -> Self {
        Self::new(Vector::ZERO, 1.0)
    }
}

impl ForceModule for UniformField {
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        for (index, body) in bodies.iter().enumerate() {
            let v_cross_b = cross_with_field(body.velocity, self.magnetic);
            forces[index] += (self.electric + v_cross_b) * body.charge;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "uniform_field"
    }
}

/// Velocity-opposed drag with linear and quadratic terms, for problems where
/// speeds would otherwise grow without bound.
#[derive(Debug, Clone)]
pub struct Drag {
    linear: Scalar,
    quadratic: Scalar,
}

impl Drag {
    pub fn new(linear: Scalar, quadratic: Scalar) -> Self {
        Self { linear, quadratic }
    }

    pub fn quadratic(quadratic: Scalar) -> Self {
        Self::new(0.0, quadratic)
    }
}

impl Default for Drag {
    fn default() -> Self {
        Self::new(0.0, 1.0e-4)
    }
}

impl ForceModule for Drag {
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        for (index, body) in bodies.iter().enumerate() {
            let speed = body.speed();
            if speed < DRAG_SPEED_FLOOR {
                continue;
            }

            let direction = -body.velocity / speed;
            forces[index] += direction * (speed * (self.linear + speed * self.quadratic));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "drag"
    }
}
