//! Newtonian gravity between every pair of bodies.

use super::{ForceModule, add_inverse_square_forces};
use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};

/// <https://en.wikipedia.org/wiki/Gravitational_constant>
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.674_30e-11; // N m^2 kg^-2

/// Pairwise attraction F = −G·mᵢ·mⱼ·r̂/r².
#[derive(Debug, Clone)]
pub struct Gravity {
    g: Scalar,
}

impl Gravity {
    pub fn new(g: Scalar) -> Self {
        Self { g }
    }

    pub fn constant(&self) -> Scalar {
        self.g
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(GRAVITATIONAL_CONSTANT)
    }
}

impl ForceModule for Gravity {
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        add_inverse_square_forces(bodies, forces, |a, b| -self.g * a.mass * b.mass)
    }

    fn name(&self) -> &'static str {
        "gravity"
    }
}
