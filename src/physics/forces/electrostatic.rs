//! Coulomb force between every pair of charged bodies.

use super::{ForceModule, add_inverse_square_forces};
use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};

/// <https://en.wikipedia.org/wiki/Coulomb_constant>
pub const COULOMB_CONSTANT: Scalar = 8.987_551_792_1e9; // kg m^3 s^-4 A^-2

/// Pairwise electrostatic force F = k·qᵢ·qⱼ·r̂/r².
///
/// Like charges repel (positive coefficient pushes along r̂), opposite
/// charges attract; bodies with zero charge contribute nothing.
#[derive(Debug, Clone)]
pub struct Electrostatic {
    k: Scalar,
}

impl Electrostatic {
    pub fn new(k: Scalar) -> Self {
        Self { k }
    }

    pub fn constant(&self) -> Scalar {
        self.k
    }
}

impl Default for Electrostatic {
    fn default() -> Self {
        Self::new(COULOMB_CONSTANT)
    }
}

impl ForceModule for Electrostatic {
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error> {
        add_inverse_square_forces(bodies, forces, |a, b| self.k * a.charge * b.charge)
    }

    fn name(&self) -> &'static str {
        "electrostatic"
    }
}
