//! Passive body record for the simulation core.

use crate::physics::math::{Scalar, Vector};

/// A circular body in the plane.
///
/// Bodies are plain data: the simulation owns them in a single array and all
/// behavior lives in the force modules and the stepper. The `name` field is
/// display metadata and never participates in the physics.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vector,
    pub velocity: Vector,
    /// Mass in kilograms; must stay positive.
    pub mass: Scalar,
    /// Disk radius; tells the contact module and the boundary when the body
    /// touches something.
    pub radius: Scalar,
    /// Signed charge; drives the electrostatic and field modules.
    pub charge: Scalar,
    pub name: String,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            mass: 1.0,
            radius: 0.05,
            charge: 0.0,
            name: String::new(),
        }
    }
}

impl Body {
    pub fn new(position: Vector, velocity: Vector, mass: Scalar, radius: Scalar) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: Scalar) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Center-to-center distance to another body.
    #[inline]
    pub fn distance_to(&self, other: &Body) -> Scalar {
        self.position.distance(other.position)
    }

    #[inline]
    pub fn speed(&self) -> Scalar {
        self.velocity.length()
    }

    /// This body's contribution to the aggregate kinetic energy diagnostic.
    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_between_bodies() {
        let a = Body::new(Vector::new(0.0, 0.0), Vector::ZERO, 1.0, 0.1);
        let b = Body::new(Vector::new(3.0, 4.0), Vector::ZERO, 1.0, 0.1);

        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_kinetic_energy() {
        let body = Body::new(Vector::ZERO, Vector::new(3.0, 4.0), 2.0, 0.1);

        // 0.5 * 2.0 * 25.0
        assert!((body.kinetic_energy() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_kinetic_energy_of_stationary_body_is_zero() {
        let body = Body::default();
        assert_eq!(body.kinetic_energy(), 0.0);
    }
}
