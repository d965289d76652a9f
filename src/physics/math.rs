//! Scalar and vector aliases shared across the physics core.

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and forces
pub type Vector = glam::DVec2;

/// In-plane component of v × B for a field of magnitude `field` pointing out
/// of the simulation plane.
#[inline]
pub fn cross_with_field(velocity: Vector, field: Scalar) -> Vector {
    Vector::new(velocity.y, -velocity.x) * field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_with_field_rotates_clockwise() {
        let v = Vector::new(1.0, 0.0);
        assert_eq!(cross_with_field(v, 2.0), Vector::new(0.0, -2.0));

        let v = Vector::new(0.0, 1.0);
        assert_eq!(cross_with_field(v, 2.0), Vector::new(2.0, 0.0));
    }

    #[test]
    fn test_cross_with_field_is_perpendicular() {
        let v = Vector::new(3.0, -7.0);
        let rotated = cross_with_field(v, 5.0);

        assert!(v.dot(rotated).abs() < 1e-12);
        assert!((rotated.length() - 5.0 * v.length()).abs() < 1e-12);
    }
}
