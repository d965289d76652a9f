//! Rectangular domain boundary: ray/plane intersection, reflection, and
//! periodic wrapping.

use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};

/// Rays closer to parallel than this cannot reach a plane this sub-step.
const PARALLEL_THRESHOLD: Scalar = 1.0e-20;

/// Sub-step cap. More wall crossings than this within one step means the
/// step size cannot resolve the boundary geometry.
const MAX_BOUNDARY_ITERATIONS: usize = 1000;

/// One boundary wall: an origin point and a unit outward normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Vector,
    normal: Vector,
}

impl Plane {
    pub fn new(origin: Vector, normal: Vector) -> Self {
        Self {
            origin,
            normal: normal.normalize(),
        }
    }

    pub fn origin(&self) -> Vector {
        self.origin
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Distance along `direction` from `position` to this plane.
    ///
    /// `None` when the ray runs parallel to the plane, points away from it,
    /// or the plane lies behind the ray.
    pub fn intersection_distance(&self, position: Vector, direction: Vector) -> Option<Scalar> {
        let approach = direction.dot(self.normal);
        if approach < PARALLEL_THRESHOLD {
            return None;
        }

        let distance = (self.origin - position).dot(self.normal) / approach;
        if distance < 0.0 {
            return None;
        }
        Some(distance)
    }

    /// Mirror `direction` about this plane: v − 2(v·n)n.
    pub fn reflect(&self, direction: Vector) -> Vector {
        direction - 2.0 * direction.dot(self.normal) * self.normal
    }
}

/// What a wall does to a body that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Mirror the velocity component normal to the wall.
    Reflect,
    /// Translate the body to the opposite wall, velocity unchanged.
    Periodic,
}

/// Axis-aligned rectangular domain: four walls, all reflecting or all
/// periodic. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryBox {
    /// Lower x, lower y, upper x, upper y.
    planes: [Plane; 4],
    /// Periodic translation applied when the matching wall is crossed; each
    /// offset is the opposite wall's signed span on that axis.
    offsets: [Vector; 4],
    mode: BoundaryMode,
}

impl BoundaryBox {
    pub fn new(
        left: Scalar,
        right: Scalar,
        bottom: Scalar,
        top: Scalar,
        mode: BoundaryMode,
    ) -> Result<Self, Error> {
        if left >= right {
            return Err(Error::InvalidBounds {
                axis: 0,
                lower: left,
                upper: right,
            });
        }
        if bottom >= top {
            return Err(Error::InvalidBounds {
                axis: 1,
                lower: bottom,
                upper: top,
            });
        }

        let planes = [
            Plane::new(Vector::new(left, 0.0), Vector::new(-1.0, 0.0)),
            Plane::new(Vector::new(0.0, bottom), Vector::new(0.0, -1.0)),
            Plane::new(Vector::new(right, 0.0), Vector::new(1.0, 0.0)),
            Plane::new(Vector::new(0.0, top), Vector::new(0.0, 1.0)),
        ];
        let offsets = [
            Vector::new(right - left, 0.0),
            Vector::new(0.0, top - bottom),
            Vector::new(left - right, 0.0),
            Vector::new(0.0, bottom - top),
        ];

        Ok(Self {
            planes,
            offsets,
            mode,
        })
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Lower and upper wall coordinates on an axis (0 = x, 1 = y).
    pub fn limits(&self, axis: usize) -> (Scalar, Scalar) {
        (
            self.planes[axis].origin[axis],
            self.planes[axis + 2].origin[axis],
        )
    }

    /// Every body must start strictly inside, accounting for its radius.
    /// Violations are configuration errors, not runtime conditions.
    pub fn check_inside(&self, bodies: &[Body]) -> Result<(), Error> {
        for (index, body) in bodies.iter().enumerate() {
            for axis in 0..2 {
                let (lower, upper) = self.limits(axis);
                if body.position[axis] - body.radius < lower
                    || body.position[axis] + body.radius > upper
                {
                    return Err(Error::BodyOutsideBox { index });
                }
            }
        }
        Ok(())
    }

    /// Advance `position` up to the first wall interaction, at most.
    ///
    /// Returns the updated position, direction, and remaining distance.
    fn partial_update(
        &self,
        mut position: Vector,
        direction: Vector,
        distance: Scalar,
        radius: Scalar,
    ) -> Result<(Vector, Vector, Scalar), Error> {
        let mut nearest: Option<(usize, Scalar)> = None;
        for (wall, plane) in self.planes.iter().enumerate() {
            let Some(geometric) = plane.intersection_distance(position, direction) else {
                continue;
            };

            // A reflecting wall stops the rim, not the center: the impact
            // happens radius / |d·n| earlier along the path. Periodic walls
            // have no exclusion region.
            let adjusted = match self.mode {
                BoundaryMode::Reflect => {
                    geometric - radius / direction.dot(plane.normal()).abs()
                }
                BoundaryMode::Periodic => geometric,
            };

            if nearest.is_none_or(|(_, best)| adjusted < best) {
                nearest = Some((wall, adjusted));
            }
        }

        let Some((wall, impact_distance)) = nearest else {
            return Err(Error::NoBoundaryIntersection { index: 0, step: 0 });
        };

        if distance < impact_distance {
            // The step ends before the wall is reached.
            return Ok((position + direction * distance, direction, 0.0));
        }

        if impact_distance < -0.25 * radius {
            return Err(Error::WallPenetration { index: 0, step: 0 });
        }

        position += direction * impact_distance;
        let remaining = distance - impact_distance;

        match self.mode {
            BoundaryMode::Reflect => {
                Ok((position, self.planes[wall].reflect(direction), remaining))
            }
            BoundaryMode::Periodic => Ok((position + self.offsets[wall], direction, remaining)),
        }
    }

    /// Resolve a full displacement, bouncing or wrapping as many times as it
    /// takes within this step.
    ///
    /// Returns the final position and final unit direction. Wall interactions
    /// change heading but never speed, so the caller reconstructs velocity as
    /// direction × original speed.
    pub fn resolve(
        &self,
        position: Vector,
        displacement: Vector,
        radius: Scalar,
    ) -> Result<(Vector, Vector), Error> {
        let mut distance = displacement.length();
        if distance <= 0.0 {
            // A stationary body never reaches a wall.
            return Ok((position, Vector::ZERO));
        }

        let mut position = position;
        let mut direction = displacement / distance;
        for _ in 0..MAX_BOUNDARY_ITERATIONS {
            (position, direction, distance) =
                self.partial_update(position, direction, distance, radius)?;
            if distance <= 0.0 {
                return Ok((position, direction));
            }
        }

        Err(Error::BoundaryIterationsExceeded { index: 0, step: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(mode: BoundaryMode) -> BoundaryBox {
        BoundaryBox::new(0.0, 1.0, 0.0, 1.0, mode).unwrap()
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        assert!(matches!(
            BoundaryBox::new(1.0, 0.0, 0.0, 1.0, BoundaryMode::Reflect),
            Err(Error::InvalidBounds { axis: 0, .. })
        ));
        assert!(matches!(
            BoundaryBox::new(0.0, 1.0, 2.0, 2.0, BoundaryMode::Reflect),
            Err(Error::InvalidBounds { axis: 1, .. })
        ));
    }

    #[test]
    fn test_plane_intersection_distance() {
        let plane = Plane::new(Vector::new(1.0, 0.0), Vector::new(1.0, 0.0));

        let hit = plane.intersection_distance(Vector::new(0.25, 0.5), Vector::new(1.0, 0.0));
        assert!((hit.unwrap() - 0.75).abs() < 1e-12);

        // Moving away from the plane
        assert!(
            plane
                .intersection_distance(Vector::new(0.25, 0.5), Vector::new(-1.0, 0.0))
                .is_none()
        );

        // Running parallel to the plane
        assert!(
            plane
                .intersection_distance(Vector::new(0.25, 0.5), Vector::new(0.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn test_plane_behind_the_ray_is_ignored() {
        let plane = Plane::new(Vector::new(1.0, 0.0), Vector::new(1.0, 0.0));

        // Already past the plane and still approaching its half-space
        assert!(
            plane
                .intersection_distance(Vector::new(2.0, 0.0), Vector::new(1.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn test_reflection_preserves_speed_and_flips_normal_component() {
        let boundary = unit_box(BoundaryMode::Reflect);
        let displacement = Vector::new(0.6, 0.2);

        let (position, direction) = boundary
            .resolve(Vector::new(0.5, 0.5), displacement, 0.0)
            .unwrap();

        // One bounce off the right wall: x folds back, y keeps going.
        assert!((position.x - 0.9).abs() < 1e-12);
        assert!((position.y - 0.7).abs() < 1e-12);
        assert!((direction.length() - 1.0).abs() < 1e-12);
        assert!(direction.x < 0.0);
        assert!(direction.y > 0.0);

        // The tangential component survives untouched.
        let incoming = displacement.normalize();
        assert!((direction.y - incoming.y).abs() < 1e-12);
        assert!((direction.x + incoming.x).abs() < 1e-12);
    }

    #[test]
    fn test_reflection_accounts_for_body_radius() {
        let boundary = unit_box(BoundaryMode::Reflect);
        let radius = 0.1;

        let (position, direction) = boundary
            .resolve(Vector::new(0.5, 0.5), Vector::new(0.6, 0.0), radius)
            .unwrap();

        // The rim touches the wall at x = 0.9; the leftover 0.2 comes back.
        assert!((position.x - 0.7).abs() < 1e-12);
        assert_eq!(direction, Vector::new(-1.0, 0.0));
    }

    #[test]
    fn test_periodic_wrap_translates_by_span_and_keeps_direction() {
        let boundary = unit_box(BoundaryMode::Periodic);

        let (position, direction) = boundary
            .resolve(Vector::new(0.5, 0.5), Vector::new(0.8, 0.0), 0.05)
            .unwrap();

        // Crosses the right wall after 0.5, wraps to the left wall, and
        // spends the remaining 0.3 there.
        assert!((position.x - 0.3).abs() < 1e-12);
        assert!((position.y - 0.5).abs() < 1e-12);
        assert_eq!(direction, Vector::new(1.0, 0.0));
    }

    #[test]
    fn test_multiple_bounces_within_one_step() {
        let boundary = unit_box(BoundaryMode::Reflect);

        // 2.2 units of travel across a unit box: 0.5 to the right wall, a
        // full traversal back to the left wall, then 0.7 forward again.
        let (position, direction) = boundary
            .resolve(Vector::new(0.5, 0.5), Vector::new(2.2, 0.0), 0.0)
            .unwrap();

        assert!((position.x - 0.7).abs() < 1e-12);
        assert_eq!(direction, Vector::new(1.0, 0.0));
    }

    #[test]
    fn test_corner_paths_resolve_both_axes() {
        let boundary = unit_box(BoundaryMode::Reflect);

        let (position, direction) = boundary
            .resolve(Vector::new(0.5, 0.5), Vector::new(0.7, 0.7), 0.0)
            .unwrap();

        assert!((position.x - 0.8).abs() < 1e-12);
        assert!((position.y - 0.8).abs() < 1e-12);
        assert!((direction.length() - 1.0).abs() < 1e-12);
        assert!(direction.x < 0.0 && direction.y < 0.0);
    }

    #[test]
    fn test_runaway_body_exceeds_iteration_cap() {
        let boundary = unit_box(BoundaryMode::Reflect);

        let result = boundary.resolve(Vector::new(0.5, 0.5), Vector::new(2000.0, 0.0), 0.0);

        assert!(matches!(
            result,
            Err(Error::BoundaryIterationsExceeded { .. })
        ));
    }

    #[test]
    fn test_body_outside_box_finds_no_intersection() {
        let boundary = unit_box(BoundaryMode::Reflect);

        // Left of the box, moving further left: every wall is parallel,
        // receding, or behind.
        let result = boundary.resolve(Vector::new(-1.0, 0.5), Vector::new(-1.0, 0.0), 0.0);

        assert!(matches!(result, Err(Error::NoBoundaryIntersection { .. })));
    }

    #[test]
    fn test_zero_displacement_is_a_no_op() {
        let boundary = unit_box(BoundaryMode::Reflect);
        let start = Vector::new(0.25, 0.75);

        let (position, _) = boundary.resolve(start, Vector::ZERO, 0.1).unwrap();

        assert_eq!(position, start);
    }

    #[test]
    fn test_check_inside_accounts_for_radius() {
        let boundary = unit_box(BoundaryMode::Reflect);

        let inside = [Body::new(Vector::new(0.5, 0.5), Vector::ZERO, 1.0, 0.4)];
        assert!(boundary.check_inside(&inside).is_ok());

        let touching = [Body::new(Vector::new(0.5, 0.95), Vector::ZERO, 1.0, 0.1)];
        assert!(matches!(
            boundary.check_inside(&touching),
            Err(Error::BodyOutsideBox { index: 0 })
        ));
    }

    #[test]
    fn test_limits_report_wall_coordinates() {
        let boundary = BoundaryBox::new(-2.0, 3.0, -1.0, 4.0, BoundaryMode::Periodic).unwrap();

        assert_eq!(boundary.limits(0), (-2.0, 3.0));
        assert_eq!(boundary.limits(1), (-1.0, 4.0));
    }
}
