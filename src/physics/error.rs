//! Error taxonomy for the physics core.
//!
//! Configuration errors are raised before a run starts; domain errors abort a
//! run immediately. Neither is ever retried: both mean the physical
//! configuration or the step size must be fixed by the caller.

use crate::physics::math::Scalar;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The simulation was constructed with no bodies.
    EmptyBodySet,
    /// A body carries a mass that F = m·a cannot divide by.
    NonPositiveMass { index: usize, mass: Scalar },
    /// A body carries a negative radius.
    NegativeRadius { index: usize, radius: Scalar },
    /// Box bounds do not satisfy lower < upper on some axis.
    InvalidBounds {
        axis: usize,
        lower: Scalar,
        upper: Scalar,
    },
    /// A body starts outside the box, accounting for its radius.
    BodyOutsideBox { index: usize },
    /// Two bodies coincide; inverse-square forces are undefined there.
    DegenerateSeparation {
        first: usize,
        second: usize,
        step: usize,
    },
    /// The boundary resolver found no wall along the direction of travel.
    NoBoundaryIntersection { index: usize, step: usize },
    /// A body crossed more walls in one step than the resolver allows.
    BoundaryIterationsExceeded { index: usize, step: usize },
    /// A body's center sits inside a wall's exclusion region.
    WallPenetration { index: usize, step: usize },
}

impl Error {
    /// Fill in the body index and step number known only to the stepper.
    pub(crate) fn located(self, index: usize, step: usize) -> Self {
        match self {
            Error::DegenerateSeparation { first, second, .. } => {
                Error::DegenerateSeparation {
                    first,
                    second,
                    step,
                }
            }
            Error::NoBoundaryIntersection { .. } => Error::NoBoundaryIntersection { index, step },
            Error::BoundaryIterationsExceeded { .. } => {
                Error::BoundaryIterationsExceeded { index, step }
            }
            Error::WallPenetration { .. } => Error::WallPenetration { index, step },
            other => other,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyBodySet => write!(f, "simulation requires at least one body"),
            Error::NonPositiveMass { index, mass } => {
                write!(f, "body {index} has non-positive mass {mass}")
            }
            Error::NegativeRadius { index, radius } => {
                write!(f, "body {index} has negative radius {radius}")
            }
            Error::InvalidBounds { axis, lower, upper } => {
                write!(
                    f,
                    "box bounds on axis {axis} are inverted or empty ({lower} >= {upper})"
                )
            }
            Error::BodyOutsideBox { index } => {
                write!(f, "body {index} starts outside the box")
            }
            Error::DegenerateSeparation {
                first,
                second,
                step,
            } => {
                write!(
                    f,
                    "bodies {first} and {second} coincide at step {step}; \
                     inverse-square force is undefined"
                )
            }
            Error::NoBoundaryIntersection { index, step } => {
                write!(
                    f,
                    "no boundary intersection for body {index} at step {step}; \
                     is the body outside the box?"
                )
            }
            Error::BoundaryIterationsExceeded { index, step } => {
                write!(
                    f,
                    "too many boundary crossings for body {index} at step {step}; \
                     the body is moving too quickly for the step size"
                )
            }
            Error::WallPenetration { index, step } => {
                write!(
                    f,
                    "negative collision distance for body {index} at step {step}; \
                     is the body inside a wall?"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
