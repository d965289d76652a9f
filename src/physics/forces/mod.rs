//! Composable force modules for the simulation core.
//!
//! Each module contributes to a shared per-body force accumulator. Pairwise
//! modules (gravity, electrostatics, contact) apply equal and opposite
//! contributions to both members of every unordered pair; environment modules
//! read only a single body's state. The stepper invokes modules in list order
//! and pairs in ascending index order, so accumulated floating-point results
//! reproduce run to run.

use crate::physics::body::Body;
use crate::physics::error::Error;
use crate::physics::math::{Scalar, Vector};

mod accretion;
mod contact;
mod electrostatic;
mod environment;
mod gravity;

pub use accretion::Accretion;
pub use contact::Contact;
pub use electrostatic::{COULOMB_CONSTANT, Electrostatic};
pub use environment::{ConstantAcceleration, Drag, UniformField};
pub use gravity::{GRAVITATIONAL_CONSTANT, Gravity};

/// One force law, applied to the whole active body set each step.
///
/// Modules receive body slices only for the duration of a single call and
/// must not retain them.
pub trait ForceModule: Send + Sync {
    /// Runs once per step, before any force is accumulated, with the current
    /// step size. Self-tuning modules retune themselves here; lifecycle
    /// modules may mutate bodies in place and return the indices of bodies
    /// leaving the active set. The stepper compacts all returned indices at
    /// once, after every module's hook has run, so no module ever observes a
    /// set that shrank mid-scan.
    fn pre_step_update(&mut self, _bodies: &mut [Body], _dt: Scalar) -> Vec<usize> {
        Vec::new()
    }

    /// Adds this module's contribution for every active body to `forces`.
    ///
    /// `forces` has one entry per body and arrives already holding the sums
    /// of earlier modules; implementations add, never overwrite.
    fn add_force(&self, bodies: &[Body], forces: &mut [Vector]) -> Result<(), Error>;

    fn name(&self) -> &'static str;
}

/// Accumulates C(i, j)·r̂/r² over every unordered pair, equal and opposite.
///
/// Shared by the inverse-square laws; `coefficient` supplies the variant's
/// C(i, j) (negative for attraction along r̂ = (pᵢ − pⱼ)/‖·‖).
pub(crate) fn add_inverse_square_forces(
    bodies: &[Body],
    forces: &mut [Vector],
    coefficient: impl Fn(&Body, &Body) -> Scalar,
) -> Result<(), Error> {
    for first in 0..bodies.len() {
        for second in (first + 1)..bodies.len() {
            let r = bodies[first].position - bodies[second].position;
            let r2 = r.dot(r);
            if r2 <= Scalar::EPSILON {
                return Err(Error::DegenerateSeparation {
                    first,
                    second,
                    step: 0,
                });
            }

            let rhat = r / r2.sqrt();
            let force = rhat * (coefficient(&bodies[first], &bodies[second]) / r2);

            forces[first] += force;
            forces[second] -= force;
        }
    }
    Ok(())
}
