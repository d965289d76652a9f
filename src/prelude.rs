//! dustbox prelude module
//!
//! Re-exports the most commonly used types and traits across the crate to
//! reduce import boilerplate.

// External crate re-exports
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Resources
pub use crate::resources::SharedRng;

// Internal re-exports - Physics
pub use crate::physics::body::Body;
pub use crate::physics::boundary::{BoundaryBox, BoundaryMode, Plane};
pub use crate::physics::error::Error;
pub use crate::physics::forces::{
    Accretion, ConstantAcceleration, Contact, Drag, Electrostatic, ForceModule, Gravity,
    UniformField,
};
pub use crate::physics::math::{Scalar, Vector};
pub use crate::physics::simulation::{Simulation, StepObserver};
