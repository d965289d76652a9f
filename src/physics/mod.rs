//! Physics core: bodies, force modules, boundary resolution, and stepping.

pub mod body;
pub mod boundary;
pub mod error;
pub mod forces;
pub mod math;
pub mod simulation;
