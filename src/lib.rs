//! dustbox library
//!
//! Core 2D n-body physics: composable force modules, a rectangular
//! reflecting or periodic boundary, and an adaptive-step simulation loop.
//! Scenario construction and telemetry live at the edges and only produce
//! or observe body state.

pub mod cli;
pub mod config;
pub mod physics;
pub mod prelude;
pub mod resources;
pub mod scenario;
