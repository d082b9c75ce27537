//! Simulation engine for ZiZ.
//!
//! Owns the hecs ECS world, runs the motion, target and projectile systems
//! at a fixed tick rate, and produces `SimSnapshot`s for the host.

pub mod engine;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use ziz_core as core;

#[cfg(test)]
mod tests;
