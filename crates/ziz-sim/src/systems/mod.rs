//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are functions over `&mut World` plus the inputs they need.
//! They do not own state; all state lives in components or the engine.

pub mod motion;
pub mod projectile;
pub mod snapshot;
pub mod target;
