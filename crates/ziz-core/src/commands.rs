//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GeoPoint;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Keyboard ---
    /// A key was pressed. Drive keys stay held until `KeyUp`;
    /// action keys trigger once.
    KeyDown { key: Key },
    /// A held key was released.
    KeyUp { key: Key },

    // --- Joystick ---
    /// Continuous joystick input, `force` in `[0, 1]`.
    Joystick {
        force: f64,
        direction: JoystickDirection,
    },
    /// Joystick released.
    JoystickRelease,

    // --- Actions ---
    /// Fire a projectile along the current heading.
    Fire,
    /// Toggle camera lock on the vehicle.
    ToggleLock,
    /// Switch the vehicle marker to the next palette color.
    CycleColor,
    /// Clear the vehicle trail.
    ClearTrail,

    // --- External ---
    /// Road-snapped position from the routing service.
    SnapToRoad {
        position: GeoPoint,
        /// Tick at which the snap request was issued.
        requested_tick: u64,
        /// Reset generation the request was issued in.
        #[serde(default)]
        generation: u64,
    },

    // --- Simulation control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Restore the initial state and cancel pending events.
    Reset,
}
