//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::MarkerColor;
use crate::types::{EventToken, GeoPoint};

/// Marks the player's vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vehicle;

/// Marks the decorative target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target;

/// Heading and speed of the vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Bearing in degrees, `[0, 360)`, 0 = north.
    pub heading_deg: f64,
    /// Signed speed, clamped to the configured bounds.
    pub speed: f64,
    /// Velocity derived on the last tick (x = east, y = north).
    pub velocity: DVec2,
}

/// Ordered history of vehicle positions, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    pub points: Vec<GeoPoint>,
}

/// Presentation-only vehicle attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleStyle {
    pub color: MarkerColor,
    /// Whether the camera follows the vehicle.
    pub camera_locked: bool,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Displacement per tick in degrees.
    pub velocity: DVec2,
    pub fired_at_tick: u64,
    /// Pending timeout expiry, cancelled on hit or out-of-bounds.
    pub expiry: EventToken,
}

/// Orbit state of the target around the vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetOrbit {
    /// Angle on the orbit (radians, 0 = north, clockwise).
    pub angle: f64,
    /// Unmodulated orbit radius (degrees).
    pub base_radius: f64,
    /// Current orbit radius (degrees).
    pub orbit_radius: f64,
    /// Current angular speed (radians per tick).
    pub angular_speed: f64,
    /// Elapsed seconds at which the modulation phase starts.
    pub phase_origin_secs: f64,
    pub alive: bool,
}
