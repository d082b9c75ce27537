//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GeoPoint;

/// Notable state transitions during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile left the vehicle.
    ProjectileFired { position: GeoPoint, heading_deg: f64 },
    /// Fire requested while a projectile was already in flight.
    FireRejected,
    /// Projectile struck the target.
    TargetHit { position: GeoPoint },
    /// Projectile left flight without a hit.
    ProjectileExpired { reason: ExpiryReason },
    /// Target came back after its respawn delay.
    TargetRespawned { position: GeoPoint },
    /// Trail emptied.
    TrailCleared,
    /// Marker color changed.
    ColorChanged { color: MarkerColor },
    /// Camera lock toggled.
    LockToggled { locked: bool },
    /// Position replaced by a road-snap result.
    RoadSnapped { position: GeoPoint },
    /// Simulation restored to its initial state.
    Reset,
}
