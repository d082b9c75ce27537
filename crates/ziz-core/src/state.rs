//! Simulation state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{GeoPoint, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Bumped by every reset. Road-snap requests echo it back so results
    /// from an earlier run can be told apart.
    pub generation: u64,
    pub version: String,
    pub vehicle: VehicleView,
    pub trail: Vec<GeoPoint>,
    pub projectile: Option<ProjectileView>,
    pub target: TargetView,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// Vehicle marker and readout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleView {
    pub position: GeoPoint,
    /// Map bearing (degrees).
    pub heading_deg: f64,
    pub speed: f64,
    /// Marker rotation derived from the velocity direction (degrees).
    pub marker_rotation_deg: f64,
    pub color: MarkerColor,
    pub camera_locked: bool,
    pub readout: SpeedReadout,
}

/// Speed in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedReadout {
    pub raw: f64,
    pub meters_per_second: f64,
    pub mph: f64,
    pub kph: f64,
}

impl SpeedReadout {
    pub fn from_speed(speed: f64) -> Self {
        let meters_per_second = speed * METERS_PER_SECOND_PER_UNIT;
        Self {
            raw: speed,
            meters_per_second,
            mph: meters_per_second * MPS_TO_MPH,
            kph: meters_per_second * MPS_TO_KPH,
        }
    }
}

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: GeoPoint,
    pub fired_at_tick: u64,
}

/// Target marker. A dead target has no marker to draw.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetView {
    pub position: GeoPoint,
    pub alive: bool,
    pub orbit_radius: f64,
}

/// Running shot statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub shots_fired: u32,
    pub hits: u32,
}
