//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DT, MAX_LATITUDE, MAX_LONGITUDE};

/// Geographic coordinate in degrees.
/// `lng` plays the role of x (east), `lat` the role of y (north).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Handle to a scheduled event, used to cancel it before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventToken(pub u64);

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Planar distance in degrees.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// This point displaced by `delta` degrees.
    pub fn offset(&self, delta: DVec2) -> Self {
        Self::from_vec(self.as_vec() + delta)
    }

    /// Whether the point lies inside valid geographic bounds.
    pub fn in_bounds(&self) -> bool {
        self.lng.abs() <= MAX_LONGITUDE && self.lat.abs() <= MAX_LATITUDE
    }
}

/// Unit vector for a map bearing in degrees (0 = north, clockwise).
pub fn bearing_unit(heading_deg: f64) -> DVec2 {
    let rad = heading_deg.to_radians();
    DVec2::new(rad.sin(), rad.cos())
}

/// Normalise a bearing to `[0, 360)`.
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let h = heading_deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }

    /// Number of whole ticks covering `secs` (at least one).
    pub fn ticks_for(secs: f64) -> u64 {
        ((secs / DT).ceil() as u64).max(1)
    }
}
