//! Simulation constants and default tuning parameters.

use crate::types::GeoPoint;

/// Application version shown on the overlay.
pub const APP_VERSION: &str = "1.31";

/// Simulation tick rate (Hz). The drive loop runs every 100 ms.
pub const TICK_RATE: u32 = 10;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Vehicle ---

/// Starting position of the vehicle (longitude, latitude): Las Vegas.
pub const INITIAL_POSITION: GeoPoint = GeoPoint {
    lng: -115.1398,
    lat: 36.1699,
};

/// Speed change per tick while accelerating or braking.
pub const ACCELERATION: f64 = 0.05;

/// Maximum forward speed.
pub const MAX_SPEED: f64 = 200.0;

/// Minimum speed (reverse).
pub const MIN_SPEED: f64 = -2.0;

/// Heading change per tick of a turn input (degrees).
pub const TURN_STEP_DEG: f64 = 5.0;

/// Degrees of longitude/latitude moved per unit of velocity per tick.
pub const POSITION_SCALE: f64 = 0.0001;

/// Multiplicative speed decay per idle tick when friction is enabled.
pub const FRICTION_FACTOR: f64 = 0.98;

/// Speed change per tick at full joystick deflection.
pub const JOYSTICK_ACCELERATION: f64 = 0.1;

/// Heading change per tick at full joystick deflection (degrees).
pub const JOYSTICK_TURN_DEG: f64 = 3.0;

/// One-shot speed multiplier applied when the joystick is released.
pub const JOYSTICK_RELEASE_DECAY: f64 = 0.9;

// --- Projectile ---

/// Projectile travel per tick (degrees).
pub const BULLET_SPEED: f64 = 0.00015;

/// Projectile lifetime before timeout expiry (seconds).
pub const BULLET_LIFETIME_SECS: f64 = 3.0;

/// Distance below which a projectile hits the target (degrees).
pub const HIT_THRESHOLD: f64 = 0.00009;

/// Valid longitude magnitude.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Valid latitude magnitude.
pub const MAX_LATITUDE: f64 = 90.0;

// --- Target ---

/// Orbit radius of the initial target (degrees).
pub const TARGET_BASE_RADIUS: f64 = 0.0015;

/// Relative depth of the orbit radius modulation (0.3 = +/-30%).
pub const TARGET_RADIUS_MOD_DEPTH: f64 = 0.3;

/// Angular frequency of the orbit radius modulation (rad/s).
pub const TARGET_RADIUS_MOD_FREQ: f64 = 0.5;

/// Mean angular speed of the target (radians per tick).
pub const TARGET_ANGULAR_SPEED_BASE: f64 = 0.05;

/// Amplitude of the angular speed modulation (radians per tick).
pub const TARGET_ANGULAR_SPEED_AMP: f64 = 0.02;

/// Angular frequency of the angular speed modulation (rad/s).
pub const TARGET_ANGULAR_MOD_FREQ: f64 = 0.3;

/// Delay between a hit and the target respawning (seconds).
pub const TARGET_RESPAWN_DELAY_SECS: f64 = 2.0;

/// Respawn distance range from the vehicle (degrees).
pub const TARGET_RESPAWN_MIN_OFFSET: f64 = 0.0005;
pub const TARGET_RESPAWN_MAX_OFFSET: f64 = 0.002;

// --- Display ---

/// Meters per second represented by one unit of speed.
pub const METERS_PER_SECOND_PER_UNIT: f64 = 50.0;

/// 1 m/s in miles per hour.
pub const MPS_TO_MPH: f64 = 2.23694;

/// 1 m/s in kilometers per hour.
pub const MPS_TO_KPH: f64 = 3.6;
