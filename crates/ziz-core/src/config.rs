//! Tuning parameters for a simulation run.
//!
//! Every field defaults to the matching constant, so a partial JSON
//! document only needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::GeoPoint;

/// How speed behaves on ticks without longitudinal input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrictionPolicy {
    /// Multiply speed by `factor` (in `(0, 1]`) each idle tick.
    Enabled { factor: f64 },
    /// Keep speed unchanged (cruise).
    Disabled,
}

impl Default for FrictionPolicy {
    fn default() -> Self {
        FrictionPolicy::Enabled {
            factor: FRICTION_FACTOR,
        }
    }
}

/// All tunable parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub initial_position: GeoPoint,
    pub acceleration: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub turn_step_deg: f64,
    pub position_scale: f64,
    pub friction: FrictionPolicy,
    pub joystick_acceleration: f64,
    pub joystick_turn_deg: f64,
    pub joystick_release_decay: f64,

    pub bullet_speed: f64,
    pub bullet_lifetime_secs: f64,
    pub hit_threshold: f64,

    pub target_base_radius: f64,
    pub target_radius_mod_depth: f64,
    pub target_radius_mod_freq: f64,
    pub target_angular_speed_base: f64,
    pub target_angular_speed_amp: f64,
    pub target_angular_mod_freq: f64,
    pub target_respawn_delay_secs: f64,
    pub target_respawn_min_offset: f64,
    pub target_respawn_max_offset: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_position: INITIAL_POSITION,
            acceleration: ACCELERATION,
            max_speed: MAX_SPEED,
            min_speed: MIN_SPEED,
            turn_step_deg: TURN_STEP_DEG,
            position_scale: POSITION_SCALE,
            friction: FrictionPolicy::default(),
            joystick_acceleration: JOYSTICK_ACCELERATION,
            joystick_turn_deg: JOYSTICK_TURN_DEG,
            joystick_release_decay: JOYSTICK_RELEASE_DECAY,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime_secs: BULLET_LIFETIME_SECS,
            hit_threshold: HIT_THRESHOLD,
            target_base_radius: TARGET_BASE_RADIUS,
            target_radius_mod_depth: TARGET_RADIUS_MOD_DEPTH,
            target_radius_mod_freq: TARGET_RADIUS_MOD_FREQ,
            target_angular_speed_base: TARGET_ANGULAR_SPEED_BASE,
            target_angular_speed_amp: TARGET_ANGULAR_SPEED_AMP,
            target_angular_mod_freq: TARGET_ANGULAR_MOD_FREQ,
            target_respawn_delay_secs: TARGET_RESPAWN_DELAY_SECS,
            target_respawn_min_offset: TARGET_RESPAWN_MIN_OFFSET,
            target_respawn_max_offset: TARGET_RESPAWN_MAX_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check value ranges. Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_speed > self.max_speed {
            return Err(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            ));
        }
        if let FrictionPolicy::Enabled { factor } = self.friction {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(format!("friction factor {factor} outside (0, 1]"));
            }
        }
        if !(0.0..=1.0).contains(&self.joystick_release_decay) {
            return Err(format!(
                "joystick_release_decay {} outside [0, 1]",
                self.joystick_release_decay
            ));
        }
        if self.bullet_speed <= 0.0 || self.hit_threshold <= 0.0 {
            return Err("bullet_speed and hit_threshold must be positive".into());
        }
        if self.target_respawn_min_offset > self.target_respawn_max_offset {
            return Err("target_respawn_min_offset exceeds target_respawn_max_offset".into());
        }
        Ok(())
    }
}
