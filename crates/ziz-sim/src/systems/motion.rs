//! Motion integrator.
//!
//! Turns held keys or a joystick vector into speed and heading changes,
//! then integrates position: `position += speed * (sin h, cos h) * scale`.
//! Every integrated position is appended to the vehicle trail.

use glam::DVec2;
use hecs::World;

use ziz_core::components::{Kinematics, Trail, Vehicle};
use ziz_core::config::{FrictionPolicy, Tuning};
use ziz_core::enums::{JoystickDirection, Key};
use ziz_core::types::{bearing_unit, normalize_heading, GeoPoint};

/// Drive keys currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub brake: bool,
    pub handbrake: bool,
}

impl HeldKeys {
    /// Record a key press or release. Returns false for keys that are
    /// actions rather than held drive controls.
    pub fn set(&mut self, key: Key, down: bool) -> bool {
        let slot = match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Accelerate => &mut self.accelerate,
            Key::Brake => &mut self.brake,
            Key::Handbrake => &mut self.handbrake,
            Key::Fire | Key::ToggleLock | Key::CycleColor | Key::ClearTrail => return false,
        };
        *slot = down;
        true
    }
}

/// Continuous joystick vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickInput {
    /// Deflection in `[0, 1]`.
    pub force: f64,
    pub direction: JoystickDirection,
}

/// Everything the integrator reads from the input layer in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    pub keys: HeldKeys,
    pub joystick: Option<JoystickInput>,
}

impl ControlInput {
    /// Whether any input is changing speed this tick.
    pub fn has_longitudinal(&self) -> bool {
        let joystick = matches!(
            self.joystick,
            Some(JoystickInput {
                direction: JoystickDirection::Up | JoystickDirection::Down,
                ..
            })
        );
        self.keys.accelerate || self.keys.brake || self.keys.handbrake || joystick
    }
}

/// Vehicle state read and written by one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position: GeoPoint,
    pub heading_deg: f64,
    pub speed: f64,
    pub velocity: DVec2,
}

/// Compute the next motion state. Pure; no world access.
pub fn evaluate(state: &MotionState, input: &ControlInput, tuning: &Tuning) -> MotionState {
    let mut speed = state.speed;
    let mut heading = state.heading_deg;

    let keys = &input.keys;
    if keys.accelerate {
        speed += tuning.acceleration;
    }
    if keys.brake {
        speed -= tuning.acceleration;
    }
    if keys.left {
        heading -= tuning.turn_step_deg;
    }
    if keys.right {
        heading += tuning.turn_step_deg;
    }

    if let Some(joy) = input.joystick {
        let force = joy.force.clamp(0.0, 1.0);
        match joy.direction {
            JoystickDirection::Up => speed += tuning.joystick_acceleration * force,
            JoystickDirection::Down => speed -= tuning.joystick_acceleration * force,
            JoystickDirection::Left => heading -= tuning.joystick_turn_deg * force,
            JoystickDirection::Right => heading += tuning.joystick_turn_deg * force,
        }
    }

    if keys.handbrake {
        speed = 0.0;
    }

    if !input.has_longitudinal() {
        if let FrictionPolicy::Enabled { factor } = tuning.friction {
            speed *= factor;
        }
    }

    let speed = speed.clamp(tuning.min_speed, tuning.max_speed);
    let heading_deg = normalize_heading(heading);
    let velocity = bearing_unit(heading_deg) * speed;
    let position = state.position.offset(velocity * tuning.position_scale);

    MotionState {
        position,
        heading_deg,
        speed,
        velocity,
    }
}

/// Integrate every vehicle one tick and extend its trail.
pub fn run(world: &mut World, input: &ControlInput, tuning: &Tuning) {
    for (_entity, (_vehicle, pos, kin, trail)) in
        world.query_mut::<(&Vehicle, &mut GeoPoint, &mut Kinematics, &mut Trail)>()
    {
        let next = evaluate(
            &MotionState {
                position: *pos,
                heading_deg: kin.heading_deg,
                speed: kin.speed,
                velocity: kin.velocity,
            },
            input,
            tuning,
        );

        *pos = next.position;
        kin.heading_deg = next.heading_deg;
        kin.speed = next.speed;
        kin.velocity = next.velocity;
        trail.points.push(next.position);
    }
}

/// One-shot speed decay when the joystick is let go. Applies regardless of
/// the friction policy.
pub fn release_joystick(world: &mut World, tuning: &Tuning) {
    for (_entity, (_vehicle, kin)) in world.query_mut::<(&Vehicle, &mut Kinematics)>() {
        kin.speed *= tuning.joystick_release_decay;
        kin.velocity = bearing_unit(kin.heading_deg) * kin.speed;
    }
}
