//! Entity spawn factories for setting up the simulation world.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ziz_core::components::*;
use ziz_core::config::Tuning;
use ziz_core::enums::MarkerColor;
use ziz_core::types::GeoPoint;

/// Spawn the vehicle at the configured start position, facing north at rest.
/// The marker color is drawn from the palette with `rng`.
pub fn spawn_vehicle(world: &mut World, rng: &mut ChaCha8Rng, tuning: &Tuning) -> hecs::Entity {
    let color = MarkerColor::from_index(rng.gen_range(0..MarkerColor::ALL.len()));

    world.spawn((
        Vehicle,
        tuning.initial_position,
        Kinematics::default(),
        Trail::default(),
        VehicleStyle {
            color,
            camera_locked: true,
        },
    ))
}

/// Spawn the target on its base orbit due north of `center`.
pub fn spawn_target(world: &mut World, center: GeoPoint, tuning: &Tuning) -> hecs::Entity {
    let orbit = TargetOrbit {
        angle: 0.0,
        base_radius: tuning.target_base_radius,
        orbit_radius: tuning.target_base_radius,
        angular_speed: tuning.target_angular_speed_base,
        phase_origin_secs: 0.0,
        alive: true,
    };
    let position = center.offset(DVec2::new(0.0, orbit.orbit_radius));

    world.spawn((Target, position, orbit))
}
