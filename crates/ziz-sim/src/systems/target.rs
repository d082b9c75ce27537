//! Target oscillator: orbits the target around the vehicle on a circle
//! whose radius and angular speed are modulated sinusoidally over time.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ziz_core::components::{Target, TargetOrbit};
use ziz_core::config::Tuning;
use ziz_core::types::GeoPoint;

/// Orbit radius and angular speed at `t` seconds into the modulation.
pub fn modulation(orbit: &TargetOrbit, t: f64, tuning: &Tuning) -> (f64, f64) {
    let radius = orbit.base_radius
        * (1.0 + tuning.target_radius_mod_depth * (tuning.target_radius_mod_freq * t).sin());
    let angular_speed = tuning.target_angular_speed_base
        + tuning.target_angular_speed_amp * (tuning.target_angular_mod_freq * t).sin();
    (radius, angular_speed)
}

/// Point on the orbit of `radius` at `angle` (0 = north, clockwise).
pub fn orbit_point(center: GeoPoint, angle: f64, radius: f64) -> GeoPoint {
    center.offset(DVec2::new(angle.sin(), angle.cos()) * radius)
}

/// Advance every live target around `center`. Dead targets do not move.
pub fn run(world: &mut World, center: GeoPoint, elapsed_secs: f64, tuning: &Tuning) {
    for (_entity, (_target, pos, orbit)) in
        world.query_mut::<(&Target, &mut GeoPoint, &mut TargetOrbit)>()
    {
        if !orbit.alive {
            continue;
        }

        let (radius, angular_speed) =
            modulation(orbit, elapsed_secs - orbit.phase_origin_secs, tuning);
        orbit.orbit_radius = radius;
        orbit.angular_speed = angular_speed;
        orbit.angle = (orbit.angle + angular_speed).rem_euclid(std::f64::consts::TAU);
        *pos = orbit_point(center, orbit.angle, radius);
    }
}

/// Mark the target dead. Returns false if it was already dead or missing.
pub fn kill(world: &mut World, target: hecs::Entity) -> bool {
    match world.get::<&mut TargetOrbit>(target) {
        Ok(mut orbit) if orbit.alive => {
            orbit.alive = false;
            true
        }
        _ => false,
    }
}

/// Bring the target back at a random offset from `center` and restart its
/// modulation phase so the orbit continues smoothly from there.
pub fn respawn(
    world: &mut World,
    target: hecs::Entity,
    center: GeoPoint,
    rng: &mut ChaCha8Rng,
    elapsed_secs: f64,
    tuning: &Tuning,
) -> Option<GeoPoint> {
    let radius = if tuning.target_respawn_max_offset > tuning.target_respawn_min_offset {
        rng.gen_range(tuning.target_respawn_min_offset..=tuning.target_respawn_max_offset)
    } else {
        tuning.target_respawn_min_offset
    };
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let position = orbit_point(center, angle, radius);

    let (pos, orbit) = world
        .query_one_mut::<(&mut GeoPoint, &mut TargetOrbit)>(target)
        .ok()?;
    *pos = position;
    *orbit = TargetOrbit {
        angle,
        base_radius: radius,
        orbit_radius: radius,
        angular_speed: tuning.target_angular_speed_base,
        phase_origin_secs: elapsed_secs,
        alive: true,
    };
    Some(position)
}
