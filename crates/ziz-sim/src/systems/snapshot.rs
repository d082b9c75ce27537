//! Snapshot system: reads the world and builds a complete `SimSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use ziz_core::components::*;
use ziz_core::constants::APP_VERSION;
use ziz_core::enums::SimPhase;
use ziz_core::events::SimEvent;
use ziz_core::state::*;
use ziz_core::types::{GeoPoint, SimTime};

/// Running shot statistics kept by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub shots_fired: u32,
    pub hits: u32,
}

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    generation: u64,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> SimSnapshot {
    let (vehicle, trail) = build_vehicle(world);

    SimSnapshot {
        time: *time,
        phase,
        generation,
        version: APP_VERSION.to_string(),
        vehicle,
        trail,
        projectile: build_projectile(world),
        target: build_target(world),
        events,
        score: ScoreView {
            shots_fired: score.shots_fired,
            hits: score.hits,
        },
    }
}

/// Marker rotation from the velocity direction: `atan2(vy, vx)` in degrees,
/// offset by -90 so the marker's pointer faces along the velocity.
pub fn marker_rotation_deg(kin: &Kinematics) -> f64 {
    kin.velocity.y.atan2(kin.velocity.x).to_degrees() - 90.0
}

fn build_vehicle(world: &World) -> (VehicleView, Vec<GeoPoint>) {
    world
        .query::<(&Vehicle, &GeoPoint, &Kinematics, &Trail, &VehicleStyle)>()
        .iter()
        .next()
        .map(|(_, (_, pos, kin, trail, style))| {
            let view = VehicleView {
                position: *pos,
                heading_deg: kin.heading_deg,
                speed: kin.speed,
                marker_rotation_deg: marker_rotation_deg(kin),
                color: style.color,
                camera_locked: style.camera_locked,
                readout: SpeedReadout::from_speed(kin.speed),
            };
            (view, trail.points.clone())
        })
        .unwrap_or_default()
}

fn build_projectile(world: &World) -> Option<ProjectileView> {
    world
        .query::<(&GeoPoint, &Projectile)>()
        .iter()
        .next()
        .map(|(_, (pos, projectile))| ProjectileView {
            position: *pos,
            fired_at_tick: projectile.fired_at_tick,
        })
}

fn build_target(world: &World) -> TargetView {
    world
        .query::<(&Target, &GeoPoint, &TargetOrbit)>()
        .iter()
        .next()
        .map(|(_, (_, pos, orbit))| TargetView {
            position: *pos,
            alive: orbit.alive,
            orbit_radius: orbit.orbit_radius,
        })
        .unwrap_or_default()
}
