//! Projectile tracker: a single in-flight projectile that can hit the target,
//! leave geographic bounds, or time out.

use hecs::World;

use ziz_core::components::{Projectile, TargetOrbit};
use ziz_core::config::Tuning;
use ziz_core::enums::ExpiryReason;
use ziz_core::events::SimEvent;
use ziz_core::types::{bearing_unit, GeoPoint, SimTime};

use crate::scheduler::{EventQueue, ScheduledKind};
use crate::systems::target;

/// How a projectile's flight ended during `advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    Hit { position: GeoPoint },
    OutOfBounds,
}

/// Whether a projectile is in flight.
pub fn is_active(world: &World) -> bool {
    world.query::<&Projectile>().iter().next().is_some()
}

/// Fire from `origin` along `heading_deg`. Only one projectile may be in
/// flight; a second request is rejected and leaves the world untouched.
pub fn fire(
    world: &mut World,
    scheduler: &mut EventQueue,
    origin: GeoPoint,
    heading_deg: f64,
    now_tick: u64,
    tuning: &Tuning,
) -> Option<hecs::Entity> {
    if is_active(world) {
        log::warn!("fire rejected: projectile already in flight");
        return None;
    }

    let entity = world.reserve_entity();
    let expiry = scheduler.schedule(
        now_tick + SimTime::ticks_for(tuning.bullet_lifetime_secs),
        ScheduledKind::ProjectileExpiry { projectile: entity },
    );
    let projectile = Projectile {
        velocity: bearing_unit(heading_deg) * tuning.bullet_speed,
        fired_at_tick: now_tick,
        expiry,
    };
    if world.insert(entity, (origin, projectile)).is_err() {
        scheduler.cancel(expiry);
        return None;
    }

    log::debug!("projectile fired at {origin:?} heading {heading_deg:.1}");
    Some(entity)
}

/// Move the projectile one tick and test, in order: hit on a live target,
/// then geographic bounds. A terminated projectile is despawned, its expiry
/// cancelled, and the target killed on a hit.
pub fn advance(
    world: &mut World,
    scheduler: &mut EventQueue,
    target_entity: hecs::Entity,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) -> Option<Termination> {
    let target_pos = match world.query_one_mut::<(&GeoPoint, &TargetOrbit)>(target_entity) {
        Ok((pos, orbit)) if orbit.alive => Some(*pos),
        _ => None,
    };

    let mut terminated = None;
    for (entity, (pos, projectile)) in world.query_mut::<(&mut GeoPoint, &Projectile)>() {
        *pos = pos.offset(projectile.velocity);

        let termination = match target_pos {
            Some(t) if pos.distance_to(&t) < tuning.hit_threshold => {
                Termination::Hit { position: *pos }
            }
            _ if !pos.in_bounds() => Termination::OutOfBounds,
            _ => continue,
        };
        terminated = Some((entity, projectile.expiry, termination));
    }

    let (entity, expiry, termination) = terminated?;
    scheduler.cancel(expiry);
    let _ = world.despawn(entity);

    match termination {
        Termination::Hit { position } => {
            target::kill(world, target_entity);
            log::info!("target hit at {position:?}");
            events.push(SimEvent::TargetHit { position });
        }
        Termination::OutOfBounds => {
            log::debug!("projectile left geographic bounds");
            events.push(SimEvent::ProjectileExpired {
                reason: ExpiryReason::OutOfBounds,
            });
        }
    }
    Some(termination)
}

/// Timeout handler for a scheduled expiry. Returns false if the projectile
/// was already gone.
pub fn expire(world: &mut World, projectile: hecs::Entity, events: &mut Vec<SimEvent>) -> bool {
    if world.despawn(projectile).is_err() {
        return false;
    }
    log::debug!("projectile timed out");
    events.push(SimEvent::ProjectileExpired {
        reason: ExpiryReason::Timeout,
    });
    true
}
