//! Tests for the simulation engine, scheduler and systems.

use approx::assert_relative_eq;
use hecs::World;
use test_log::test;

use ziz_core::commands::PlayerCommand;
use ziz_core::config::{FrictionPolicy, Tuning};
use ziz_core::constants::*;
use ziz_core::enums::*;
use ziz_core::events::SimEvent;
use ziz_core::types::GeoPoint;

use crate::engine::{SimConfig, SimulationEngine};
use crate::scheduler::{EventQueue, ScheduledKind};
use crate::systems::motion::{self, ControlInput, HeldKeys, JoystickInput, MotionState};
use crate::systems::projectile::{self, Termination};
use crate::world_setup;

fn engine_with(tuning: Tuning) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        tuning,
        ..Default::default()
    })
}

/// Target parked due north of the vehicle at the base radius.
fn stationary_target_tuning() -> Tuning {
    Tuning {
        target_angular_speed_base: 0.0,
        target_angular_speed_amp: 0.0,
        target_radius_mod_depth: 0.0,
        ..Default::default()
    }
}

fn has_event(events: &[SimEvent], pred: impl Fn(&SimEvent) -> bool) -> bool {
    events.iter().any(pred)
}

/// Fire at the parked target and tick until the hit. Returns the tick count.
fn fire_until_hit(engine: &mut SimulationEngine) -> usize {
    engine.queue_command(PlayerCommand::Fire);
    for n in 1..=100 {
        let snap = engine.tick();
        if has_event(&snap.events, |e| matches!(e, SimEvent::TargetHit { .. })) {
            return n;
        }
    }
    panic!("projectile never hit the target");
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    let script = [
        PlayerCommand::KeyDown {
            key: Key::Accelerate,
        },
        PlayerCommand::KeyDown { key: Key::Left },
        PlayerCommand::Fire,
    ];
    engine_a.queue_commands(script.clone());
    engine_b.queue_commands(script);

    for _ in 0..200 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

// ---- Motion ----

#[test]
fn test_accelerate_from_rest_moves_north() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });

    let start = engine.vehicle_position();
    assert_eq!(start, GeoPoint::new(-115.1398, 36.1699));

    let mut prev_lat = start.lat;
    for n in 1..=50u32 {
        let snap = engine.tick();
        let expected = (n as f64 * ACCELERATION).min(MAX_SPEED);
        assert_relative_eq!(snap.vehicle.speed, expected, epsilon = 1e-9);
        assert_eq!(snap.vehicle.position.lng, start.lng, "heading 0 must not drift east/west");
        assert!(
            snap.vehicle.position.lat > prev_lat,
            "latitude should increase monotonically at tick {n}"
        );
        prev_lat = snap.vehicle.position.lat;
    }
}

#[test]
fn test_speed_stays_within_bounds() {
    let mut engine = SimulationEngine::new(SimConfig::default());

    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    for _ in 0..4500 {
        let speed = engine.tick().vehicle.speed;
        assert!((MIN_SPEED..=MAX_SPEED).contains(&speed), "speed {speed} out of bounds");
    }
    assert_relative_eq!(engine.vehicle_kinematics().speed, MAX_SPEED);

    engine.queue_commands([
        PlayerCommand::KeyUp {
            key: Key::Accelerate,
        },
        PlayerCommand::KeyDown { key: Key::Brake },
    ]);
    for _ in 0..4500 {
        let speed = engine.tick().vehicle.speed;
        assert!((MIN_SPEED..=MAX_SPEED).contains(&speed), "speed {speed} out of bounds");
    }
    assert_relative_eq!(engine.vehicle_kinematics().speed, MIN_SPEED);
}

#[test]
fn test_friction_never_increases_idle_speed() {
    for start_speed in [12.0, -1.5] {
        let tuning = Tuning::default();
        let mut state = MotionState {
            position: INITIAL_POSITION,
            heading_deg: 45.0,
            speed: start_speed,
            velocity: glam::DVec2::ZERO,
        };
        let idle = ControlInput::default();
        for _ in 0..200 {
            let next = motion::evaluate(&state, &idle, &tuning);
            assert!(
                next.speed.abs() < state.speed.abs(),
                "idle speed grew from {} to {}",
                state.speed,
                next.speed
            );
            state = next;
        }
    }
}

#[test]
fn test_friction_disabled_cruises() {
    let tuning = Tuning {
        friction: FrictionPolicy::Disabled,
        ..Default::default()
    };
    let mut engine = engine_with(tuning);
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    for _ in 0..20 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::KeyUp {
        key: Key::Accelerate,
    });
    let cruising = engine.tick().vehicle.speed;
    for _ in 0..20 {
        assert_relative_eq!(engine.tick().vehicle.speed, cruising);
    }
}

#[test]
fn test_turning_wraps_heading() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown { key: Key::Left });
    let snap = engine.tick();
    assert_relative_eq!(snap.vehicle.heading_deg, 360.0 - TURN_STEP_DEG);

    engine.queue_commands([
        PlayerCommand::KeyUp { key: Key::Left },
        PlayerCommand::KeyDown { key: Key::Right },
    ]);
    engine.tick();
    let snap = engine.tick();
    assert_relative_eq!(snap.vehicle.heading_deg, TURN_STEP_DEG);
}

#[test]
fn test_heading_east_moves_east() {
    let tuning = Tuning::default();
    let state = MotionState {
        position: GeoPoint::new(0.0, 0.0),
        heading_deg: 90.0,
        speed: 10.0,
        velocity: glam::DVec2::ZERO,
    };
    let input = ControlInput {
        keys: HeldKeys {
            accelerate: true,
            ..Default::default()
        },
        joystick: None,
    };
    let next = motion::evaluate(&state, &input, &tuning);
    assert_relative_eq!(next.speed, 10.05);
    assert_relative_eq!(next.position.lng, 10.05 * POSITION_SCALE, epsilon = 1e-12);
    assert_relative_eq!(next.position.lat, 0.0, epsilon = 1e-12);
}

#[test]
fn test_handbrake_stops() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    for _ in 0..10 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Handbrake,
    });
    let snap = engine.tick();
    assert_eq!(snap.vehicle.speed, 0.0);
    assert_eq!(snap.vehicle.readout.mph, 0.0);
}

#[test]
fn test_joystick_scales_by_force() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Joystick {
        force: 0.5,
        direction: JoystickDirection::Up,
    });
    let snap = engine.tick();
    assert_relative_eq!(snap.vehicle.speed, JOYSTICK_ACCELERATION * 0.5);

    engine.queue_command(PlayerCommand::Joystick {
        force: 2.0,
        direction: JoystickDirection::Right,
    });
    let snap = engine.tick();
    // Force is clamped to 1.0.
    assert_relative_eq!(snap.vehicle.heading_deg, JOYSTICK_TURN_DEG);

    engine.queue_command(PlayerCommand::JoystickRelease);
    engine.tick();
    assert_eq!(engine.input().joystick, None);
}

#[test]
fn test_joystick_release_decays_speed_once() {
    let mut engine = engine_with(Tuning {
        friction: FrictionPolicy::Disabled,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Joystick {
        force: 1.0,
        direction: JoystickDirection::Up,
    });
    let snap = engine.tick();
    assert_relative_eq!(snap.vehicle.speed, JOYSTICK_ACCELERATION);

    engine.queue_command(PlayerCommand::JoystickRelease);
    let snap = engine.tick();
    assert_relative_eq!(
        snap.vehicle.speed,
        JOYSTICK_ACCELERATION * JOYSTICK_RELEASE_DECAY
    );

    // Releasing an idle joystick does nothing.
    engine.queue_command(PlayerCommand::JoystickRelease);
    let snap = engine.tick();
    assert_relative_eq!(
        snap.vehicle.speed,
        JOYSTICK_ACCELERATION * JOYSTICK_RELEASE_DECAY
    );
}

#[test]
fn test_non_finite_joystick_force_is_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let start = engine.vehicle_position();
    for force in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        engine.queue_command(PlayerCommand::Joystick {
            force,
            direction: JoystickDirection::Up,
        });
        let snap = engine.tick();
        assert_eq!(snap.vehicle.speed, 0.0);
        assert!(
            snap.vehicle.position.lng.is_finite() && snap.vehicle.position.lat.is_finite()
        );
        assert_eq!(engine.input().joystick, None);
    }
    assert_eq!(engine.vehicle_position(), start);
}

#[test]
fn test_try_new_rejects_invalid_tuning() {
    let result = SimulationEngine::try_new(SimConfig {
        tuning: Tuning {
            min_speed: 10.0,
            max_speed: 5.0,
            ..Default::default()
        },
        ..Default::default()
    });
    assert!(result.is_err());
    assert!(SimulationEngine::try_new(SimConfig::default()).is_ok());
}

#[test]
fn test_joystick_steering_alone_applies_friction() {
    let input = ControlInput {
        keys: HeldKeys::default(),
        joystick: Some(JoystickInput {
            force: 1.0,
            direction: JoystickDirection::Left,
        }),
    };
    assert!(!input.has_longitudinal());
}

// ---- Trail ----

#[test]
fn test_clear_trail_then_tick_leaves_one_point() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    for _ in 0..15 {
        engine.tick();
    }
    assert_eq!(engine.trail().len(), 15);

    engine.queue_command(PlayerCommand::ClearTrail);
    let snap = engine.tick();
    assert_eq!(snap.trail.len(), 1);
    assert_eq!(snap.trail[0], snap.vehicle.position);
    assert!(has_event(&snap.events, |e| *e == SimEvent::TrailCleared));
}

#[test]
fn test_clear_trail_key_is_an_action() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..3 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::ClearTrail,
    });
    assert_eq!(engine.tick().trail.len(), 1);
    // Action keys are not held: the next tick grows the trail again.
    assert_eq!(engine.tick().trail.len(), 2);
}

// ---- Projectile ----

#[test]
fn test_fire_while_active_is_rejected() {
    let mut engine = engine_with(Tuning {
        target_base_radius: 1.0,
        ..stationary_target_tuning()
    });
    engine.queue_command(PlayerCommand::Fire);
    let first = engine.tick();
    let fired = first.projectile.expect("projectile should be in flight");
    assert_eq!(first.score.shots_fired, 1);

    engine.queue_command(PlayerCommand::Fire);
    let second = engine.tick();
    assert!(has_event(&second.events, |e| *e == SimEvent::FireRejected));
    assert_eq!(second.score.shots_fired, 1);
    let count = engine
        .world()
        .query::<&ziz_core::components::Projectile>()
        .iter()
        .count();
    assert_eq!(count, 1);
    assert_eq!(
        second.projectile.map(|p| p.fired_at_tick),
        Some(fired.fired_at_tick)
    );
}

#[test]
fn test_hit_on_stationary_target() {
    let mut engine = engine_with(stationary_target_tuning());
    let vehicle = engine.vehicle_position();
    let target = engine.target_position();
    let distance = vehicle.distance_to(&target);
    assert!(distance > HIT_THRESHOLD);
    let max_ticks = (distance / BULLET_SPEED).ceil() as usize;

    engine.queue_command(PlayerCommand::Fire);
    let mut prev = f64::INFINITY;
    let mut hit_at = None;
    for n in 1..=max_ticks {
        let snap = engine.tick();
        if has_event(&snap.events, |e| matches!(e, SimEvent::TargetHit { .. })) {
            hit_at = Some(n);
            assert!(snap.projectile.is_none());
            assert!(!snap.target.alive, "target dies in the hit tick");
            assert_eq!(snap.score.hits, 1);
            break;
        }
        let bullet = snap.projectile.expect("projectile in flight").position;
        let d = bullet.distance_to(&snap.target.position);
        assert!(d < prev, "distance should strictly decrease");
        prev = d;
    }
    assert!(hit_at.is_some(), "expected a hit within {max_ticks} ticks");
}

#[test]
fn test_hit_on_timeout_tick_cancels_expiry() {
    let hit_tick = fire_until_hit(&mut engine_with(stationary_target_tuning()));
    // Flight that ends on the same tick the expiry comes due. The fire tick is
    // tick 0 of the flight, so the hit lands at simulation tick `hit_tick - 1`.
    let lifetime_secs = (hit_tick as f64 - 1.5) * DT;
    let tuning = Tuning {
        bullet_lifetime_secs: lifetime_secs,
        ..stationary_target_tuning()
    };
    assert_eq!(
        ziz_core::types::SimTime::ticks_for(lifetime_secs),
        hit_tick as u64 - 1
    );

    let mut engine = engine_with(tuning);
    engine.queue_command(PlayerCommand::Fire);
    let mut outcomes = Vec::new();
    for n in 1..=hit_tick + 10 {
        let snap = engine.tick();
        for event in snap.events {
            match event {
                SimEvent::ProjectileExpired { reason } => outcomes.push((n, Some(reason))),
                SimEvent::TargetHit { .. } => outcomes.push((n, None)),
                _ => {}
            }
        }
        if n == hit_tick {
            assert_eq!(engine.scheduler().len(), 1, "only the respawn stays pending");
        }
    }
    assert_eq!(outcomes, vec![(hit_tick, None)]);
}

#[test]
fn test_target_respawns_after_delay() {
    let tuning = stationary_target_tuning();
    let delay_ticks = ziz_core::types::SimTime::ticks_for(tuning.target_respawn_delay_secs);
    let mut engine = engine_with(tuning.clone());
    fire_until_hit(&mut engine);

    for n in 1..=delay_ticks {
        let snap = engine.tick();
        if n < delay_ticks {
            assert!(!snap.target.alive, "target should stay dead at tick {n}");
            continue;
        }
        assert!(snap.target.alive);
        let respawned = snap.events.iter().find_map(|e| match e {
            SimEvent::TargetRespawned { position } => Some(*position),
            _ => None,
        });
        let position = respawned.expect("respawn event");
        let offset = position.distance_to(&snap.vehicle.position);
        assert!(
            offset >= tuning.target_respawn_min_offset - 1e-12
                && offset <= tuning.target_respawn_max_offset + 1e-12,
            "respawn offset {offset} outside configured range"
        );
    }
}

#[test]
fn test_timeout_expiry_is_the_only_outcome() {
    let mut engine = engine_with(Tuning {
        target_base_radius: 1.0,
        ..stationary_target_tuning()
    });
    let lifetime_ticks = ziz_core::types::SimTime::ticks_for(BULLET_LIFETIME_SECS) as usize;

    engine.queue_command(PlayerCommand::Fire);
    let mut outcomes = Vec::new();
    for n in 0..lifetime_ticks + 10 {
        let snap = engine.tick();
        for event in snap.events {
            match event {
                SimEvent::ProjectileExpired { reason } => outcomes.push((n, Some(reason))),
                SimEvent::TargetHit { .. } => outcomes.push((n, None)),
                _ => {}
            }
        }
    }
    assert_eq!(outcomes, vec![(lifetime_ticks, Some(ExpiryReason::Timeout))]);
    assert!(!engine.projectile_active());
    assert!(engine.scheduler().is_empty());
}

#[test]
fn test_out_of_bounds_expiry() {
    let mut world = World::new();
    let mut scheduler = EventQueue::new();
    let tuning = Tuning::default();
    let target = world_setup::spawn_target(&mut world, GeoPoint::new(0.0, 0.0), &tuning);

    projectile::fire(
        &mut world,
        &mut scheduler,
        GeoPoint::new(179.99995, 0.0),
        90.0,
        0,
        &tuning,
    )
    .expect("fire");
    assert_eq!(scheduler.len(), 1);

    let mut events = Vec::new();
    let termination = projectile::advance(&mut world, &mut scheduler, target, &tuning, &mut events);
    assert_eq!(termination, Some(Termination::OutOfBounds));
    assert_eq!(
        events,
        vec![SimEvent::ProjectileExpired {
            reason: ExpiryReason::OutOfBounds
        }]
    );
    assert!(!projectile::is_active(&world));
    assert!(scheduler.is_empty(), "expiry should be cancelled");
}

#[test]
fn test_hit_wins_over_out_of_bounds() {
    let mut world = World::new();
    let mut scheduler = EventQueue::new();
    let tuning = Tuning::default();
    // Target sits just past the antimeridian; the shot crosses it and lands on it.
    let center = GeoPoint::new(MAX_LONGITUDE + 0.00005, 0.0);
    let target = world_setup::spawn_target(&mut world, center, &tuning);
    let origin = GeoPoint::new(MAX_LONGITUDE - 0.0001, tuning.target_base_radius);

    projectile::fire(&mut world, &mut scheduler, origin, 90.0, 0, &tuning).expect("fire");
    let mut events = Vec::new();
    let termination = projectile::advance(&mut world, &mut scheduler, target, &tuning, &mut events);

    match termination {
        Some(Termination::Hit { position }) => assert!(!position.in_bounds()),
        other => panic!("expected a hit, got {other:?}"),
    }
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], SimEvent::TargetHit { .. }));
    assert!(!projectile::is_active(&world));
    assert!(scheduler.is_empty(), "expiry should be cancelled");
}

#[test]
fn test_dead_target_cannot_be_hit() {
    let mut world = World::new();
    let mut scheduler = EventQueue::new();
    let tuning = Tuning::default();
    let target = world_setup::spawn_target(&mut world, GeoPoint::new(0.0, 0.0), &tuning);
    crate::systems::target::kill(&mut world, target);

    // Fired from the target's own position.
    let at = GeoPoint::new(0.0, tuning.target_base_radius);
    projectile::fire(&mut world, &mut scheduler, at, 0.0, 0, &tuning).expect("fire");
    let mut events = Vec::new();
    let termination = projectile::advance(&mut world, &mut scheduler, target, &tuning, &mut events);
    assert_eq!(termination, None);
    assert!(projectile::is_active(&world));
}

// ---- Target ----

#[test]
fn test_target_orbits_vehicle_smoothly() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    let tuning = engine.tuning().clone();
    let min_r = tuning.target_base_radius * (1.0 - tuning.target_radius_mod_depth);
    let max_r = tuning.target_base_radius * (1.0 + tuning.target_radius_mod_depth);
    let max_step = tuning.target_base_radius
        * tuning.target_radius_mod_depth
        * tuning.target_radius_mod_freq
        * DT;

    let mut prev_radius = None;
    for _ in 0..200 {
        let snap = engine.tick();
        let r = snap.target.orbit_radius;
        assert!(r >= min_r - 1e-12 && r <= max_r + 1e-12);
        assert_relative_eq!(
            snap.target.position.distance_to(&snap.vehicle.position),
            r,
            epsilon = 1e-9
        );
        if let Some(prev) = prev_radius {
            let step: f64 = r - prev;
            assert!(step.abs() <= max_step + 1e-12, "radius jumped by {step}");
        }
        prev_radius = Some(r);
    }
}

// ---- Scheduler ----

#[test]
fn test_scheduler_orders_and_cancels() {
    let mut queue = EventQueue::new();
    let late = queue.schedule(10, ScheduledKind::TargetRespawn);
    let early = queue.schedule(5, ScheduledKind::TargetRespawn);
    let cancelled = queue.schedule(5, ScheduledKind::TargetRespawn);

    assert!(queue.cancel(cancelled));
    assert!(!queue.cancel(cancelled));
    assert!(queue.drain_due(4).is_empty());

    let due = queue.drain_due(7);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].token, early);
    assert!(queue.is_pending(late));
    assert!(!queue.cancel(early), "fired events cannot be cancelled");

    let due = queue.drain_due(10);
    assert_eq!(due.iter().map(|e| e.token).collect::<Vec<_>>(), vec![late]);
    assert!(queue.is_empty());
}

#[test]
fn test_reset_cancels_pending_respawn() {
    let mut engine = engine_with(stationary_target_tuning());
    fire_until_hit(&mut engine);
    assert_eq!(engine.scheduler().len(), 1);

    engine.queue_command(PlayerCommand::Reset);
    let snap = engine.tick();
    assert!(has_event(&snap.events, |e| *e == SimEvent::Reset));
    assert!(engine.scheduler().is_empty());
    assert!(snap.target.alive);
    assert_eq!(snap.score.hits, 0);

    for _ in 0..50 {
        let snap = engine.tick();
        assert!(!has_event(&snap.events, |e| matches!(
            e,
            SimEvent::TargetRespawned { .. }
        )));
    }
}

// ---- Road snapping ----

#[test]
fn test_stale_snap_results_are_dropped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let a = GeoPoint::new(-115.14, 36.17);
    let b = GeoPoint::new(-115.15, 36.18);
    let c = GeoPoint::new(-115.16, 36.19);

    engine.queue_command(PlayerCommand::SnapToRoad {
        position: a,
        requested_tick: 5,
        generation: 0,
    });
    assert_eq!(engine.tick().vehicle.position, a);

    engine.queue_command(PlayerCommand::SnapToRoad {
        position: b,
        requested_tick: 3,
        generation: 0,
    });
    let snap = engine.tick();
    assert_eq!(snap.vehicle.position, a);
    assert!(snap.events.is_empty());

    engine.queue_command(PlayerCommand::SnapToRoad {
        position: c,
        requested_tick: 7,
        generation: 0,
    });
    let snap = engine.tick();
    assert_eq!(snap.vehicle.position, c);
    assert!(has_event(&snap.events, |e| *e == SimEvent::RoadSnapped { position: c }));
}

#[test]
fn test_snap_from_before_reset_is_dropped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..50 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::Reset);
    let snap = engine.tick();
    assert_eq!(snap.generation, 1);
    let start = snap.vehicle.position;

    let old = GeoPoint::new(-115.2, 36.2);
    let fresh = GeoPoint::new(-115.1399, 36.1698);
    engine.queue_commands([
        PlayerCommand::SnapToRoad {
            position: old,
            requested_tick: 50,
            generation: 0,
        },
        PlayerCommand::SnapToRoad {
            position: fresh,
            requested_tick: 1,
            generation: engine.generation(),
        },
    ]);
    let snap = engine.tick();
    assert_ne!(start, fresh);
    assert_eq!(snap.vehicle.position, fresh);
    assert_eq!(snap.events, vec![SimEvent::RoadSnapped { position: fresh }]);
}

// ---- Presentation state ----

#[test]
fn test_color_cycle_and_lock_toggle() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let initial = engine.tick().vehicle;
    assert!(initial.camera_locked);

    engine.queue_commands([
        PlayerCommand::KeyDown {
            key: Key::CycleColor,
        },
        PlayerCommand::ToggleLock,
    ]);
    let snap = engine.tick();
    assert_eq!(snap.vehicle.color, initial.color.next());
    assert!(!snap.vehicle.camera_locked);
    assert!(has_event(&snap.events, |e| *e == SimEvent::LockToggled { locked: false }));
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    for _ in 0..10 {
        engine.tick();
    }
    let paused_at = engine.vehicle_position();

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "Time should not advance while paused");
    assert_eq!(engine.phase(), SimPhase::Paused);
    assert_eq!(engine.vehicle_position(), paused_at);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.time().tick, 11);
}

#[test]
fn test_marker_rotation_follows_velocity() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::KeyDown {
        key: Key::Accelerate,
    });
    let snap = engine.tick();
    // Moving due north: atan2(+, 0) = 90 degrees, minus the 90 degree offset.
    assert_relative_eq!(snap.vehicle.marker_rotation_deg, 0.0, epsilon = 1e-9);
}
