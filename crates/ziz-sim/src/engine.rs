//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, the input state, the deferred
//! event queue and the RNG. It processes player commands, runs all systems
//! in a fixed order and produces `SimSnapshot`s. Completely headless, so
//! every run with the same seed and commands is reproducible.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ziz_core::commands::PlayerCommand;
use ziz_core::components::{Kinematics, TargetOrbit, Trail, VehicleStyle};
use ziz_core::config::Tuning;
use ziz_core::enums::{Key, SimPhase};
use ziz_core::events::SimEvent;
use ziz_core::state::SimSnapshot;
use ziz_core::types::{GeoPoint, SimTime};

use crate::scheduler::{EventQueue, ScheduledKind};
use crate::systems;
use crate::systems::motion::{ControlInput, JoystickInput};
use crate::systems::snapshot::ScoreState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    tuning: Tuning,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    input: ControlInput,
    scheduler: EventQueue,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
    score: ScoreState,
    vehicle: hecs::Entity,
    target: hecs::Entity,
    /// Request tick of the newest road-snap result applied so far.
    last_snap_tick: Option<u64>,
    /// Number of resets so far.
    generation: u64,
}

impl SimulationEngine {
    /// Create a new simulation engine, rejecting out-of-range tuning.
    pub fn try_new(config: SimConfig) -> Result<Self, String> {
        config.tuning.validate()?;
        Ok(Self::new(config))
    }

    /// Create a new simulation engine with the given config.
    ///
    /// The tuning must pass `Tuning::validate`; in particular an inverted
    /// speed range panics on the first tick. Use `try_new` for tuning that
    /// has not been checked.
    pub fn new(config: SimConfig) -> Self {
        debug_assert!(config.tuning.validate().is_ok());
        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let (vehicle, target) = Self::populate(&mut world, &mut rng, &config.tuning);

        Self {
            world,
            tuning: config.tuning,
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng,
            input: ControlInput::default(),
            scheduler: EventQueue::new(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            vehicle,
            target,
            last_snap_tick: None,
            generation: 0,
        }
    }

    fn populate(
        world: &mut World,
        rng: &mut ChaCha8Rng,
        tuning: &Tuning,
    ) -> (hecs::Entity, hecs::Entity) {
        let vehicle = world_setup::spawn_vehicle(world, rng, tuning);
        let target = world_setup::spawn_target(world, tuning.initial_position, tuning);
        (vehicle, target)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.generation,
            events,
            &self.score,
        )
    }

    /// Get the current phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Reset generation; see `SimSnapshot::generation`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Input state the next tick will integrate.
    pub fn input(&self) -> &ControlInput {
        &self.input
    }

    /// Pending deferred events.
    pub fn scheduler(&self) -> &EventQueue {
        &self.scheduler
    }

    pub fn vehicle_position(&self) -> GeoPoint {
        self.world
            .get::<&GeoPoint>(self.vehicle)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn vehicle_kinematics(&self) -> Kinematics {
        self.world
            .get::<&Kinematics>(self.vehicle)
            .map(|k| *k)
            .unwrap_or_default()
    }

    pub fn trail(&self) -> Vec<GeoPoint> {
        self.world
            .get::<&Trail>(self.vehicle)
            .map(|t| t.points.clone())
            .unwrap_or_default()
    }

    pub fn target_position(&self) -> GeoPoint {
        self.world
            .get::<&GeoPoint>(self.target)
            .map(|p| *p)
            .unwrap_or_default()
    }

    pub fn target_orbit(&self) -> Option<TargetOrbit> {
        self.world.get::<&TargetOrbit>(self.target).map(|o| *o).ok()
    }

    pub fn projectile_active(&self) -> bool {
        systems::projectile::is_active(&self.world)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => {
                if !self.input.keys.set(key, true) {
                    self.handle_action_key(key);
                }
            }
            PlayerCommand::KeyUp { key } => {
                self.input.keys.set(key, false);
            }
            PlayerCommand::Joystick { force, direction } => {
                if !force.is_finite() {
                    log::warn!("ignoring joystick input with force {force}");
                    return;
                }
                self.input.joystick = Some(JoystickInput {
                    force: force.clamp(0.0, 1.0),
                    direction,
                });
            }
            PlayerCommand::JoystickRelease => {
                if self.input.joystick.take().is_some() {
                    systems::motion::release_joystick(&mut self.world, &self.tuning);
                }
            }
            PlayerCommand::Fire => self.fire(),
            PlayerCommand::ToggleLock => {
                if let Ok(mut style) = self.world.get::<&mut VehicleStyle>(self.vehicle) {
                    style.camera_locked = !style.camera_locked;
                    self.events.push(SimEvent::LockToggled {
                        locked: style.camera_locked,
                    });
                }
            }
            PlayerCommand::CycleColor => {
                if let Ok(mut style) = self.world.get::<&mut VehicleStyle>(self.vehicle) {
                    style.color = style.color.next();
                    self.events.push(SimEvent::ColorChanged { color: style.color });
                }
            }
            PlayerCommand::ClearTrail => {
                if let Ok(mut trail) = self.world.get::<&mut Trail>(self.vehicle) {
                    trail.points.clear();
                    self.events.push(SimEvent::TrailCleared);
                }
            }
            PlayerCommand::SnapToRoad {
                position,
                requested_tick,
                generation,
            } => self.apply_snap(position, requested_tick, generation),
            PlayerCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
            PlayerCommand::Reset => self.reset(),
        }
    }

    fn handle_action_key(&mut self, key: Key) {
        let command = match key {
            Key::Fire => PlayerCommand::Fire,
            Key::ToggleLock => PlayerCommand::ToggleLock,
            Key::CycleColor => PlayerCommand::CycleColor,
            Key::ClearTrail => PlayerCommand::ClearTrail,
            Key::Left | Key::Right | Key::Accelerate | Key::Brake | Key::Handbrake => return,
        };
        self.handle_command(command);
    }

    fn fire(&mut self) {
        let origin = self.vehicle_position();
        let heading = self.vehicle_kinematics().heading_deg;
        let fired = systems::projectile::fire(
            &mut self.world,
            &mut self.scheduler,
            origin,
            heading,
            self.time.tick,
            &self.tuning,
        );

        match fired {
            Some(_) => {
                self.score.shots_fired += 1;
                self.events.push(SimEvent::ProjectileFired {
                    position: origin,
                    heading_deg: heading,
                });
            }
            None => self.events.push(SimEvent::FireRejected),
        }
    }

    /// Apply a road-snap result. Results requested before the last reset, or
    /// older than the newest one already applied, are dropped; otherwise the
    /// position is overwritten.
    fn apply_snap(&mut self, position: GeoPoint, requested_tick: u64, generation: u64) {
        if generation != self.generation {
            log::debug!(
                "dropping road snap from generation {generation} (current {})",
                self.generation
            );
            return;
        }
        if self.last_snap_tick.is_some_and(|last| requested_tick < last) {
            log::debug!("dropping stale road snap from tick {requested_tick}");
            return;
        }
        if let Ok(mut pos) = self.world.get::<&mut GeoPoint>(self.vehicle) {
            *pos = position;
            self.last_snap_tick = Some(requested_tick);
            self.events.push(SimEvent::RoadSnapped { position });
        }
    }

    /// Restore the initial world. Pending expiries and respawns are cancelled.
    fn reset(&mut self) {
        self.world.clear();
        self.scheduler.clear();
        let (vehicle, target) = Self::populate(&mut self.world, &mut self.rng, &self.tuning);
        self.vehicle = vehicle;
        self.target = target;
        self.input = ControlInput::default();
        self.time = SimTime::default();
        self.phase = SimPhase::Running;
        self.score = ScoreState::default();
        self.last_snap_tick = None;
        self.generation += 1;
        self.events.push(SimEvent::Reset);
        log::info!("simulation reset");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Vehicle motion and trail
        systems::motion::run(&mut self.world, &self.input, &self.tuning);
        let center = self.vehicle_position();
        // 2. Target orbit around the moved vehicle
        systems::target::run(&mut self.world, center, self.time.elapsed_secs, &self.tuning);
        // 3. Projectile flight, hit and bounds checks
        let termination = systems::projectile::advance(
            &mut self.world,
            &mut self.scheduler,
            self.target,
            &self.tuning,
            &mut self.events,
        );
        if let Some(systems::projectile::Termination::Hit { .. }) = termination {
            self.score.hits += 1;
            self.scheduler.schedule(
                self.time.tick + SimTime::ticks_for(self.tuning.target_respawn_delay_secs),
                ScheduledKind::TargetRespawn,
            );
        }
        // 4. Deferred events (timeouts, respawns)
        self.run_scheduled(center);
    }

    fn run_scheduled(&mut self, center: GeoPoint) {
        for event in self.scheduler.drain_due(self.time.tick) {
            match event.kind {
                ScheduledKind::ProjectileExpiry { projectile } => {
                    systems::projectile::expire(&mut self.world, projectile, &mut self.events);
                }
                ScheduledKind::TargetRespawn => {
                    if let Some(position) = systems::target::respawn(
                        &mut self.world,
                        self.target,
                        center,
                        &mut self.rng,
                        self.time.elapsed_secs,
                        &self.tuning,
                    ) {
                        log::info!("target respawned at {position:?}");
                        self.events.push(SimEvent::TargetRespawned { position });
                    }
                }
            }
        }
    }
}
