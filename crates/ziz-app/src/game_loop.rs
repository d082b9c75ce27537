//! Game loop thread: runs the simulation engine at `TICK_RATE` and hands
//! every snapshot to a sink.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via an `mpsc` channel. The latest snapshot is
//! also stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use ziz_core::constants::TICK_RATE;
use ziz_core::state::SimSnapshot;
use ziz_sim::engine::{SimConfig, SimulationEngine};

use crate::config::RoadSnapConfig;
use crate::road_snap::{RoadSnapper, SnapRequest};
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Receives each snapshot right after its tick.
pub type SnapshotSink = Box<dyn FnMut(&SimSnapshot) + Send>;

/// Everything the loop needs to start.
pub struct LoopOptions {
    pub sim: SimConfig,
    /// Enables road snapping when set.
    pub road_snap: Option<RoadSnapConfig>,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks. Disabled to run as fast as possible.
    pub realtime: bool,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input layer and the thread handle.
pub fn spawn_game_loop(
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
    sink: SnapshotSink,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    options
        .sim
        .tuning
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid tuning")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let snapper = match options.road_snap.clone() {
        Some(config) => Some(RoadSnapper::spawn(config, cmd_tx.clone())?),
        None => None,
    };

    let handle = std::thread::Builder::new()
        .name("ziz-game-loop".into())
        .spawn(move || {
            run_game_loop(options, cmd_rx, &latest_snapshot, snapper, sink);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or `max_ticks`.
fn run_game_loop(
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
    snapper: Option<RoadSnapper>,
    mut sink: SnapshotSink,
) {
    let mut engine = SimulationEngine::new(options.sim);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    log::info!("game loop started at {TICK_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Request a road snap for the new position
        if let Some(snapper) = &snapper {
            snapper.request(SnapRequest {
                position: snapshot.vehicle.position,
                tick: snapshot.time.tick,
                generation: snapshot.generation,
            });
        }

        // 4. Hand off to the presentation layer
        sink(&snapshot);

        // 5. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.max_ticks.is_some_and(|max| ticks >= max) {
            log::info!("game loop stopped after {ticks} ticks");
            return;
        }

        if !options.realtime {
            continue;
        }

        // 6. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
