//! `ziz`: drive the vehicle simulation from the console.
//!
//! Usage:
//!   ziz [--seed N] [--tuning tuning.json] [--ticks N] [--snap] [--snap-url URL] [--json] [--fast]
//!
//! Input lines are read from stdin (see `ziz_app::input`). Logging is
//! controlled with `RUST_LOG`.

use std::io::BufRead;
use std::path::Path;
use std::process;
use std::sync::{Arc, Mutex};

use clap::{App, Arg, ArgMatches};

use ziz_app::config::{self, RoadSnapConfig};
use ziz_app::display;
use ziz_app::game_loop::{self, LoopOptions, SnapshotSink};
use ziz_app::input::{self, ConsoleInput};
use ziz_app::state::GameLoopCommand;
use ziz_core::constants::{APP_VERSION, TICK_RATE};
use ziz_core::state::SimSnapshot;
use ziz_sim::engine::SimConfig;

fn parse_command_line() -> ArgMatches<'static> {
    App::new("ziz")
        .version(APP_VERSION)
        .about("2D ZiZ vehicle simulation")
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .short("s")
                .takes_value(true)
                .help("RNG seed (overrides ZIZ_SEED)"),
        )
        .arg(
            Arg::with_name("tuning")
                .long("tuning")
                .short("t")
                .takes_value(true)
                .help("JSON tuning file"),
        )
        .arg(
            Arg::with_name("ticks")
                .long("ticks")
                .short("n")
                .takes_value(true)
                .help("Stop after this many ticks"),
        )
        .arg(
            Arg::with_name("snap")
                .long("snap")
                .help("Snap the vehicle to roads via the routing service"),
        )
        .arg(
            Arg::with_name("snap-url")
                .long("snap-url")
                .takes_value(true)
                .requires("snap")
                .help("Base URL of an OSRM-compatible service (overrides ZIZ_SNAP_URL)"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print every snapshot as a JSON line"),
        )
        .arg(
            Arg::with_name("fast")
                .long("fast")
                .help("Do not sleep between ticks"),
        )
        .get_matches()
}

fn build_options(matches: &ArgMatches) -> anyhow::Result<LoopOptions> {
    let tuning = config::load_tuning(matches.value_of("tuning").map(Path::new))?;
    let seed = match matches.value_of("seed") {
        Some(s) => s.parse()?,
        None => config::seed_from_env().unwrap_or_else(|| SimConfig::default().seed),
    };
    let max_ticks = matches
        .value_of("ticks")
        .map(|s| s.parse::<u64>())
        .transpose()?;

    let road_snap = matches.is_present("snap").then(|| {
        let mut snap = RoadSnapConfig::default();
        if let Some(url) = matches.value_of("snap-url") {
            snap.base_url = url.to_string();
        }
        snap
    });

    Ok(LoopOptions {
        sim: SimConfig { seed, tuning },
        road_snap,
        max_ticks,
        realtime: !matches.is_present("fast"),
    })
}

fn console_sink(json: bool) -> SnapshotSink {
    Box::new(move |snap: &SimSnapshot| {
        if json {
            match serde_json::to_string(snap) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("failed to serialize snapshot: {e}"),
            }
            return;
        }
        for event in &snap.events {
            println!("{}", display::describe_event(event));
        }
        if snap.time.tick % TICK_RATE as u64 == 0 {
            println!("{}", display::status_line(snap));
        }
    })
}

fn run() -> anyhow::Result<()> {
    let matches = parse_command_line();
    let options = build_options(&matches)?;
    let bounded = options.max_ticks.is_some();

    log::info!(
        "{} seed={} snap={}",
        display::version_overlay(APP_VERSION),
        options.sim.seed,
        options.road_snap.is_some()
    );

    let latest = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(options, latest, console_sink(matches.is_present("json")))?;

    // The reader thread is detached: it may stay blocked on stdin after the loop ends.
    let input_tx = cmd_tx.clone();
    std::thread::Builder::new()
        .name("ziz-input".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::error!("stdin read failed: {e}");
                        break;
                    }
                };
                let command = match input::parse_line(&line) {
                    Ok(ConsoleInput::Command(command)) => GameLoopCommand::PlayerCommand(command),
                    Ok(ConsoleInput::Quit) => GameLoopCommand::Shutdown,
                    Ok(ConsoleInput::Empty) => continue,
                    Err(e) => {
                        log::warn!("{e:#}");
                        continue;
                    }
                };
                if input_tx.send(command).is_err() {
                    return;
                }
            }
            // End of input ends an unbounded run.
            if !bounded {
                let _ = input_tx.send(GameLoopCommand::Shutdown);
            }
        })?;
    drop(cmd_tx);

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        process::exit(1);
    }
}
