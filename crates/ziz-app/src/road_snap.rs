//! Road snapping through an OSRM-compatible `nearest` service.
//!
//! The game loop posts the vehicle position every tick. A worker thread
//! picks up the newest pending request (older unsent ones are replaced),
//! performs a blocking GET and feeds a successful match back to the loop as
//! a `SnapToRoad` command. Failures are logged and the position is left as
//! it is. There are no retries.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use serde::Deserialize;

use ziz_core::commands::PlayerCommand;
use ziz_core::types::GeoPoint;

use crate::config::RoadSnapConfig;
use crate::state::GameLoopCommand;

/// A position to snap, stamped with the tick and reset generation it was
/// taken at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRequest {
    pub position: GeoPoint,
    pub tick: u64,
    pub generation: u64,
}

#[derive(Debug, Deserialize)]
struct NearestResponse {
    code: String,
    #[serde(default)]
    waypoints: Vec<Waypoint>,
}

#[derive(Debug, Deserialize)]
struct Waypoint {
    location: [f64; 2],
}

/// Extract the best-match coordinate from a `nearest` response body.
pub fn parse_nearest_response(body: &str) -> anyhow::Result<GeoPoint> {
    let response: NearestResponse =
        serde_json::from_str(body).context("malformed nearest response")?;
    if response.code != "Ok" {
        bail!("routing service returned {}", response.code);
    }
    match response.waypoints.first() {
        Some(wp) => Ok(GeoPoint::new(wp.location[0], wp.location[1])),
        None => bail!("routing service returned no waypoints"),
    }
}

/// Build the `nearest` URL for `position`.
pub fn nearest_url(config: &RoadSnapConfig, position: GeoPoint) -> String {
    format!(
        "{}/nearest/v1/{}/{},{}?number=1",
        config.base_url.trim_end_matches('/'),
        config.profile,
        position.lng,
        position.lat
    )
}

#[derive(Default)]
struct Slot {
    pending: Option<SnapRequest>,
    closed: bool,
}

/// Single-entry mailbox: posting replaces any request not yet taken.
#[derive(Default)]
struct Mailbox {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl Mailbox {
    fn post(&self, request: SnapRequest) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.pending = Some(request);
            self.ready.notify_one();
        }
    }

    fn close(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.closed = true;
            self.ready.notify_one();
        }
    }

    /// Block until a request is available. `None` once closed.
    fn take(&self) -> Option<SnapRequest> {
        let mut slot = self.slot.lock().ok()?;
        loop {
            if slot.closed {
                return None;
            }
            if let Some(request) = slot.pending.take() {
                return Some(request);
            }
            slot = self.ready.wait(slot).ok()?;
        }
    }
}

/// Handle owned by the game loop. Dropping it stops the worker.
pub struct RoadSnapper {
    mailbox: Arc<Mailbox>,
    worker: Option<JoinHandle<()>>,
}

impl RoadSnapper {
    /// Start the worker. Results are sent to `results` as player commands.
    pub fn spawn(
        config: RoadSnapConfig,
        results: mpsc::Sender<GameLoopCommand>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        let mailbox = Arc::new(Mailbox::default());
        let worker_mailbox = Arc::clone(&mailbox);

        let worker = std::thread::Builder::new()
            .name("ziz-road-snap".into())
            .spawn(move || run_worker(&client, &config, &worker_mailbox, &results))
            .context("failed to spawn road snap thread")?;

        Ok(Self {
            mailbox,
            worker: Some(worker),
        })
    }

    /// Fire-and-forget request.
    pub fn request(&self, request: SnapRequest) {
        self.mailbox.post(request);
    }
}

impl Drop for RoadSnapper {
    fn drop(&mut self) {
        self.mailbox.close();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(
    client: &Client,
    config: &RoadSnapConfig,
    mailbox: &Mailbox,
    results: &mpsc::Sender<GameLoopCommand>,
) {
    while let Some(request) = mailbox.take() {
        match snap(client, config, request.position) {
            Ok(position) => {
                let command = PlayerCommand::SnapToRoad {
                    position,
                    requested_tick: request.tick,
                    generation: request.generation,
                };
                if results.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("road snap failed at tick {}: {e:#}", request.tick),
        }
    }
}

fn snap(client: &Client, config: &RoadSnapConfig, position: GeoPoint) -> anyhow::Result<GeoPoint> {
    let url = nearest_url(config, position);
    let body = client
        .get(&url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("request to {url} failed"))?
        .text()
        .context("failed to read response body")?;
    parse_nearest_response(&body)
}
