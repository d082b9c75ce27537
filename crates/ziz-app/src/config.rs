//! Host configuration: tuning file, seed and road-snap endpoint.
//!
//! Values can be overridden through environment variables.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context};

use ziz_core::config::Tuning;

/// Public OSRM demo server.
pub const DEFAULT_SNAP_URL: &str = "https://router.project-osrm.org";

/// Load tuning from an optional JSON file. Missing fields keep defaults.
pub fn load_tuning(path: Option<&Path>) -> anyhow::Result<Tuning> {
    let tuning = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file {}", path.display()))?;
            Tuning::from_json(&json)
                .with_context(|| format!("failed to parse tuning file {}", path.display()))?
        }
        None => Tuning::default(),
    };
    tuning
        .validate()
        .map_err(|e| anyhow!("invalid tuning: {e}"))?;
    Ok(tuning)
}

/// Seed from `ZIZ_SEED`, if set and numeric.
pub fn seed_from_env() -> Option<u64> {
    std::env::var("ZIZ_SEED").ok().and_then(|v| v.parse().ok())
}

/// Routing service used for road snapping.
#[derive(Debug, Clone)]
pub struct RoadSnapConfig {
    /// Base URL of an OSRM-compatible service.
    pub base_url: String,
    pub profile: String,
    pub timeout: Duration,
}

impl Default for RoadSnapConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("ZIZ_SNAP_URL").unwrap_or_else(|_| DEFAULT_SNAP_URL.to_string());
        let timeout_ms = std::env::var("ZIZ_SNAP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        Self {
            base_url,
            profile: "driving".to_string(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}
