//! Textual presentation of snapshots.

use ziz_core::events::SimEvent;
use ziz_core::state::{SimSnapshot, SpeedReadout};

/// Speed readout line, e.g. `Speed: 1.00 (111.8 MPH / 180.0 KPH)`.
pub fn speed_line(readout: &SpeedReadout) -> String {
    if readout.raw == 0.0 {
        return "Speed: 0.00 (0.0 MPH / 0.0 KPH)".to_string();
    }
    format!(
        "Speed: {:.2} ({:.1} MPH / {:.1} KPH)",
        readout.raw, readout.mph, readout.kph
    )
}

/// Version overlay text.
pub fn version_overlay(version: &str) -> String {
    format!("2D ZiZ V{version}")
}

/// One-line summary of a snapshot.
pub fn status_line(snapshot: &SimSnapshot) -> String {
    let v = &snapshot.vehicle;
    let target = if snapshot.target.alive {
        format!(
            "target ({:.6}, {:.6})",
            snapshot.target.position.lng, snapshot.target.position.lat
        )
    } else {
        "target down".to_string()
    };
    format!(
        "[{}] t={} pos=({:.6}, {:.6}) hdg={:.1} {} {} {} hits={}/{}",
        version_overlay(&snapshot.version),
        snapshot.time.tick,
        v.position.lng,
        v.position.lat,
        v.heading_deg,
        speed_line(&v.readout),
        v.color.css_name(),
        target,
        snapshot.score.hits,
        snapshot.score.shots_fired,
    )
}

/// Human-readable description of an event.
pub fn describe_event(event: &SimEvent) -> String {
    match event {
        SimEvent::ProjectileFired { heading_deg, .. } => format!("fired at {heading_deg:.1} deg"),
        SimEvent::FireRejected => "fire rejected: projectile in flight".to_string(),
        SimEvent::TargetHit { .. } => "target hit".to_string(),
        SimEvent::ProjectileExpired { reason } => format!("projectile expired ({reason:?})"),
        SimEvent::TargetRespawned { .. } => "target respawned".to_string(),
        SimEvent::TrailCleared => "trail cleared".to_string(),
        SimEvent::ColorChanged { color } => format!("color {}", color.css_name()),
        SimEvent::LockToggled { locked } => {
            format!("camera lock {}", if *locked { "on" } else { "off" })
        }
        SimEvent::RoadSnapped { position } => {
            format!("snapped to road ({:.6}, {:.6})", position.lng, position.lat)
        }
        SimEvent::Reset => "reset".to_string(),
    }
}
