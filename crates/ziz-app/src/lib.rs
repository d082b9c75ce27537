//! ZiZ host application.
//!
//! Wires the headless simulation to a fixed-rate game loop, maps raw key
//! input to commands, renders a textual readout and optionally snaps the
//! vehicle to roads through an external routing service.

pub mod config;
pub mod display;
pub mod game_loop;
pub mod input;
pub mod road_snap;
pub mod state;

pub use ziz_core as core;
