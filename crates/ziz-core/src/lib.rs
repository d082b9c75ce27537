//! Core types and definitions for the ZiZ vehicle simulation.
//!
//! This crate defines the vocabulary shared by the engine and the host:
//! components, commands, state snapshots, events, constants and tuning.
//! It has no dependency on any runtime, network or rendering layer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
