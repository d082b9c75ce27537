//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Logical input keys after mapping from raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Accelerate,
    Brake,
    Handbrake,
    Fire,
    ToggleLock,
    CycleColor,
    ClearTrail,
}

/// Quantised joystick direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoystickDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Vehicle marker palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerColor {
    #[default]
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 5] = [
        MarkerColor::Red,
        MarkerColor::Green,
        MarkerColor::Blue,
        MarkerColor::Orange,
        MarkerColor::Yellow,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// The next color in the palette, wrapping around.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn css_name(self) -> &'static str {
        match self {
            MarkerColor::Red => "red",
            MarkerColor::Green => "green",
            MarkerColor::Blue => "blue",
            MarkerColor::Orange => "orange",
            MarkerColor::Yellow => "yellow",
        }
    }
}

/// Why a projectile left flight without hitting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryReason {
    OutOfBounds,
    Timeout,
}

/// Top-level engine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
