//! Messages exchanged with the game loop thread.

use ziz_core::commands::PlayerCommand;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forward a player command to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Stop the game loop.
    Shutdown,
}
