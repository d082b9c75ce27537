//! Raw input mapping.
//!
//! Key codes follow the browser `keyCode` values the controls were designed
//! around: arrows drive, space is the handbrake, letters trigger actions.
//! Console lines are parsed into the same commands:
//!
//! ```text
//! down 38        key down by code
//! up 38          key up by code
//! down f         key down by letter
//! joy 0.6 left   joystick force and direction
//! release        joystick released
//! fire | lock | color | clear | pause | resume | reset | quit
//! ```

use anyhow::{anyhow, bail, Context};

use ziz_core::commands::PlayerCommand;
use ziz_core::enums::{JoystickDirection, Key};

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_SPACE: u32 = 32;

/// Map a key code to a logical key.
pub fn key_from_code(code: u32) -> Option<Key> {
    match code {
        KEY_LEFT => Some(Key::Left),
        KEY_UP => Some(Key::Accelerate),
        KEY_RIGHT => Some(Key::Right),
        KEY_DOWN => Some(Key::Brake),
        KEY_SPACE => Some(Key::Handbrake),
        _ => None,
    }
}

/// Map a letter to a logical key, case-insensitively.
pub fn key_from_char(c: char) -> Option<Key> {
    match c.to_ascii_lowercase() {
        'f' => Some(Key::Fire),
        'l' => Some(Key::ToggleLock),
        'p' => Some(Key::CycleColor),
        'c' => Some(Key::ClearTrail),
        _ => None,
    }
}

/// A parsed console line.
#[derive(Debug)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    Quit,
    Empty,
}

fn parse_key(token: &str) -> anyhow::Result<Key> {
    if let Ok(code) = token.parse::<u32>() {
        return key_from_code(code).ok_or_else(|| anyhow!("unmapped key code {code}"));
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => key_from_char(c).ok_or_else(|| anyhow!("unmapped key {c:?}")),
        _ => bail!("expected a key code or a single letter, got {token:?}"),
    }
}

fn parse_direction(token: &str) -> anyhow::Result<JoystickDirection> {
    match token {
        "up" => Ok(JoystickDirection::Up),
        "down" => Ok(JoystickDirection::Down),
        "left" => Ok(JoystickDirection::Left),
        "right" => Ok(JoystickDirection::Right),
        other => bail!("unknown joystick direction {other:?}"),
    }
}

/// Parse one console line.
pub fn parse_line(line: &str) -> anyhow::Result<ConsoleInput> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = match tokens.as_slice() {
        [] => return Ok(ConsoleInput::Empty),
        ["quit"] | ["exit"] => return Ok(ConsoleInput::Quit),
        ["down", key] => PlayerCommand::KeyDown {
            key: parse_key(key)?,
        },
        ["up", key] => PlayerCommand::KeyUp {
            key: parse_key(key)?,
        },
        ["joy", force, direction] => {
            let force: f64 = force
                .parse()
                .with_context(|| format!("invalid joystick force {force:?}"))?;
            if !force.is_finite() {
                bail!("joystick force must be finite, got {force}");
            }
            PlayerCommand::Joystick {
                force: force.clamp(0.0, 1.0),
                direction: parse_direction(direction)?,
            }
        }
        ["release"] => PlayerCommand::JoystickRelease,
        ["fire"] => PlayerCommand::Fire,
        ["lock"] => PlayerCommand::ToggleLock,
        ["color"] => PlayerCommand::CycleColor,
        ["clear"] => PlayerCommand::ClearTrail,
        ["pause"] => PlayerCommand::Pause,
        ["resume"] => PlayerCommand::Resume,
        ["reset"] => PlayerCommand::Reset,
        _ => bail!("unrecognised input {line:?}"),
    };
    Ok(ConsoleInput::Command(command))
}
