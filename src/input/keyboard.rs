use macroquad::prelude::*;

use crate::application::Command;

/// Speed multiplier for one Up/Down key press
pub const SPEED_STEP: f32 = 2.0;

const BINDINGS: [(KeyCode, Command); 5] = [
    (KeyCode::Space, Command::TogglePlay),
    (KeyCode::C, Command::Reset),
    (KeyCode::R, Command::Randomize),
    (KeyCode::Up, Command::AdjustSpeed(SPEED_STEP)),
    (KeyCode::Down, Command::AdjustSpeed(1.0 / SPEED_STEP)),
];

/// Commands whose key went down this frame, in binding order
pub fn pressed_commands() -> Vec<Command> {
    BINDINGS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, command)| command)
        .collect()
}

/// One-line key help for the window title and logs
pub fn help() -> &'static str {
    "Space: play/pause | C: clear | R: random | Up/Down: speed | click: toggle cell"
}
