use macroquad::prelude::*;

use super::{DisplayList, DrawCommand};

const LINE_THICKNESS: f32 = 1.0;

/// Replay a recorded frame into the macroquad window
pub fn present(list: &DisplayList) {
    for command in list.commands() {
        match *command {
            DrawCommand::Line { from, to, color } => {
                draw_line(from.0, from.1, to.0, to.1, LINE_THICKNESS, color);
            }
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => draw_rectangle(x, y, width, height, color),
        }
    }
}
