use macroquad::prelude::{BLACK, Color};

use super::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

/// A [`Surface`] that records the frame instead of drawing it.
///
/// The window host replays the latest recording every display frame, which
/// keeps the picture on screen while the simulation is paused. Tests inspect
/// the recording directly.
#[derive(Clone, Debug)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    path: Vec<((f32, f32), (f32, f32))>,
    cursor: (f32, f32),
    stroke_color: Color,
    fill_color: Color,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            path: Vec::new(),
            cursor: (0.0, 0.0),
            stroke_color: BLACK,
            fill_color: BLACK,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Stroked segments as `(x1, y1, x2, y2, color)`
    pub fn lines(&self) -> impl Iterator<Item = (f32, f32, f32, f32, Color)> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::Line { from, to, color } => Some((from.0, from.1, to.0, to.1, color)),
            DrawCommand::Rect { .. } => None,
        })
    }

    /// Filled rectangles as `(x, y, width, height, color)`
    pub fn fills(&self) -> impl Iterator<Item = (f32, f32, f32, f32, Color)> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => Some((x, y, width, height, color)),
            DrawCommand::Line { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.path.clear();
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for DisplayList {
    fn begin_frame(&mut self) {
        self.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push((self.cursor, (x, y)));
        self.cursor = (x, y);
    }

    fn stroke(&mut self) {
        let color = self.stroke_color;
        self.commands.extend(
            self.path
                .iter()
                .map(|&(from, to)| DrawCommand::Line { from, to, color }),
        );
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color: self.fill_color,
        });
    }
}
