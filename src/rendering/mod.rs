//! Grid → drawing primitives.
//!
//! Drawing goes through the [`Surface`] trait so the same code feeds the
//! macroquad window and the recording surface used in tests.

mod display_list;
pub mod present;

pub use display_list::{DisplayList, DrawCommand};

use macroquad::prelude::{BLACK, Color, WHITE};

use crate::domain::{Cell, Grid};

/// Minimal immediate-mode 2D drawing capability.
pub trait Surface {
    /// Start a fresh frame. Surfaces that overdraw in place can ignore this.
    fn begin_frame(&mut self) {}
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Draw every segment added since `begin_path`
    fn stroke(&mut self);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// Colors for grid lines and the two cell states
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub grid: Color,
    pub dead: Color,
    pub alive: Color,
}

impl Palette {
    pub const fn fill(&self, cell: Cell) -> Color {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Color::new(0.898, 0.898, 0.898, 1.0), // #e5e5e5
            dead: WHITE,
            alive: BLACK,
        }
    }
}

/// Cell geometry and colors shared by drawing and pointer mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub cell_size: u32,
    pub palette: Palette,
}

impl Style {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size,
            palette: Palette::default(),
        }
    }

    /// Distance between the top-left corners of adjacent cells
    pub const fn pitch(&self) -> u32 {
        self.cell_size + 1
    }
}

/// Backing-buffer size in pixels for a `width x height` grid: every cell plus
/// one gutter pixel on each side.
pub fn surface_size(width: u32, height: u32, cell_size: u32) -> (u32, u32) {
    let pitch = cell_size.saturating_add(1);
    (
        width.saturating_mul(pitch).saturating_add(1),
        height.saturating_mul(pitch).saturating_add(1),
    )
}

/// Stroke the `width + 1` vertical and `height + 1` horizontal gutter lines.
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, style: &Style) {
    let (width, height) = grid.dimensions();
    let (total_w, total_h) = surface_size(width, height, style.cell_size);
    let pitch = style.pitch() as f32;

    surface.begin_path();
    surface.set_stroke_color(style.palette.grid);

    // Lines run through the middle of each 1px gutter column/row.
    for i in 0..=width {
        let x = i as f32 * pitch + 0.5;
        surface.move_to(x, 0.0);
        surface.line_to(x, total_h as f32);
    }
    for j in 0..=height {
        let y = j as f32 * pitch + 0.5;
        surface.move_to(0.0, y);
        surface.line_to(total_w as f32, y);
    }

    surface.stroke();
}

/// Fill every cell square with its palette color.
///
/// Cells are visited per state so the fill color changes twice per frame
/// rather than once per cell.
pub fn draw_cells<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, style: &Style) {
    let bytes = grid.as_bytes();
    let width = grid.width() as usize;
    let pitch = style.pitch() as f32;
    let size = style.cell_size as f32;

    for cell in [Cell::Alive, Cell::Dead] {
        surface.set_fill_color(style.palette.fill(cell));
        let value = cell as u8;
        for (idx, _) in bytes.iter().enumerate().filter(|&(_, &b)| b == value) {
            let (row, col) = (idx / width, idx % width);
            surface.fill_rect(
                col as f32 * pitch + 1.0,
                row as f32 * pitch + 1.0,
                size,
                size,
            );
        }
    }
}

/// Full redraw: new frame, grid lines, then cells.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, style: &Style) {
    surface.begin_frame();
    draw_grid(surface, grid, style);
    draw_cells(surface, grid, style);
}
