//! Host input → grid coordinates.

pub mod keyboard;

use crate::domain::Grid;
use crate::rendering::{Style, surface_size};

/// A pointer click in client (window) coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Where the drawing surface is displayed, in client coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, event: PointerEvent) -> bool {
        event.client_x >= self.left
            && event.client_x <= self.left + self.width
            && event.client_y >= self.top
            && event.client_y <= self.top + self.height
    }
}

/// Grid size that fits a viewport: `floor(viewport / (cell_size + 1))` per axis.
///
/// May return zero for tiny viewports; creating a grid from that fails with
/// `InvalidDimension`.
pub fn grid_dimensions_for_viewport(
    viewport_width: f32,
    viewport_height: f32,
    cell_size: u32,
) -> (u32, u32) {
    let pitch = cell_size.saturating_add(1) as f32;
    (
        (viewport_width / pitch).floor() as u32,
        (viewport_height / pitch).floor() as u32,
    )
}

/// Map a click to the `(row, col)` of the cell under it.
///
/// The click is made surface-local, scaled from displayed size to backing
/// size, then divided by the cell pitch. The result is clamped into the grid,
/// so clicks on or past the edge select the nearest edge cell.
pub fn pointer_to_cell(event: PointerEvent, rect: SurfaceRect, grid: &Grid, style: &Style) -> (u32, u32) {
    let (width, height) = grid.dimensions();
    let (backing_w, backing_h) = surface_size(width, height, style.cell_size);
    let pitch = style.pitch() as f32;

    let scale_x = scale(backing_w, rect.width);
    let scale_y = scale(backing_h, rect.height);
    let x = (event.client_x - rect.left) * scale_x;
    let y = (event.client_y - rect.top) * scale_y;

    // float -> int casts saturate: negatives and NaN become 0
    let row = ((y / pitch).floor() as u32).min(height - 1);
    let col = ((x / pitch).floor() as u32).min(width - 1);
    (row, col)
}

fn scale(backing: u32, displayed: f32) -> f32 {
    if displayed > 0.0 {
        backing as f32 / displayed
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unscaled_rect(grid: &Grid, style: &Style) -> SurfaceRect {
        let (w, h) = surface_size(grid.width(), grid.height(), style.cell_size);
        SurfaceRect::new(0.0, 0.0, w as f32, h as f32)
    }

    #[test]
    fn test_viewport_dimensions() {
        assert_eq!(grid_dimensions_for_viewport(1000.0, 800.0, 10), (90, 72));
        assert_eq!(grid_dimensions_for_viewport(10.0, 10.0, 10), (0, 0));
        assert_eq!(grid_dimensions_for_viewport(-5.0, 22.0, 10), (0, 2));
    }

    #[test]
    fn test_click_inside_cell() {
        let grid = Grid::new(10, 8).unwrap();
        let style = Style::new(10);
        let rect = unscaled_rect(&grid, &style);
        assert_eq!(pointer_to_cell(PointerEvent::new(5.0, 5.0), rect, &grid, &style), (0, 0));
        assert_eq!(pointer_to_cell(PointerEvent::new(34.0, 23.0), rect, &grid, &style), (2, 3));
    }

    #[test]
    fn test_offset_rect() {
        let grid = Grid::new(10, 8).unwrap();
        let style = Style::new(10);
        let (w, h) = surface_size(10, 8, 10);
        let rect = SurfaceRect::new(100.0, 50.0, w as f32, h as f32);
        assert_eq!(pointer_to_cell(PointerEvent::new(134.0, 73.0), rect, &grid, &style), (2, 3));
    }

    #[test]
    fn test_scaled_display() {
        // surface shown at half its backing size
        let grid = Grid::new(10, 8).unwrap();
        let style = Style::new(10);
        let (w, h) = surface_size(10, 8, 10);
        let rect = SurfaceRect::new(0.0, 0.0, w as f32 / 2.0, h as f32 / 2.0);
        assert_eq!(pointer_to_cell(PointerEvent::new(17.0, 11.5), rect, &grid, &style), (2, 3));
    }

    #[test]
    fn test_never_out_of_bounds() {
        let grid = Grid::new(7, 5).unwrap();
        let style = Style::new(10);
        let rect = unscaled_rect(&grid, &style);
        let edge_points = [
            (rect.width, rect.height),
            (rect.width + 500.0, rect.height + 500.0),
            (f32::MAX, f32::MAX),
            (-40.0, -40.0),
            (f32::NAN, f32::INFINITY),
        ];
        for (x, y) in edge_points {
            let (row, col) = pointer_to_cell(PointerEvent::new(x, y), rect, &grid, &style);
            assert!(row < grid.height() && col < grid.width(), "({x}, {y}) -> ({row}, {col})");
            assert!(grid.get(row, col).is_ok());
        }
        assert_eq!(
            pointer_to_cell(PointerEvent::new(rect.width, rect.height), rect, &grid, &style),
            (4, 6)
        );
    }

    #[test]
    fn test_degenerate_rect_does_not_divide_by_zero() {
        let grid = Grid::new(3, 3).unwrap();
        let style = Style::new(10);
        let rect = SurfaceRect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(pointer_to_cell(PointerEvent::new(12.0, 1.0), rect, &grid, &style), (0, 1));
    }

    #[test]
    fn test_rect_contains() {
        let rect = SurfaceRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(PointerEvent::new(10.0, 30.0)));
        assert!(!rect.contains(PointerEvent::new(9.0, 15.0)));
    }
}
