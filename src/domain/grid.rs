use std::fmt;

use super::{Cell, GridError};

/// Grid owns the 2D cell buffer of the universe.
///
/// Cells are stored row-major: the cell at `(row, col)` lives at
/// `row * width + col`. The buffer length always equals `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let len = Self::buffer_len(width, height)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GridError::InvalidDimension { width, height })?;
        cells.resize(len, Cell::Dead);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of cells a `width x height` grid needs, or why it can't exist.
    pub(crate) fn buffer_len(width: u32, height: u32) -> Result<usize, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        // A Vec cannot hold more than isize::MAX bytes.
        (width as usize)
            .checked_mul(height as usize)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(GridError::InvalidDimension { width, height })
    }

    /// Grid dimensions as `(width, height)`
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    fn checked_index(&self, row: u32, col: u32) -> Result<usize, GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, row: u32, col: u32) -> Result<Cell, GridError> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position. Touches nothing but that one cell.
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) -> Result<(), GridError> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Mark every listed `(row, col)` alive.
    ///
    /// All coordinates are checked before any cell changes, so an error leaves
    /// the grid as it was.
    pub fn set_alive(&mut self, positions: &[(u32, u32)]) -> Result<(), GridError> {
        let indices = positions
            .iter()
            .map(|&(row, col)| self.checked_index(row, col))
            .collect::<Result<Vec<_>, _>>()?;
        for idx in indices {
            self.cells[idx] = Cell::Alive;
        }
        Ok(())
    }

    /// Count live neighbors using toroidal wrapping (grid wraps like a torus).
    ///
    /// Coordinates outside the grid are first reduced modulo the extents.
    pub fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        self.neighbors_wrapped(row % self.height, col % self.width)
    }

    /// Neighbor count for in-range coordinates.
    ///
    /// Adding `height - 1` modulo `height` steps one row up without going
    /// negative; the same holds for columns. On extents below 3 the up and
    /// down steps land on the same row, so only the distinct offsets are used
    /// and each neighboring cell is counted once.
    pub(crate) fn neighbors_wrapped(&self, row: u32, col: u32) -> u8 {
        let (w, h) = (self.width as u64, self.height as u64);
        let row_steps = [h - 1, 0, 1];
        let col_steps = [w - 1, 0, 1];
        let mut count = 0;
        for &delta_row in &row_steps[..h.min(3) as usize] {
            for &delta_col in &col_steps[..w.min(3) as usize] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let r = (row as u64 + delta_row) % h;
                let c = (col as u64 + delta_col) % w;
                count += self.cells[(r * w + c) as usize] as u8;
            }
        }
        count
    }

    /// Read-only view of the cell buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell buffer as bytes (`0` dead, `1` alive), without copying.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.cells.as_slice())
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Exchange the cell buffer with a next generation of identical length.
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<Cell>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their `(row, col)` positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| ((idx / width) as u32, (idx % width) as u32, cell))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.cells.chunks(self.width as usize) {
            for &cell in line {
                let symbol = if cell.is_alive() { '◼' } else { '◻' };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
