use rand::Rng;
use rayon::prelude::*;

use super::{Cell, Grid, GridError, TickStrategy};

/// Probability that a randomized cell comes up alive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(f64);

impl Density {
    pub const HALF: Density = Density(0.5);

    /// Accepts probabilities in `0.0..=1.0`; anything else (including NaN) is `None`.
    pub fn new(probability: f64) -> Option<Self> {
        (0.0..=1.0).contains(&probability).then_some(Self(probability))
    }

    pub fn probability(self) -> f64 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::HALF
    }
}

/// Engine applies the transition rule and the direct grid mutations.
///
/// It keeps a scratch buffer between ticks so stepping does not allocate once
/// the grid size is stable.
#[derive(Debug, Default)]
pub struct Engine {
    strategy: TickStrategy,
    density: Density,
    scratch: Vec<Cell>,
}

impl Engine {
    pub fn new(strategy: TickStrategy) -> Self {
        Self {
            strategy,
            density: Density::default(),
            scratch: Vec::new(),
        }
    }

    /// Set the alive probability used by [`Engine::randomize`] (builder pattern)
    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn strategy(&self) -> TickStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: TickStrategy) {
        self.strategy = strategy;
    }

    pub fn density(&self) -> Density {
        self.density
    }

    /// Advance `grid` by one generation.
    ///
    /// Every next value is read from the untouched current buffer and written
    /// into scratch; the two buffers are swapped only once all rows are done.
    pub fn tick(&mut self, grid: &mut Grid) {
        let len = grid.len();
        if self.scratch.len() != len {
            self.scratch.clear();
            self.scratch.resize(len, Cell::Dead);
        }
        let width = grid.width() as usize;
        let parallel = self.strategy.is_parallel_for(len);

        let snapshot: &Grid = grid;
        if parallel {
            self.scratch
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| evolve_row(snapshot, row as u32, out));
        } else {
            self.scratch
                .chunks_mut(width)
                .enumerate()
                .for_each(|(row, out)| evolve_row(snapshot, row as u32, out));
        }

        grid.swap_cells(&mut self.scratch);
    }

    /// Replace `grid` with an all-dead grid of the new size.
    ///
    /// The new buffer is built before the swap; on error `grid` is untouched.
    pub fn resize(&mut self, grid: &mut Grid, width: u32, height: u32) -> Result<(), GridError> {
        *grid = Grid::new(width, height)?;
        self.scratch.clear();
        Ok(())
    }

    /// Kill every cell, keeping the dimensions
    pub fn reset(&self, grid: &mut Grid) {
        grid.cells_mut().fill(Cell::Dead);
    }

    /// Independently set each cell alive with the configured density
    pub fn randomize(&self, grid: &mut Grid, rng: &mut impl Rng) {
        let p = self.density.probability();
        grid.cells_mut().iter_mut().for_each(|cell| {
            *cell = if rng.random_bool(p) { Cell::Alive } else { Cell::Dead };
        });
    }

    /// Flip a single cell
    pub fn toggle(&self, grid: &mut Grid, row: u32, col: u32) -> Result<(), GridError> {
        let current = grid.get(row, col)?;
        grid.set(row, col, current.toggle())
    }
}

/// Compute one output row from the frozen current generation.
fn evolve_row(grid: &Grid, row: u32, out: &mut [Cell]) {
    let start = row as usize * grid.width() as usize;
    let current = &grid.cells()[start..start + out.len()];
    for (col, (next, &cell)) in out.iter_mut().zip(current).enumerate() {
        *next = cell.evolve(grid.neighbors_wrapped(row, col as u32));
    }
}
