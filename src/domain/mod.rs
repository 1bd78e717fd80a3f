mod cell;
mod engine;
mod error;
mod grid;
mod strategy;

pub use cell::Cell;
pub use engine::{Density, Engine};
pub use error::GridError;
pub use grid::Grid;
pub use strategy::{PARALLEL_THRESHOLD, TickStrategy};
