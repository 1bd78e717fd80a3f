//! Selection of how a generation is computed.
//!
//! Every strategy yields the same next generation; they only differ in how
//! the per-cell work is spread across threads.

use serde::{Deserialize, Serialize};

/// Grids with at least this many cells are ticked in parallel under
/// [`TickStrategy::Auto`]. Below it the rayon fan-out costs more than it saves.
pub const PARALLEL_THRESHOLD: usize = 128 * 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickStrategy {
    /// Row-by-row on the calling thread
    Serial,
    /// Rows distributed over the rayon pool
    Parallel,
    /// Serial for small grids, parallel for large ones
    #[default]
    Auto,
}

impl TickStrategy {
    pub fn all() -> [TickStrategy; 3] {
        [TickStrategy::Serial, TickStrategy::Parallel, TickStrategy::Auto]
    }

    /// Display name for logs and the benchmark table
    pub fn name(&self) -> &'static str {
        match self {
            TickStrategy::Serial => "Serial",
            TickStrategy::Parallel => "Parallel",
            TickStrategy::Auto => "Auto",
        }
    }

    /// Whether a grid of `cell_count` cells should be ticked in parallel.
    pub fn is_parallel_for(&self, cell_count: usize) -> bool {
        match self {
            TickStrategy::Serial => false,
            TickStrategy::Parallel => true,
            TickStrategy::Auto => cell_count >= PARALLEL_THRESHOLD,
        }
    }
}
