// Domain layer - grid state and the transition rule
pub mod domain;

// Application layer - animation loop, scheduling and configuration
pub mod application;

// Adapters - drawing and input mapping
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, Density, Engine, Grid, GridError, TickStrategy};
pub use application::{AnimationController, Command, FrameClock, RunState, SimulationConfig};
pub use rendering::{DisplayList, Style, Surface};
