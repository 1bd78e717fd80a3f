mod config;
mod controller;
mod scheduler;
mod state;

pub use config::{ConfigError, DEFAULT_CELL_SIZE, MAX_CELL_SIZE, SimulationConfig};
pub use controller::{AnimationController, Command, SetupError};
pub use scheduler::{FrameClock, FrameHandle, FrameScheduler, ScheduleError};
pub use state::{
    DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, RunState, SimulationState,
};
