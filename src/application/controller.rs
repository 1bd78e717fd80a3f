use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use super::config::{ConfigError, SimulationConfig};
use super::scheduler::{FrameHandle, FrameScheduler, ScheduleError};
use super::state::{RunState, SimulationState};
use crate::domain::{Engine, Grid, GridError};
use crate::rendering::{Style, Surface, draw_frame};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// User-facing actions that map onto controller operations
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    TogglePlay,
    Reset,
    Randomize,
    /// Multiply the current speed by this factor
    AdjustSpeed(f32),
}

/// AnimationController owns one running simulation.
///
/// It holds the grid, the engine, play/pause state and the single pending
/// frame handle. Every cycle renders the current generation first and then
/// steps, so a change made between frames is drawn before it is evolved.
pub struct AnimationController<S: FrameScheduler> {
    grid: Grid,
    engine: Engine,
    state: SimulationState,
    scheduler: S,
    pending: Option<FrameHandle>,
    rng: StdRng,
    style: Style,
    generation: u64,
}

impl<S: FrameScheduler> AnimationController<S> {
    /// Build a paused controller with a `width x height` grid.
    ///
    /// The grid is randomized when the config asks for it. Call
    /// [`AnimationController::play`] to start the loop.
    pub fn new(
        width: u32,
        height: u32,
        config: &SimulationConfig,
        scheduler: S,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let grid = Grid::new(width, height)?;
        let engine = Engine::new(config.strategy).with_density(config.density()?);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut controller = Self {
            grid,
            engine,
            state: SimulationState::new(config.speed, config.max_ticks_per_frame),
            scheduler,
            pending: None,
            rng,
            style: Style::new(config.cell_size),
            generation: 0,
        };
        if config.randomize_on_start {
            controller.engine.randomize(&mut controller.grid, &mut controller.rng);
        }
        info!(
            "created {}x{} universe ({} strategy, {} ticks/s)",
            width,
            height,
            config.strategy.name(),
            controller.state.speed()
        );
        Ok(controller)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Ticks per second
    pub fn speed(&self) -> f32 {
        self.state.speed()
    }

    pub fn tick_interval(&self) -> Duration {
        self.state.tick_interval()
    }

    /// Generations stepped since the grid was last created, reset or randomized
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Draw the current generation
    pub fn render<T: Surface + ?Sized>(&self, surface: &mut T) {
        draw_frame(surface, &self.grid, &self.style);
    }

    /// Paused → Running: arm the first frame.
    ///
    /// If the host refuses the frame the controller stays paused.
    pub fn play(&mut self) -> Result<(), ScheduleError> {
        if self.state.is_running() {
            return Ok(());
        }
        let handle = self.scheduler.request_frame().inspect_err(|err| {
            warn!("cannot start animation: {err}");
        })?;
        self.pending = Some(handle);
        self.state.set_run_state(RunState::Running);
        info!("playing from generation {}", self.generation);
        Ok(())
    }

    /// Running → Paused, then redraw so the screen matches the engine exactly.
    pub fn pause<T: Surface + ?Sized>(&mut self, surface: &mut T) {
        self.halt();
        self.render(surface);
    }

    pub fn toggle_play<T: Surface + ?Sized>(&mut self, surface: &mut T) -> Result<(), ScheduleError> {
        if self.state.is_running() {
            self.pause(surface);
            Ok(())
        } else {
            self.play()
        }
    }

    /// Cancel the pending frame and mark the simulation paused.
    fn halt(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.state.is_running() {
            info!("paused at generation {}", self.generation);
        }
        self.state.set_run_state(RunState::Paused);
    }

    /// Replace the grid with an empty one of the new size and pause.
    ///
    /// Invalid dimensions change nothing, not even the run state.
    pub fn resize<T: Surface + ?Sized>(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut T,
    ) -> Result<(), GridError> {
        if let Err(err) = self.engine.resize(&mut self.grid, width, height) {
            warn!("ignoring resize: {err}");
            return Err(err);
        }
        self.halt();
        self.generation = 0;
        info!("resized universe to {width}x{height}");
        self.render(surface);
        Ok(())
    }

    /// Kill every cell; run state is kept
    pub fn reset<T: Surface + ?Sized>(&mut self, surface: &mut T) {
        self.engine.reset(&mut self.grid);
        self.generation = 0;
        debug!("universe cleared");
        self.render(surface);
    }

    /// Refill the grid randomly; run state is kept
    pub fn randomize<T: Surface + ?Sized>(&mut self, surface: &mut T) {
        self.engine.randomize(&mut self.grid, &mut self.rng);
        self.generation = 0;
        debug!("universe randomized, {} cells alive", self.grid.live_count());
        self.render(surface);
    }

    /// Flip one cell and redraw.
    ///
    /// While running, the flipped cell takes part in the next scheduled tick.
    pub fn toggle_cell<T: Surface + ?Sized>(
        &mut self,
        row: u32,
        col: u32,
        surface: &mut T,
    ) -> Result<(), GridError> {
        self.engine.toggle(&mut self.grid, row, col)?;
        trace!("toggled cell ({row}, {col})");
        self.render(surface);
        Ok(())
    }

    /// Change the tick rate. Applies from the next frame; run state unchanged.
    pub fn set_speed(&mut self, value: f32) {
        match self.state.set_speed(value) {
            Some(speed) => debug!("speed set to {speed} ticks/s"),
            None => warn!("ignoring non-finite speed {value}"),
        }
    }

    pub fn dispatch<T: Surface + ?Sized>(
        &mut self,
        command: Command,
        surface: &mut T,
    ) -> Result<(), ScheduleError> {
        match command {
            Command::TogglePlay => return self.toggle_play(surface),
            Command::Reset => self.reset(surface),
            Command::Randomize => self.randomize(surface),
            Command::AdjustSpeed(factor) => self.set_speed(self.state.speed() * factor),
        }
        Ok(())
    }

    /// Run one animation cycle for a frame the host scheduled.
    ///
    /// Frames other than the pending one (cancelled or superseded) are
    /// ignored and return `None`. Otherwise the current generation is drawn,
    /// the ticks due for `elapsed` seconds are applied and the next frame is
    /// requested. Returns the number of ticks applied.
    pub fn on_frame<T: Surface + ?Sized>(
        &mut self,
        handle: FrameHandle,
        elapsed: f32,
        surface: &mut T,
    ) -> Option<u32> {
        if self.pending != Some(handle) {
            trace!("dropping stale frame {}", handle.id());
            return None;
        }
        self.pending = None;
        if !self.state.is_running() {
            return None;
        }

        self.render(surface);
        let ticks = self.state.advance(elapsed);
        for _ in 0..ticks {
            self.engine.tick(&mut self.grid);
        }
        self.generation += u64::from(ticks);
        trace!("frame {}: {ticks} ticks, generation {}", handle.id(), self.generation);

        match self.scheduler.request_frame() {
            Ok(next) => self.pending = Some(next),
            Err(err) => {
                warn!("animation stopped, next frame refused: {err}");
                self.pause(surface);
            }
        }
        Some(ticks)
    }
}
