use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use life_canvas::{
    AnimationController, DisplayList, FrameClock, RunState, SimulationConfig,
    input::{self, PointerEvent, SurfaceRect, keyboard},
    rendering::{present::present, surface_size},
};
use log::{debug, error, info, warn};
use macroquad::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Conway's Game of Life on a wrap-around grid")]
struct Args {
    /// JSON settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// start paused instead of running
    #[arg(long)]
    paused: bool,

    /// ticks per second
    #[arg(long)]
    speed: Option<f32>,

    /// chance that randomize makes a cell alive (0.0 - 1.0)
    #[arg(long)]
    density: Option<f64>,

    /// seed for reproducible randomization
    #[arg(long)]
    seed: Option<u64>,

    /// cell edge in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// start with an empty grid
    #[arg(long)]
    empty: bool,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if self.paused {
            config.initial_state = RunState::Paused;
        }
        if self.empty {
            config.randomize_on_start = false;
        }
        config.speed = self.speed.unwrap_or(config.speed);
        config.density = self.density.unwrap_or(config.density);
        config.cell_size = self.cell_size.unwrap_or(config.cell_size);
        config.seed = self.seed.or(config.seed);
        config.validate().context("invalid settings")?;
        Ok(config)
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Game of Life".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// The surface is drawn 1:1 from the window origin.
fn displayed_rect(controller: &AnimationController<FrameClock>) -> SurfaceRect {
    let (width, height) = controller.grid().dimensions();
    let (w, h) = surface_size(width, height, controller.style().cell_size);
    SurfaceRect::new(0.0, 0.0, w as f32, h as f32)
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Args::parse().into_config()?;

    let mut viewport = (screen_width(), screen_height());
    let (width, height) =
        input::grid_dimensions_for_viewport(viewport.0, viewport.1, config.cell_size);
    let mut controller = AnimationController::new(width, height, &config, FrameClock::new())
        .context("cannot create universe")?;

    let mut surface = DisplayList::new();
    controller.render(&mut surface);
    if config.initial_state == RunState::Running {
        controller.play().context("cannot start animation")?;
    }
    info!("{}", keyboard::help());

    loop {
        let current = (screen_width(), screen_height());
        if current != viewport {
            viewport = current;
            let (w, h) = input::grid_dimensions_for_viewport(current.0, current.1, config.cell_size);
            // A rejected size keeps the old grid.
            if let Err(err) = controller.resize(w, h, &mut surface) {
                debug!("viewport {}x{} not applied: {err}", current.0, current.1);
            }
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            let event = PointerEvent::new(x, y);
            let rect = displayed_rect(&controller);
            if rect.contains(event) {
                let (row, col) =
                    input::pointer_to_cell(event, rect, controller.grid(), controller.style());
                controller.toggle_cell(row, col, &mut surface)?;
            }
        }

        for command in keyboard::pressed_commands() {
            if let Err(err) = controller.dispatch(command, &mut surface) {
                warn!("{command:?} failed: {err}");
            }
        }

        if let Some(handle) = controller.scheduler_mut().take_due() {
            controller.on_frame(handle, get_frame_time(), &mut surface);
        }

        clear_background(WHITE);
        present(&surface);
        next_frame().await;
    }
}
