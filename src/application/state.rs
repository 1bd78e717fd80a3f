use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Slowest selectable rate, in ticks per second
pub const MIN_SPEED: f32 = 1.0;
/// Fastest selectable rate, in ticks per second
pub const MAX_SPEED: f32 = 600.0;
/// One tick per frame on a 60 Hz display
pub const DEFAULT_SPEED: f32 = 60.0;
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 8;

/// Absorbs f32 rounding so `n` intervals of elapsed time yield `n` ticks.
const TICK_EPSILON: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Paused,
    #[default]
    Running,
}

/// Play/pause status plus the rate bookkeeping that turns frame time into ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    run_state: RunState,
    speed: f32,
    frame_accumulator: f32,
    max_ticks_per_frame: u32,
}

impl SimulationState {
    pub fn new(speed: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            run_state: RunState::Paused,
            speed: clamp_speed(speed).unwrap_or(DEFAULT_SPEED),
            frame_accumulator: 0.0,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Change run state. Time banked while running never carries over a pause.
    pub fn set_run_state(&mut self, run_state: RunState) {
        if run_state != self.run_state {
            self.frame_accumulator = 0.0;
        }
        self.run_state = run_state;
    }

    /// Ticks per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Update the rate, clamped to `[MIN_SPEED, MAX_SPEED]`.
    ///
    /// Returns the applied speed, or `None` when `value` is not finite and was
    /// ignored.
    pub fn set_speed(&mut self, value: f32) -> Option<f32> {
        let speed = clamp_speed(value)?;
        self.speed = speed;
        Some(speed)
    }

    pub fn max_ticks_per_frame(&self) -> u32 {
        self.max_ticks_per_frame
    }

    /// Nominal time between successive ticks, `1 / speed`.
    ///
    /// Once `speed` exceeds `max_ticks_per_frame` times the host frame rate
    /// the per-frame cap in [`SimulationState::advance`] bounds the real rate,
    /// so the observed interval stops shrinking there.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.speed)
    }

    /// Bank `elapsed` seconds and return how many ticks are now due.
    ///
    /// At most `max_ticks_per_frame` ticks are released per call; time beyond
    /// that is dropped so a stalled host does not trigger a burst of catch-up
    /// ticks. Always zero while paused.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        if elapsed.is_finite() && elapsed > 0.0 {
            self.frame_accumulator += elapsed;
        }

        let due = (self.frame_accumulator * self.speed + TICK_EPSILON).floor() as u32;
        if due > self.max_ticks_per_frame {
            self.frame_accumulator = 0.0;
            return self.max_ticks_per_frame;
        }
        self.frame_accumulator = (self.frame_accumulator - due as f32 / self.speed).max(0.0);
        due
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, DEFAULT_MAX_TICKS_PER_FRAME)
    }
}

fn clamp_speed(value: f32) -> Option<f32> {
    value.is_finite().then(|| value.clamp(MIN_SPEED, MAX_SPEED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(speed: f32, max_ticks: u32) -> SimulationState {
        let mut state = SimulationState::new(speed, max_ticks);
        state.set_run_state(RunState::Running);
        state
    }

    #[test]
    fn test_starts_paused() {
        let state = SimulationState::default();
        assert_eq!(state.run_state(), RunState::Paused);
        assert_eq!(state.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_no_ticks_while_paused() {
        let mut state = SimulationState::new(10.0, 8);
        assert_eq!(state.advance(5.0), 0);
    }

    #[test]
    fn test_accumulates_sub_interval_frames() {
        let mut state = running(10.0, 8);
        assert_eq!(state.advance(0.05), 0);
        assert_eq!(state.advance(0.05), 1);
        assert_eq!(state.advance(0.25), 2);
        assert_eq!(state.advance(0.05), 1);
    }

    #[test]
    fn test_one_tick_per_frame_at_frame_rate() {
        let mut state = running(60.0, 8);
        let total: u32 = (0..60).map(|_| state.advance(1.0 / 60.0)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_burst_is_capped() {
        let mut state = running(600.0, 8);
        assert_eq!(state.advance(1.0), 8);
        // the excess was dropped, not banked
        assert_eq!(state.advance(0.0), 0);
    }

    #[test]
    fn test_pause_drops_banked_time() {
        let mut state = running(10.0, 8);
        state.advance(0.09);
        state.set_run_state(RunState::Paused);
        state.set_run_state(RunState::Running);
        assert_eq!(state.advance(0.02), 0);
    }

    #[test]
    fn test_higher_speed_never_lengthens_interval() {
        let mut state = SimulationState::default();
        let mut previous = Duration::MAX;
        for speed in [0.5, 1.0, 2.0, 10.0, 30.0, 60.0, 240.0, 600.0, 1000.0] {
            state.set_speed(speed);
            let interval = state.tick_interval();
            assert!(interval <= previous, "speed {speed}: {interval:?} > {previous:?}");
            previous = interval;
        }
        assert!(
            SimulationState::new(20.0, 8).tick_interval()
                < SimulationState::new(10.0, 8).tick_interval()
        );
    }

    #[test]
    fn test_higher_speed_never_yields_fewer_ticks() {
        let frame = 1.0 / 60.0;
        let mut previous = 0;
        for speed in [1.0, 5.0, 30.0, 60.0, 120.0, 240.0, 480.0, 600.0] {
            let mut state = running(speed, 8);
            let ticks: u32 = (0..120).map(|_| state.advance(frame)).sum();
            assert!(ticks >= previous, "speed {speed}: {ticks} < {previous}");
            previous = ticks;
        }
        // past 8 ticks x 60 Hz the cap holds the real rate flat
        let mut capped = running(MAX_SPEED, 8);
        let ticks: u32 = (0..120).map(|_| capped.advance(frame)).sum();
        assert_eq!(ticks, 120 * 8);
    }

    #[test]
    fn test_set_speed_clamps_and_rejects_nan() {
        let mut state = SimulationState::default();
        assert_eq!(state.set_speed(0.0), Some(MIN_SPEED));
        assert_eq!(state.set_speed(1e9), Some(MAX_SPEED));
        assert_eq!(state.set_speed(f32::NAN), None);
        assert_eq!(state.speed(), MAX_SPEED);
    }

    #[test]
    fn test_set_speed_keeps_run_state() {
        let mut state = running(10.0, 8);
        state.set_speed(100.0);
        assert!(state.is_running());
    }
}
