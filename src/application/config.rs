use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{DEFAULT_MAX_TICKS_PER_FRAME, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, RunState};
use crate::domain::{Density, TickStrategy};

pub const DEFAULT_CELL_SIZE: u32 = 10;
pub const MAX_CELL_SIZE: u32 = 128;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cell size must be between 1 and 128 pixels, got {0}")]
    InvalidCellSize(u32),

    #[error("speed must be between 1 and 600 ticks per second, got {0}")]
    InvalidSpeed(f32),

    #[error("density must be between 0.0 and 1.0, got {0}")]
    InvalidDensity(f64),

    #[error("max_ticks_per_frame must be at least 1")]
    InvalidTickCap,
}

/// Tunables for one simulation session.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Edge of a cell square in pixels, excluding the 1px gutter
    pub cell_size: u32,
    pub initial_state: RunState,
    /// Ticks per second
    pub speed: f32,
    /// Probability that randomize makes a cell alive
    pub density: f64,
    /// Fixed seed for reproducible randomization
    pub seed: Option<u64>,
    pub max_ticks_per_frame: u32,
    pub strategy: TickStrategy,
    /// Fill the first grid randomly instead of leaving it empty
    pub randomize_on_start: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            initial_state: RunState::Running,
            speed: DEFAULT_SPEED,
            density: Density::HALF.probability(),
            seed: None,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            strategy: TickStrategy::Auto,
            randomize_on_start: true,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::InvalidTickCap);
        }
        self.density().map(|_| ())
    }

    pub fn density(&self) -> Result<Density, ConfigError> {
        Density::new(self.density).ok_or(ConfigError::InvalidDensity(self.density))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_state, RunState::Running);
        assert_eq!(config.cell_size, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            SimulationConfig::from_json_str(r#"{ "speed": 15.0, "initial_state": "paused" }"#)
                .unwrap();
        assert_eq!(config.speed, 15.0);
        assert_eq!(config.initial_state, RunState::Paused);
        assert_eq!(config.density, 0.5);
        assert_eq!(config.strategy, TickStrategy::Auto);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{ "cell_size": 0 }"#),
            Err(ConfigError::InvalidCellSize(0))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{ "density": 1.5 }"#),
            Err(ConfigError::InvalidDensity(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{ "speed": 0.0 }"#),
            Err(ConfigError::InvalidSpeed(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{ "max_ticks_per_frame": 0 }"#),
            Err(ConfigError::InvalidTickCap)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ speed: fast }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("life_canvas_{}.json", std::process::id()));
        fs::write(&path, r#"{ "seed": 99, "strategy": "serial" }"#).unwrap();
        let config = SimulationConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.strategy, TickStrategy::Serial);
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_json_file("/nonexistent/life.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
