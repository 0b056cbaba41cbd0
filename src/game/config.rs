use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest board the terminal layout can lay out (two columns per cell)
pub const MAX_GRID_SIZE: usize = 100;

/// Configuration for the game
///
/// Every field has a default, so a JSON file only needs to list the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square game grid, in cells
    pub grid_size: usize,
    /// Side of one cell on the drawing surface, in pixels
    pub cell_size: u32,

    /// Tick interval without any power-up (ms)
    pub base_tick_ms: u64,
    /// Tick interval while the slow power-up is active (ms)
    pub slow_tick_ms: u64,
    /// How long the slow power-up lasts (ms of elapsed ticks)
    pub slow_duration_ms: u64,

    /// Chance that a freshly spawned food is golden
    pub golden_food_chance: f64,
    /// Chance that eating food activates the slow power-up
    pub power_up_chance: f64,
    /// Rejection-sampling cap when placing food
    pub max_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_size: 20,
            base_tick_ms: 150,
            slow_tick_ms: 250,
            slow_duration_ms: 3000,
            golden_food_chance: 0.15,
            power_up_chance: 0.10,
            max_spawn_attempts: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize game config")?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid game config in {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err(String)` describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 4 {
            return Err(format!("grid_size must be at least 4, got {}", self.grid_size));
        }

        if self.grid_size > MAX_GRID_SIZE {
            return Err(format!(
                "grid_size must be at most {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            ));
        }

        if self.cell_size == 0 {
            return Err("cell_size must be at least 1".to_string());
        }

        if self.base_tick_ms == 0 {
            return Err("base_tick_ms must be at least 1".to_string());
        }

        if self.slow_tick_ms < self.base_tick_ms {
            return Err(format!(
                "slow_tick_ms ({}) cannot be shorter than base_tick_ms ({})",
                self.slow_tick_ms, self.base_tick_ms
            ));
        }

        if !(0.0..=1.0).contains(&self.golden_food_chance) {
            return Err(format!(
                "golden_food_chance must be in [0, 1], got {}",
                self.golden_food_chance
            ));
        }

        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(format!(
                "power_up_chance must be in [0, 1], got {}",
                self.power_up_chance
            ));
        }

        if self.max_spawn_attempts == 0 {
            return Err("max_spawn_attempts must be at least 1".to_string());
        }

        Ok(())
    }
}
