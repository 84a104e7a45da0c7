use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Grid;

/// Smallest board that still fits the two-segment starting snake at `columns / 4`
pub const MIN_COLUMNS: i32 = 4;

/// Largest board that still fits a wide terminal at two characters per cell
pub const MAX_COLUMNS: i32 = 200;
pub const MAX_ROWS: i32 = 100;

/// Fastest clock `tick_interval` can represent with a non-zero period
pub const MAX_TICK_RATE: u32 = 1000;

/// Configuration for the game, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub columns: i32,
    /// Height of the game grid in cells
    pub rows: i32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Seed for food placement; a fresh thread RNG is used when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        // 600x400 pixels at 20 pixels per cell, 12 frames per second
        Self {
            columns: 30,
            rows: 20,
            tick_rate: 12,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows)
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.clamp(1, MAX_TICK_RATE)
    }

    /// Reject boards the starting snake cannot fit on or the terminal cannot show, and clocks
    /// that are stopped or too fast to tick
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns),
            "grid needs {} to {} columns, got {}",
            MIN_COLUMNS,
            MAX_COLUMNS,
            self.columns
        );
        ensure!(
            (1..=MAX_ROWS).contains(&self.rows),
            "grid needs 1 to {} rows, got {}",
            MAX_ROWS,
            self.rows
        );
        ensure!(
            (1..=MAX_TICK_RATE).contains(&self.tick_rate),
            "tick rate must be between 1 and {}, got {}",
            MAX_TICK_RATE,
            self.tick_rate
        );
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate().context("Invalid config file")?;
        Ok(config)
    }
}
