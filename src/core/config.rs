//! Engine configuration.
//!
//! The grid is fixed at `ROWS` x `COLS`. Cell size, per-pass step and the
//! spawn table live in `EngineConfig` so a shell or the self-play driver
//! can tune them.
//!
//! ```
//! use tile_merge::core::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.geometry.step, 20);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::EngineError;

/// Number of grid rows.
pub const ROWS: usize = 4;

/// Number of grid columns.
pub const COLS: usize = 4;

/// Number of cells on the board.
pub const CELLS: usize = ROWS * COLS;

/// Continuous geometry used while tiles slide between cells.
///
/// Positions are measured in the same units as the cell size, so a tile
/// resting in column `c` sits at `x = c * cell_width`. `step` must divide
/// both cell dimensions so a sliding tile comes to rest exactly on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    /// Width of one cell.
    #[serde(default = "defaults::cell_width")]
    pub cell_width: i32,
    /// Height of one cell.
    #[serde(default = "defaults::cell_height")]
    pub cell_height: i32,
    /// Distance a tile travels in a single pass.
    #[serde(default = "defaults::step")]
    pub step: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            cell_width: defaults::cell_width(),
            cell_height: defaults::cell_height(),
            step: defaults::step(),
        }
    }
}

/// Table of values a post-move spawn draws from.
pub type SpawnTable = SmallVec<[u32; 4]>;

/// Full engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub geometry: Geometry,

    /// Values drawn uniformly for the tile spawned after every move.
    #[serde(default = "defaults::spawn_values")]
    pub spawn_values: SpawnTable,

    /// Tiles placed on a fresh board.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,

    /// Value of each tile placed on a fresh board.
    #[serde(default = "defaults::initial_value")]
    pub initial_value: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            spawn_values: defaults::spawn_values(),
            initial_tiles: defaults::initial_tiles(),
            initial_value: defaults::initial_value(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), EngineError> {
        let g = &self.geometry;
        if g.cell_width <= 0 || g.cell_height <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "cell size must be positive, got {}x{}",
                g.cell_width, g.cell_height
            )));
        }
        if g.step <= 0 || g.cell_width % g.step != 0 || g.cell_height % g.step != 0 {
            return Err(EngineError::InvalidConfig(format!(
                "step {} must be positive and divide the cell size {}x{}",
                g.step, g.cell_width, g.cell_height
            )));
        }
        if self.spawn_values.is_empty() {
            return Err(EngineError::InvalidConfig("spawn table is empty".into()));
        }
        if let Some(bad) = self.spawn_values.iter().find(|v| !is_tile_value(**v)) {
            return Err(EngineError::InvalidConfig(format!(
                "spawn value {bad} is not a power of two >= 2"
            )));
        }
        if !is_tile_value(self.initial_value) {
            return Err(EngineError::InvalidConfig(format!(
                "initial value {} is not a power of two >= 2",
                self.initial_value
            )));
        }
        if self.initial_tiles > CELLS {
            return Err(EngineError::InvalidConfig(format!(
                "{} initial tiles do not fit on a {ROWS}x{COLS} board",
                self.initial_tiles
            )));
        }
        Ok(())
    }
}

/// True for values a tile may hold: powers of two, at least 2.
#[must_use]
pub const fn is_tile_value(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

mod defaults {
    use super::SpawnTable;
    use smallvec::smallvec;

    pub fn cell_width() -> i32 { 200 }
    pub fn cell_height() -> i32 { 200 }
    pub fn step() -> i32 { 20 }
    pub fn spawn_values() -> SpawnTable { smallvec![2, 4] }
    pub fn initial_tiles() -> usize { 2 }
    pub fn initial_value() -> u32 { 2 }
}
