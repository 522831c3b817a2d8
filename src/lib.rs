//! # tile-merge
//!
//! Board simulation and move resolution for a sliding-tile merge puzzle
//! (the "2048" mechanic) on a 4x4 grid.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: No windowing, drawing or input handling. A shell
//!    renders `Board::tiles` and feeds `Direction`s in.
//!
//! 2. **Incremental settling**: Tiles move one step per pass, so slides and
//!    merges resolve the same way they animate.
//!
//! 3. **Injectable randomness**: Every call that spawns tiles is generic over
//!    `rand::Rng`; `GameRng` gives seeded, replayable games.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, RNG, cells, tiles and the board
//! - `rules`: Directions and the move resolver
//! - `game`: Session object and the `new_game` / `apply_move` contract

pub mod core;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, EngineConfig, EngineError, GameRng, Geometry, Tile, TileId, COLS, ROWS,
};

pub use crate::game::{apply_move, new_game, Game};

pub use crate::rules::{Direction, Merge, MoveOutcome, MoveResolver, Settlement};
