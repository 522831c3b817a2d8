//! Core engine types: configuration, errors, RNG, cells, tiles and the board.
//!
//! Nothing in here knows about windows, drawing or input. A presentation
//! shell renders `Board::tiles` and feeds directions to the resolver.

pub mod board;
pub mod config;
pub mod error;
pub mod rng;
pub mod tile;

pub use board::Board;
pub use config::{is_tile_value, EngineConfig, Geometry, SpawnTable, CELLS, COLS, ROWS};
pub use error::EngineError;
pub use rng::GameRng;
pub use tile::{Cell, Rounding, Tile, TileId};
