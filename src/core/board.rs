//! The 4x4 board: tile storage, spawning and occupancy bookkeeping.
//!
//! ## Invariants
//!
//! - At most one tile per cell.
//! - Every tile's `cell` matches the key it is stored under.
//!
//! ## Spawning
//!
//! A fresh board gets `initial_tiles` tiles of `initial_value` at distinct
//! random cells. After every move exactly one spawn is attempted via
//! `spawn_after_move`, which is also where the loss check lives.
//!
//! ```
//! use tile_merge::core::{Board, EngineConfig, GameRng};
//!
//! let mut rng = GameRng::new(7);
//! let board = Board::spawn_initial(&EngineConfig::default(), &mut rng);
//! assert_eq!(board.len(), 2);
//! assert!(board.tiles().all(|t| t.value == 2));
//! ```

use std::fmt;

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use super::config::{EngineConfig, Geometry, SpawnTable, CELLS, COLS, ROWS};
use super::tile::{Cell, Tile, TileId};
use crate::rules::MoveOutcome;

/// Grid of tiles keyed by cell.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: FxHashMap<Cell, Tile>,
    next_id: u32,
    geometry: Geometry,
    spawn_values: SpawnTable,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Board {
    /// Create an empty board.
    ///
    /// Panics if `config` fails `EngineConfig::validate`; a step that does
    /// not land tiles on cells would never let a move settle.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("board built from {err}");
        }
        Self {
            tiles: FxHashMap::default(),
            next_id: 0,
            geometry: config.geometry,
            spawn_values: config.spawn_values.clone(),
        }
    }

    /// Create a board and place the starting tiles.
    ///
    /// Cells are sampled without replacement, so the starting tiles never
    /// land on top of each other.
    #[must_use]
    pub fn spawn_initial<R: Rng + ?Sized>(config: &EngineConfig, rng: &mut R) -> Self {
        let mut board = Self::new(config);
        for _ in 0..config.initial_tiles {
            let cell = board.random_empty_cell(rng);
            board.insert(cell, config.initial_value);
        }
        board
    }

    /// Build a board from a row-major value grid. Zero means empty.
    ///
    /// ```
    /// use tile_merge::core::{Board, Cell};
    ///
    /// let board = Board::from_rows([
    ///     [2, 0, 0, 0],
    ///     [0, 4, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 8],
    /// ]);
    /// assert_eq!(board.len(), 3);
    /// assert_eq!(board.value_at(Cell::new(3, 3)), Some(8));
    /// ```
    #[must_use]
    pub fn from_rows(rows: [[u32; COLS]; ROWS]) -> Self {
        Self::from_rows_with(&EngineConfig::default(), rows)
    }

    /// Like `from_rows`, using the given configuration.
    #[must_use]
    pub fn from_rows_with(config: &EngineConfig, rows: [[u32; COLS]; ROWS]) -> Self {
        let mut board = Self::new(config);
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    board.insert(Cell::new(row, col), value);
                }
            }
        }
        board
    }

    /// Row-major value grid. Zero means empty.
    #[must_use]
    pub fn to_rows(&self) -> [[u32; COLS]; ROWS] {
        let mut rows = [[0; COLS]; ROWS];
        for tile in self.tiles.values() {
            rows[tile.cell.row][tile.cell.col] = tile.value;
        }
        rows
    }

    /// Place a new tile in an empty cell and return its id.
    ///
    /// Panics if the cell is already occupied.
    pub fn insert(&mut self, cell: Cell, value: u32) -> TileId {
        assert!(!self.tiles.contains_key(&cell), "cell {cell} is already occupied");
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.tiles.insert(cell, Tile::new(id, value, cell, &self.geometry));
        id
    }

    /// Uniformly rejection-sample a cell that holds no tile.
    ///
    /// Panics on a full board; callers must check `is_full` first.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        assert!(!self.is_full(), "no empty cell on a full board");
        loop {
            let cell = Cell {
                row: rng.gen_range(0..ROWS),
                col: rng.gen_range(0..COLS),
            };
            if !self.tiles.contains_key(&cell) {
                return cell;
            }
        }
    }

    /// Spawn the post-move tile and report whether the game is lost.
    ///
    /// A board that is already full gets no tile and is lost. Otherwise a
    /// tile drawn from the spawn table lands on a random empty cell, and the
    /// game is lost if that spawn filled the board.
    pub fn spawn_after_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> MoveOutcome {
        if self.is_full() {
            return MoveOutcome::Lost;
        }
        let cell = self.random_empty_cell(rng);
        let value = *self
            .spawn_values
            .choose(rng)
            .expect("spawn table is never empty");
        self.insert(cell, value);
        trace!("spawned {value} at {cell}");

        if self.is_full() {
            MoveOutcome::Lost
        } else {
            MoveOutcome::Continue
        }
    }

    /// Replace all tiles with the given set, keyed by their current cells.
    ///
    /// Panics if two tiles claim the same cell.
    pub(crate) fn replace_tiles<I: IntoIterator<Item = Tile>>(&mut self, tiles: I) {
        self.tiles.clear();
        for tile in tiles {
            let cell = tile.cell;
            let previous = self.tiles.insert(cell, tile);
            assert!(previous.is_none(), "two tiles resolved into cell {cell}");
        }
    }

    /// Tile at `cell`, if any.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    /// Value of the tile at `cell`, if any.
    #[must_use]
    pub fn value_at(&self, cell: Cell) -> Option<u32> {
        self.get(cell).map(|t| t.value)
    }

    /// Iterate over tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        Cell::all().filter_map(move |cell| self.tiles.get(&cell))
    }

    /// Iterate over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(move |cell| !self.tiles.contains_key(cell))
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True when every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles.len() == CELLS
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn value_sum(&self) -> u64 {
        self.tiles.values().map(|t| u64::from(t.value)).sum()
    }

    /// Largest tile value, or 0 on an empty board.
    #[must_use]
    pub fn highest_value(&self) -> u32 {
        self.tiles.values().map(|t| t.value).max().unwrap_or(0)
    }

    /// Geometry tiles slide through.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl PartialEq for Board {
    /// Boards are equal when they hold the same values in the same cells.
    fn eq(&self, other: &Self) -> bool {
        self.to_rows() == other.to_rows()
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.to_rows();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", "-".repeat(COLS * 8 - 1))?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { " ".repeat(7) } else { format!("{v:^7}") })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}
