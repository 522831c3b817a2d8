//! Grid cells and tiles.
//!
//! A `Tile` has two notions of position: the grid `Cell` it is filed
//! under on the board, and a continuous `(x, y)` used while it slides.
//! At rest the two agree (`x = col * cell_width`, `y = row * cell_height`).

use std::fmt;

use super::config::{is_tile_value, Geometry, COLS, ROWS};

/// A grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a cell, panicking if it lies outside the grid.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < ROWS && col < COLS, "cell ({row}, {col}) is off the board");
        Self { row, col }
    }

    /// Iterate over every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Cell { row, col }))
    }

    /// Row-major index in `0..CELLS`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * COLS + self.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Stable identity of a tile for the lifetime of a board.
///
/// Allocated by the board when the tile is spawned. Used to track which
/// tiles have already merged during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

/// Which way to round a continuous position back to a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Used when travelling toward lower coordinates.
    Ceil,
    /// Used when travelling toward higher coordinates.
    Floor,
}

impl Rounding {
    fn apply(self, pos: i32, size: i32) -> usize {
        let cell = match self {
            Rounding::Floor => pos.div_euclid(size),
            Rounding::Ceil => -(-pos).div_euclid(size),
        };
        cell.max(0) as usize
    }
}

/// A numbered tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub cell: Cell,
    /// Continuous horizontal position.
    pub x: i32,
    /// Continuous vertical position.
    pub y: i32,
}

impl Tile {
    /// Create a tile resting in `cell`.
    ///
    /// Panics if `value` is not a power of two of at least 2.
    #[must_use]
    pub fn new(id: TileId, value: u32, cell: Cell, geometry: &Geometry) -> Self {
        assert!(is_tile_value(value), "tile value {value} is not a power of two >= 2");
        Self {
            id,
            value,
            cell,
            x: cell.col as i32 * geometry.cell_width,
            y: cell.row as i32 * geometry.cell_height,
        }
    }

    /// Shift the continuous position by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Recompute the grid cell from the continuous position.
    pub fn snap(&mut self, rounding: Rounding, geometry: &Geometry) {
        let row = rounding.apply(self.y, geometry.cell_height).min(ROWS - 1);
        let col = rounding.apply(self.x, geometry.cell_width).min(COLS - 1);
        self.cell = Cell { row, col };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_rests_on_its_cell() {
        let g = Geometry::default();
        let tile = Tile::new(TileId(0), 8, Cell::new(2, 3), &g);
        assert_eq!((tile.x, tile.y), (600, 400));
    }

    #[test]
    #[should_panic(expected = "not a power of two")]
    fn test_rejects_non_power_of_two() {
        let _ = Tile::new(TileId(0), 6, Cell::new(0, 0), &Geometry::default());
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_cell_bounds() {
        let _ = Cell::new(4, 0);
    }

    #[test]
    fn test_snap_rounds_toward_travel_edge() {
        let g = Geometry::default();
        let mut tile = Tile::new(TileId(0), 2, Cell::new(0, 2), &g);

        // Travelling left: stays filed under the cell it is leaving
        tile.translate(-20, 0);
        tile.snap(Rounding::Ceil, &g);
        assert_eq!(tile.cell, Cell::new(0, 2));

        tile.translate(-180, 0);
        tile.snap(Rounding::Ceil, &g);
        assert_eq!(tile.cell, Cell::new(0, 1));

        // Travelling down: floor keeps it on the upper cell until it arrives
        let mut tile = Tile::new(TileId(1), 2, Cell::new(1, 0), &g);
        tile.translate(0, 180);
        tile.snap(Rounding::Floor, &g);
        assert_eq!(tile.cell, Cell::new(1, 0));
        tile.translate(0, 20);
        tile.snap(Rounding::Floor, &g);
        assert_eq!(tile.cell, Cell::new(2, 0));
    }

    #[test]
    fn test_all_cells_row_major() {
        let cells: Vec<_> = Cell::all().collect();
        assert_eq!(cells.len(), ROWS * COLS);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(1, 1));
        assert!(cells.iter().enumerate().all(|(i, c)| c.index() == i));
    }
}
