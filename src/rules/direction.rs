//! Move directions and their per-direction rules.
//!
//! The pass algorithm in the resolver is written once. Everything that
//! differs between left, right, up and down comes from `Direction::rules`:
//!
//! | direction | primary key | order      | unit step | rounding |
//! |-----------|-------------|------------|-----------|----------|
//! | Left      | column      | ascending  | (-1, 0)   | ceil     |
//! | Right     | column      | descending | (+1, 0)   | floor    |
//! | Up        | row         | ascending  | (0, -1)   | ceil     |
//! | Down      | row         | descending | (0, +1)   | floor    |
//!
//! Gaps are measured as "advance": the continuous coordinate along the
//! axis of travel, negated for left and up, so a larger advance is always
//! closer to the target edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Cell, EngineError, Geometry, Rounding, Tile, COLS, ROWS};

/// A direction to slide tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Look up the strategy table entry for this direction.
    #[must_use]
    pub const fn rules(self) -> Rules {
        match self {
            Direction::Left => Rules {
                axis: Axis::Col,
                descending: false,
                unit: (-1, 0),
                rounding: Rounding::Ceil,
            },
            Direction::Right => Rules {
                axis: Axis::Col,
                descending: true,
                unit: (1, 0),
                rounding: Rounding::Floor,
            },
            Direction::Up => Rules {
                axis: Axis::Row,
                descending: false,
                unit: (0, -1),
                rounding: Rounding::Ceil,
            },
            Direction::Down => Rules {
                axis: Axis::Row,
                descending: true,
                unit: (0, 1),
                rounding: Rounding::Floor,
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

/// Grid axis a direction travels along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// Per-direction behaviour consumed by the pass algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Axis of travel; also the primary sort key.
    pub axis: Axis,
    /// Process tiles in descending primary-key order.
    pub descending: bool,
    /// Unit step `(dx, dy)` toward the target edge.
    pub unit: (i32, i32),
    /// How a moved tile's continuous position maps back to a cell.
    pub rounding: Rounding,
}

impl Rules {
    /// Primary sort key: the tile's coordinate along the axis of travel.
    #[must_use]
    pub fn primary_key(&self, cell: Cell) -> usize {
        match self.axis {
            Axis::Row => cell.row,
            Axis::Col => cell.col,
        }
    }

    /// True when `cell` already touches the target edge.
    #[must_use]
    pub fn at_boundary(&self, cell: Cell) -> bool {
        let (limit, key) = match self.axis {
            Axis::Row => (ROWS - 1, cell.row),
            Axis::Col => (COLS - 1, cell.col),
        };
        if self.descending {
            key == limit
        } else {
            key == 0
        }
    }

    /// The adjacent cell toward the target edge, if any.
    #[must_use]
    pub fn neighbor(&self, cell: Cell) -> Option<Cell> {
        if self.at_boundary(cell) {
            return None;
        }
        let (dx, dy) = self.unit;
        Some(Cell {
            row: cell.row.checked_add_signed(dy as isize)?,
            col: cell.col.checked_add_signed(dx as isize)?,
        })
    }

    /// Continuous position along the axis of travel, increasing toward the edge.
    #[must_use]
    pub fn advance(&self, tile: &Tile) -> i32 {
        let (dx, dy) = self.unit;
        tile.x * dx + tile.y * dy
    }

    /// Distance from `tile` forward to `ahead`, in continuous units.
    #[must_use]
    pub fn gap(&self, tile: &Tile, ahead: &Tile) -> i32 {
        self.advance(ahead) - self.advance(tile)
    }

    /// Size of a tile along the axis of travel.
    #[must_use]
    pub fn extent(&self, geometry: &Geometry) -> i32 {
        match self.axis {
            Axis::Row => geometry.cell_height,
            Axis::Col => geometry.cell_width,
        }
    }

    /// An equal-valued tile this far ahead is still too far to merge with;
    /// slide one step closer instead.
    #[must_use]
    pub fn must_close_before_merge(&self, tile: &Tile, ahead: &Tile, geometry: &Geometry) -> bool {
        self.gap(tile, ahead) > geometry.step
    }

    /// There is room to slide one step toward a tile we cannot merge with.
    #[must_use]
    pub fn has_room_to_slide(&self, tile: &Tile, ahead: &Tile, geometry: &Geometry) -> bool {
        self.gap(tile, ahead) > self.extent(geometry) + geometry.step
    }

    /// Step displacement `(dx, dy)` for one pass.
    #[must_use]
    pub fn delta(&self, geometry: &Geometry) -> (i32, i32) {
        let (dx, dy) = self.unit;
        (dx * geometry.step, dy * geometry.step)
    }
}
