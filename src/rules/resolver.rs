//! Move resolution.
//!
//! A move runs in passes. Each pass visits every tile once, nearest the
//! target edge first, and lets it take at most one incremental action:
//! slide one step, merge into the tile ahead, or stay. Passes repeat until
//! one changes nothing, then exactly one spawn is attempted.
//!
//! ## Pass rules
//!
//! For each tile not already at the edge, look up the tile filed under the
//! adjacent cell toward the edge (as of the start of the pass):
//!
//! - No tile there: slide one step.
//! - Equal value, and neither tile has merged this move: if the gap is
//!   larger than one step, slide one step closer; otherwise merge. The
//!   tile ahead doubles, the sliding tile is removed.
//! - Otherwise slide only if the gap exceeds a tile's extent plus a step.
//!
//! A tile that slides is refiled under the cell its continuous position
//! rounds to toward the edge. A slide that would file it under a cell held
//! by another tile is not taken this pass.

use std::fmt;

use log::{debug, trace};
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::direction::{Direction, Rules};
use crate::core::{Board, Cell, Tile, TileId, CELLS};

/// Result of a move, as seen by the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Play continues.
    Continue,
    /// The board is full.
    Lost,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_lost(self) -> bool {
        self == MoveOutcome::Lost
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Continue => f.write_str("continue"),
            MoveOutcome::Lost => f.write_str("lost"),
        }
    }
}

/// A merge performed during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    /// Surviving tile.
    pub into: TileId,
    /// Tile that was absorbed.
    pub absorbed: TileId,
    /// Cell of the surviving tile when the merge happened.
    pub cell: Cell,
    /// Value after doubling.
    pub value: u32,
}

/// What the pass loop did to the board, before any spawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Passes run, including the final pass that changed nothing.
    pub passes: usize,
    /// Merges in the order they happened.
    pub merges: Vec<Merge>,
    /// True if any tile slid or merged.
    pub changed: bool,
}

type WorkingSet = SmallVec<[Tile; CELLS]>;

/// Resolves a directional move against a board.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveResolver;

impl MoveResolver {
    /// Create a new move resolver.
    pub fn new() -> Self {
        Self
    }

    /// Slide and merge until settled, then attempt the post-move spawn.
    ///
    /// The spawn happens even when nothing moved.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        direction: Direction,
        rng: &mut R,
    ) -> MoveOutcome {
        let settlement = self.settle(board, direction);
        let outcome = board.spawn_after_move(rng);
        debug!(
            "move {direction}: {} passes, {} merges, changed={}, outcome={outcome}",
            settlement.passes,
            settlement.merges.len(),
            settlement.changed
        );
        outcome
    }

    /// Run passes until one changes nothing. No tile is spawned.
    pub fn settle(&self, board: &mut Board, direction: Direction) -> Settlement {
        let rules = direction.rules();
        let mut merged: FxHashSet<TileId> = FxHashSet::default();
        let mut settlement = Settlement::default();

        loop {
            settlement.passes += 1;
            let changed = self.run_pass(board, &rules, &mut merged, &mut settlement.merges);
            trace!("{direction} pass {}: changed={changed}", settlement.passes);
            if !changed {
                break;
            }
            settlement.changed = true;
        }

        settlement
    }

    /// One pass over every tile. Returns true if anything slid or merged.
    fn run_pass(
        &self,
        board: &mut Board,
        rules: &Rules,
        merged: &mut FxHashSet<TileId>,
        merges: &mut Vec<Merge>,
    ) -> bool {
        let geometry = *board.geometry();
        let (dx, dy) = rules.delta(&geometry);

        let mut working: WorkingSet = board.tiles().copied().collect();
        // Stable sort over row-major order keeps ties deterministic.
        if rules.descending {
            working.sort_by(|a, b| rules.primary_key(b.cell).cmp(&rules.primary_key(a.cell)));
        } else {
            working.sort_by_key(|t| rules.primary_key(t.cell));
        }

        // Neighbour lookups see cells as filed at the start of the pass;
        // occupancy tracks where tiles are filed right now.
        let mut filed: FxHashMap<Cell, usize> =
            working.iter().enumerate().map(|(i, t)| (t.cell, i)).collect();
        let mut occupied = filed.clone();
        let mut absorbed = [false; CELLS];
        let mut changed = false;

        for i in 0..working.len() {
            let tile = working[i];
            let Some(next_cell) = rules.neighbor(tile.cell) else {
                continue;
            };

            let slide = match filed.get(&next_cell).copied() {
                None => true,
                Some(j) => {
                    let ahead = working[j];
                    let can_merge = tile.value == ahead.value
                        && !merged.contains(&tile.id)
                        && !merged.contains(&ahead.id);
                    if can_merge {
                        if rules.must_close_before_merge(&tile, &ahead, &geometry) {
                            true
                        } else {
                            working[j].value *= 2;
                            merged.insert(ahead.id);
                            absorbed[i] = true;
                            filed.remove(&tile.cell);
                            occupied.remove(&tile.cell);
                            merges.push(Merge {
                                into: ahead.id,
                                absorbed: tile.id,
                                cell: ahead.cell,
                                value: working[j].value,
                            });
                            trace!(
                                "merged {} into {} at {}",
                                tile.value,
                                working[j].value,
                                ahead.cell
                            );
                            changed = true;
                            false
                        }
                    } else {
                        rules.has_room_to_slide(&tile, &ahead, &geometry)
                    }
                }
            };

            if slide {
                let mut moved = tile;
                moved.translate(dx, dy);
                moved.snap(rules.rounding, &geometry);
                if moved.cell != tile.cell {
                    if occupied.get(&moved.cell).is_some_and(|&k| k != i) {
                        continue;
                    }
                    occupied.remove(&tile.cell);
                    occupied.insert(moved.cell, i);
                }
                working[i] = moved;
                changed = true;
            }
        }

        board.replace_tiles(
            working
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !absorbed[*i])
                .map(|(_, t)| t),
        );
        changed
    }
}
