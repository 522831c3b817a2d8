//! Property tests for board and move invariants.

use proptest::prelude::*;
use tile_merge::core::CELLS;
use tile_merge::{Board, Cell, Direction, EngineConfig, GameRng, MoveOutcome, MoveResolver};

type Grid = [[u32; 4]; 4];

fn grid() -> impl Strategy<Value = Grid> {
    let value = prop::sample::select(vec![0u32, 0, 0, 2, 2, 4, 8, 16]);
    prop::array::uniform4(prop::array::uniform4(value))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn step() -> impl Strategy<Value = i32> {
    prop::sample::select(vec![5, 10, 20, 25, 40, 50, 100, 200])
}

/// Reference single-sweep shift of one line toward index 0.
fn shift_line(line: [u32; 4]) -> [u32; 4] {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut out = [0; 4];
    let (mut i, mut k) = (0, 0);
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[k] = tiles[i] * 2;
            i += 2;
        } else {
            out[k] = tiles[i];
            i += 1;
        }
        k += 1;
    }
    out
}

fn reference(rows: Grid, direction: Direction) -> Grid {
    let mut out = [[0; 4]; 4];
    for i in 0..4 {
        // Read each line starting from the target edge.
        let cell = |j: usize| match direction {
            Direction::Left => (i, j),
            Direction::Right => (i, 3 - j),
            Direction::Up => (j, i),
            Direction::Down => (3 - j, i),
        };
        let mut line = [0; 4];
        for (j, v) in line.iter_mut().enumerate() {
            let (r, c) = cell(j);
            *v = rows[r][c];
        }
        for (j, v) in shift_line(line).into_iter().enumerate() {
            let (r, c) = cell(j);
            out[r][c] = v;
        }
    }
    out
}

proptest! {
    #[test]
    fn settling_matches_reference_shift(rows in grid(), direction in direction(), step in step()) {
        let mut config = EngineConfig::default();
        config.geometry.step = step;
        let mut board = Board::from_rows_with(&config, rows);

        MoveResolver::new().settle(&mut board, direction);

        prop_assert_eq!(board.to_rows(), reference(rows, direction));
    }

    #[test]
    fn settled_tiles_rest_on_their_cells(rows in grid(), direction in direction()) {
        let mut board = Board::from_rows(rows);
        MoveResolver::new().settle(&mut board, direction);

        let g = *board.geometry();
        for tile in board.tiles() {
            prop_assert_eq!(tile.x, tile.cell.col as i32 * g.cell_width);
            prop_assert_eq!(tile.y, tile.cell.row as i32 * g.cell_height);
            prop_assert_eq!(board.get(tile.cell).map(|t| t.id), Some(tile.id));
        }
    }

    #[test]
    fn settling_conserves_value(rows in grid(), direction in direction()) {
        let mut board = Board::from_rows(rows);
        let before = board.value_sum();
        let settlement = MoveResolver::new().settle(&mut board, direction);

        prop_assert_eq!(board.value_sum(), before);
        prop_assert_eq!(board.len() + settlement.merges.len(), Board::from_rows(rows).len());
    }

    #[test]
    fn second_settle_is_quiet(rows in grid(), direction in direction()) {
        let mut board = Board::from_rows(rows);
        let resolver = MoveResolver::new();
        resolver.settle(&mut board, direction);
        let settled = board.to_rows();

        let again = resolver.settle(&mut board, direction);
        prop_assert!(!again.changed || !again.merges.is_empty());
        if again.merges.is_empty() {
            prop_assert_eq!(board.to_rows(), settled);
        }
    }

    #[test]
    fn resolve_spawns_exactly_once(rows in grid(), direction in direction(), seed in any::<u64>()) {
        let mut board = Board::from_rows(rows);
        let mut settled = board.clone();
        MoveResolver::new().settle(&mut settled, direction);

        let outcome = MoveResolver::new().resolve(&mut board, direction, &mut GameRng::new(seed));

        if settled.is_full() {
            prop_assert_eq!(outcome, MoveOutcome::Lost);
            prop_assert_eq!(board.to_rows(), settled.to_rows());
        } else {
            prop_assert_eq!(board.len(), settled.len() + 1);
            let added: Vec<Cell> = Cell::all()
                .filter(|&c| settled.get(c).is_none() && board.get(c).is_some())
                .collect();
            prop_assert_eq!(added.len(), 1);
            prop_assert!(matches!(board.value_at(added[0]), Some(2 | 4)));
            prop_assert_eq!(outcome == MoveOutcome::Lost, board.len() == CELLS);
        }
    }

    #[test]
    fn spawn_initial_is_two_distinct_twos(seed in any::<u64>()) {
        let board = Board::spawn_initial(&EngineConfig::default(), &mut GameRng::new(seed));
        prop_assert_eq!(board.len(), 2);
        prop_assert!(board.tiles().all(|t| t.value == 2));
    }
}
