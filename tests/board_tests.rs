//! Board tests - cell states, active piece drawing and row shifting

use termtris::core::{get_shape, Board};
use termtris::types::{CellState, Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

fn shape(n: u8) -> ShapeId {
    ShapeId::new(n).unwrap()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(CellState::Empty), "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, CellState::Petrified));
    assert_eq!(board.get(5, 10), Some(CellState::Petrified));
    assert!(board.is_petrified(5, 10));

    assert!(board.set(5, 10, CellState::Empty));
    assert!(!board.is_petrified(5, 10));

    assert!(!board.set(10, 0, CellState::Petrified));
}

#[test]
fn test_place_active_draws_all_four_cells() {
    for id in ShapeId::ALL {
        for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
            let mut board = Board::new();
            assert_eq!(board.place_active(id, rotation, 3, 8), 4);
            for (dx, dy) in get_shape(id, rotation) {
                assert_eq!(
                    board.get(3 + dx as i32, 8 + dy as i32),
                    Some(CellState::Active)
                );
            }
        }
    }
}

#[test]
fn test_petrify_replaces_active_frame() {
    let mut board = Board::new();
    board.place_active(shape(0), Rotation::North, 3, 17);
    board.petrify(shape(0), Rotation::North, 3, 17);

    assert_eq!(board.petrified_count(), 4);
    assert!(board.cells().iter().all(|c| *c != CellState::Active));
}

#[test]
fn test_row_completion_counts_any_non_empty_state() {
    let board = Board::from_rows(&["####@@++##", "#########."]);
    assert!(board.is_row_complete(18));
    assert!(!board.is_row_complete(19));
}

#[test]
fn test_shift_down_into_moves_rows_above() {
    let mut board = Board::from_rows(&[
        "#.........",
        ".#........",
        "..#.......",
    ]);
    board.shift_down_into(18);

    let rows = board.to_rows();
    assert_eq!(rows[19], "..#.......");
    assert_eq!(rows[18], "#.........");
    assert_eq!(rows[17], "..........");
}

#[test]
fn test_debug_grid_reports_raw_codes() {
    let board = Board::from_rows(&["#@+......."]);
    let grid = board.debug_grid();
    assert_eq!(&grid[19][..4], &[4, 1, 2, 0]);
}
