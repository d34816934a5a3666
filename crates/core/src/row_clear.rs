//! Row-clear engine - finds completed rows, blinks them, and compacts the board
//!
//! The flash and the pause between passes need a renderer and a clock, so the
//! game loop drives the passes; this module only mutates the board.

use arrayvec::ArrayVec;
use log::info;

use crate::board::Board;
use crate::types::{CellState, BOARD_HEIGHT, FLASH_PASSES};

/// Indices of completed rows, top to bottom.
pub type CompletedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// Scan top to bottom for rows with no empty cell.
pub fn complete_rows(board: &Board) -> CompletedRows {
    (0..BOARD_HEIGHT as usize)
        .filter(|&y| board.is_row_complete(y))
        .collect()
}

/// Visual state of the flashing rows for a pass (0-based).
///
/// The first pass blanks the rows, the second draws them solid again.
pub fn flash_state(pass: u8) -> CellState {
    if pass % 2 == 0 {
        CellState::PreviouslyActive
    } else {
        CellState::Active
    }
}

/// Paint one flash pass onto the completed rows.
pub fn flash_pass(board: &mut Board, rows: &[usize], pass: u8) {
    debug_assert!(pass < FLASH_PASSES);
    let state = flash_state(pass);
    for &y in rows {
        board.fill_row(y, state);
    }
}

/// Remove the completed rows and compact everything above them.
///
/// `rows` must be ascending. Each row shifts only the rows above it, so
/// earlier (higher) removals never disturb the later (lower) indices.
/// Returns the number of rows removed.
pub fn remove_rows(board: &mut Board, rows: &[usize]) -> u32 {
    debug_assert!(rows.windows(2).all(|w| w[0] < w[1]));
    for &y in rows {
        board.shift_down_into(y);
    }
    if !rows.is_empty() {
        info!("cleared {} row(s): {:?}", rows.len(), rows);
    }
    rows.len() as u32
}
