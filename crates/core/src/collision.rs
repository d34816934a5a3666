//! Collision resolver - classifies a candidate pose against the board
//!
//! Precedence is bottom/petrified over edge over clear. An edge hit is only
//! recorded and the scan continues, so a later cell of the same mask that
//! reaches the floor or a petrified cell still wins; this keeps a piece from
//! sliding along a wall into a position that should have locked it.

use crate::board::Board;
use crate::shapes::mask;
use crate::types::{Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

/// Outcome of testing one pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Clear,
    /// A cell lies left or right of the board
    Edge,
    /// A cell lies below the floor or on a petrified cell
    Bottom,
}

/// Classify the pose `(shape, rotation)` anchored at `(x, y)`.
///
/// Cells above the board (negative row) with an in-range column are clear.
pub fn classify(board: &Board, shape: ShapeId, rotation: Rotation, x: i32, y: i32) -> Collision {
    let mut result = Collision::Clear;

    for (row, cells) in mask(shape, rotation).iter().enumerate() {
        for (col, &occupied) in cells.iter().enumerate() {
            if !occupied {
                continue;
            }
            let (px, py) = (x + col as i32, y + row as i32);

            if py >= BOARD_HEIGHT as i32 {
                return Collision::Bottom;
            }
            if px < 0 || px >= BOARD_WIDTH as i32 {
                result = Collision::Edge;
                continue;
            }
            // Only in-range cells reach the board lookup.
            if py >= 0 && board.is_petrified(px, py) {
                return Collision::Bottom;
            }
        }
    }

    result
}
