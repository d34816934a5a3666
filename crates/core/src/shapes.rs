//! Shape catalog - the seven 4x4 piece masks in all four rotations
//!
//! The table is written as ASCII art (`#` = occupied) and decoded into boolean
//! masks at compile time, so lookups are plain static indexing.

use crate::types::{Rotation, ShapeId, SHAPE_COUNT, SHAPE_SIZE};

const N: usize = SHAPE_SIZE as usize;

/// 4x4 occupancy mask, indexed `[row][column]`.
pub type Mask = [[bool; N]; N];

/// Offset (column, row) of an occupied mask cell relative to the anchor.
pub type MinoOffset = (i8, i8);

/// Occupied offsets of one rotation, in row-major scan order.
pub type PieceShape = [MinoOffset; 4];

type Art = [&'static str; N];

/// Indexed `[shape][rotation]`, rows top to bottom.
const ART: [[Art; 4]; SHAPE_COUNT as usize] = [
    // 0: O
    [
        ["    ", " ## ", " ## ", "    "],
        ["    ", " ## ", " ## ", "    "],
        ["    ", " ## ", " ## ", "    "],
        ["    ", " ## ", " ## ", "    "],
    ],
    // 1: T
    [
        ["    ", "### ", " #  ", "    "],
        [" #  ", " ## ", " #  ", "    "],
        [" #  ", "### ", "    ", "    "],
        [" #  ", "##  ", " #  ", "    "],
    ],
    // 2: I
    [
        ["    ", "####", "    ", "    "],
        [" #  ", " #  ", " #  ", " #  "],
        ["    ", "####", "    ", "    "],
        [" #  ", " #  ", " #  ", " #  "],
    ],
    // 3: L
    [
        ["    ", "### ", "#   ", "    "],
        [" #  ", " #  ", " ## ", "    "],
        ["  # ", "### ", "    ", "    "],
        ["##  ", " #  ", " #  ", "    "],
    ],
    // 4: J
    [
        ["    ", "### ", "  # ", "    "],
        [" ## ", " #  ", " #  ", "    "],
        ["#   ", "### ", "    ", "    "],
        [" #  ", " #  ", "##  ", "    "],
    ],
    // 5: S
    [
        [" ## ", "##  ", "    ", "    "],
        [" #  ", " ## ", "  # ", "    "],
        [" ## ", "##  ", "    ", "    "],
        [" #  ", " ## ", "  # ", "    "],
    ],
    // 6: Z
    [
        ["##  ", " ## ", "    ", "    "],
        ["  # ", " ## ", " #  ", "    "],
        ["##  ", " ## ", "    ", "    "],
        ["  # ", " ## ", " #  ", "    "],
    ],
];

const fn decode_mask(art: &Art) -> Mask {
    let mut mask = [[false; N]; N];
    let mut row = 0;
    while row < N {
        let bytes = art[row].as_bytes();
        let mut col = 0;
        while col < N {
            mask[row][col] = bytes[col] == b'#';
            col += 1;
        }
        row += 1;
    }
    mask
}

const fn decode_shape(art: &Art) -> PieceShape {
    let mut out = [(0i8, 0i8); 4];
    let mut count = 0;
    let mut row = 0;
    while row < N {
        let bytes = art[row].as_bytes();
        let mut col = 0;
        while col < N {
            if bytes[col] == b'#' {
                // Every mask has exactly four cells; a fifth fails const evaluation.
                out[count] = (col as i8, row as i8);
                count += 1;
            }
            col += 1;
        }
        row += 1;
    }
    assert!(count == 4, "shape art must have exactly four cells");
    out
}

const fn build_masks() -> [[Mask; 4]; SHAPE_COUNT as usize] {
    let mut out = [[[[false; N]; N]; 4]; SHAPE_COUNT as usize];
    let mut s = 0;
    while s < SHAPE_COUNT as usize {
        let mut r = 0;
        while r < 4 {
            out[s][r] = decode_mask(&ART[s][r]);
            r += 1;
        }
        s += 1;
    }
    out
}

const fn build_shapes() -> [[PieceShape; 4]; SHAPE_COUNT as usize] {
    let mut out = [[[(0i8, 0i8); 4]; 4]; SHAPE_COUNT as usize];
    let mut s = 0;
    while s < SHAPE_COUNT as usize {
        let mut r = 0;
        while r < 4 {
            out[s][r] = decode_shape(&ART[s][r]);
            r += 1;
        }
        s += 1;
    }
    out
}

static MASKS: [[Mask; 4]; SHAPE_COUNT as usize] = build_masks();
static SHAPES: [[PieceShape; 4]; SHAPE_COUNT as usize] = build_shapes();

/// Occupancy mask for a shape in a rotation.
pub fn mask(shape: ShapeId, rotation: Rotation) -> &'static Mask {
    &MASKS[shape.index()][rotation.index()]
}

/// The four occupied offsets for a shape in a rotation, row-major.
pub fn get_shape(shape: ShapeId, rotation: Rotation) -> PieceShape {
    SHAPES[shape.index()][rotation.index()]
}
