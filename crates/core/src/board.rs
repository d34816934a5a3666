//! Board module - the 10x20 playfield plus its render shadow
//!
//! Each cell carries an explicit [`CellState`]. A second grid, the *shadow*,
//! records what the renderer was last told about every cell; the render-diff
//! emitter compares the two and is the only code that writes the shadow.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (top to bottom). Coordinates are `i32` so a piece anchored above the board
//! (negative y) or an accumulated input delta never overflows.

use crate::shapes::get_shape;
use crate::types::{
    CellState, DebugGrid, Rotation, ShapeId, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH,
};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

/// The game board - flat row-major storage for cells and shadow
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [CellState; BOARD_CELLS],
    shadow: [CellState; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; BOARD_CELLS],
            shadow: [CellState::Empty; BOARD_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * W + (x as usize))
    }

    #[inline(always)]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < W as i32 && y >= 0 && y < H as i32
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y); `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = state;
                true
            }
            None => false,
        }
    }

    /// In bounds and permanently occupied.
    pub fn is_petrified(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(CellState::Petrified))
    }

    /// A row is complete when none of its cells is `Empty`.
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= H {
            return false;
        }
        self.row(y).iter().all(|cell| !cell.is_empty())
    }

    pub fn row(&self, y: usize) -> &[CellState] {
        &self.cells[y * W..(y + 1) * W]
    }

    /// Overwrite a whole row (used by the row-clear flash).
    pub fn fill_row(&mut self, y: usize, state: CellState) {
        assert!(y < H, "row {y} outside board");
        self.cells[y * W..(y + 1) * W].fill(state);
    }

    /// Remove row `y`: every row above moves down by one, row 0 becomes empty.
    pub fn shift_down_into(&mut self, y: usize) {
        assert!(y < H, "row {y} outside board");

        // copy_within handles the overlapping ranges.
        for row in (1..=y).rev() {
            let src = (row - 1) * W;
            self.cells.copy_within(src..src + W, row * W);
        }
        self.cells[..W].fill(CellState::Empty);
    }

    /// Demote last frame's piece cells so the emitter can erase them.
    pub fn retire_active(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == CellState::Active {
                *cell = CellState::PreviouslyActive;
            }
        }
    }

    /// Draw a piece as `Active` at the given pose.
    ///
    /// Cells above the board are clipped. Returns the number of cells written.
    ///
    /// # Panics
    ///
    /// Panics if a visible cell would overwrite a petrified cell; the movement
    /// resolver only commits collision-free poses.
    pub fn place_active(&mut self, shape: ShapeId, rotation: Rotation, x: i32, y: i32) -> usize {
        self.retire_active();

        let mut written = 0;
        for (dx, dy) in get_shape(shape, rotation) {
            let (px, py) = (x + dx as i32, y + dy as i32);
            let Some(idx) = Self::index(px, py) else {
                continue;
            };
            assert!(
                self.cells[idx] != CellState::Petrified,
                "active piece overlaps petrified cell at ({px}, {py})"
            );
            self.cells[idx] = CellState::Active;
            written += 1;
        }
        written
    }

    /// Lock a piece into the board as `Petrified`.
    ///
    /// # Panics
    ///
    /// Panics if any cell of the piece lies outside the board.
    pub fn petrify(&mut self, shape: ShapeId, rotation: Rotation, x: i32, y: i32) {
        self.retire_active();

        for (dx, dy) in get_shape(shape, rotation) {
            let (px, py) = (x + dx as i32, y + dy as i32);
            assert!(
                self.set(px, py, CellState::Petrified),
                "petrified cell ({px}, {py}) outside board"
            );
        }
    }

    /// Number of petrified cells on the board.
    pub fn petrified_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellState::Petrified)
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// What the renderer currently shows for (x, y).
    pub fn shadow_get(&self, x: i32, y: i32) -> Option<CellState> {
        Self::index(x, y).map(|idx| self.shadow[idx])
    }

    pub(crate) fn shadow(&self) -> &[CellState] {
        &self.shadow
    }

    /// Record that the renderer is up to date: erased cells become `Empty`
    /// and the shadow takes a copy of the cells.
    pub(crate) fn settle(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == CellState::PreviouslyActive {
                *cell = CellState::Empty;
            }
        }
        self.shadow = self.cells;
    }

    /// Numeric dump for the debug overlay.
    pub fn debug_grid(&self) -> DebugGrid {
        let mut grid = [[0u8; W]; H];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * W + x].code();
            }
        }
        grid
    }

    /// Clear the entire board, shadow included
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
        self.shadow.fill(CellState::Empty);
    }

    /// Build a board from text rows for fixtures.
    ///
    /// Rows are aligned to the bottom of the board. `#` is petrified, `@` is
    /// active, `+` previously active, anything else empty. The shadow matches
    /// the cells, as if the board had just been rendered.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= H, "too many rows for board");
        let mut board = Self::new();
        let top = H - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(W).enumerate() {
                let state = match ch {
                    '#' => CellState::Petrified,
                    '@' => CellState::Active,
                    '+' => CellState::PreviouslyActive,
                    _ => CellState::Empty,
                };
                board.cells[(top + i) * W + x] = state;
            }
        }
        board.shadow = board.cells;
        board
    }

    /// Text rows in the `from_rows` alphabet (`.` for empty), top to bottom.
    pub fn to_rows(&self) -> Vec<String> {
        (0..H)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|c| match c {
                        CellState::Empty => '.',
                        CellState::Active => '@',
                        CellState::PreviouslyActive => '+',
                        CellState::Petrified => '#',
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
