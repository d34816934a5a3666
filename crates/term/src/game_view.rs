//! GameView: paints render commands into the game window framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Window layout (columns/rows relative to the view origin):
//!
//! ```text
//!  0         18                   39     45       54
//!  |          ......................
//!  debug grid :  playfield, 2 cols  :      ..........
//!  (10 digits):  per board cell     :      : preview:
//!             :                     :      :........:
//!             :.....................:      Rows = N
//! ```

use crate::core::mask;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{
    CellState, DebugGrid, RenderCommand, Rotation, ShapeId, BOARD_HEIGHT, BOARD_WIDTH, SHAPE_SIZE,
};

/// Columns per board cell.
const CELL_W: u16 = 2;

const FIELD_LEFT: u16 = 18;
const FIELD_TOP: u16 = 0;
const FIELD_RIGHT: u16 = FIELD_LEFT + BOARD_WIDTH as u16 * CELL_W + 1;
const FIELD_BOTTOM: u16 = FIELD_TOP + BOARD_HEIGHT as u16 + 1;

const PREVIEW_LEFT: u16 = 45;
const PREVIEW_RIGHT: u16 = PREVIEW_LEFT + SHAPE_SIZE as u16 * CELL_W + 1;
const PREVIEW_TOP: u16 = 12;
const PREVIEW_BOTTOM: u16 = 19;
/// First row of the 4x4 preview mask
const PREVIEW_MASK_TOP: u16 = 15;

const SCORE_LABEL: &str = "Rows = ";
const SCORE_ROW: u16 = FIELD_BOTTOM;

/// Total window size, with room for a long score.
pub const WINDOW_WIDTH: u16 = PREVIEW_RIGHT + 8;
pub const WINDOW_HEIGHT: u16 = FIELD_BOTTOM + 1;

/// Places the game window in a framebuffer and paints commands into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameView {
    origin_x: u16,
    origin_y: u16,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the whole window by `(x, y)`.
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Framebuffer size that fits the window at this origin.
    pub fn required_size(&self) -> (u16, u16) {
        (self.origin_x + WINDOW_WIDTH, self.origin_y + WINDOW_HEIGHT)
    }

    /// Paint one command.
    pub fn apply(&self, fb: &mut FrameBuffer, cmd: &RenderCommand) {
        match *cmd {
            RenderCommand::ClearAndDrawFrame => {
                fb.clear();
                self.draw_outline(fb);
            }
            RenderCommand::SetCell { x, y, state } => self.draw_board_cell(fb, x, y, state),
            RenderCommand::SetScore(rows) => self.draw_score(fb, rows),
            RenderCommand::SetPreview(shape) => self.draw_preview(fb, shape),
            RenderCommand::DrawDebugGrid(ref grid) => self.draw_debug_grid(fb, grid),
        }
    }

    /// Screen position of the left column of board cell `(x, y)`.
    pub fn board_cell_origin(&self, x: u8, y: u8) -> (u16, u16) {
        (
            self.origin_x + FIELD_LEFT + 1 + x as u16 * CELL_W,
            self.origin_y + FIELD_TOP + 1 + y as u16,
        )
    }

    fn put(&self, fb: &mut FrameBuffer, x: u16, y: u16, ch: char, style: CellStyle) {
        fb.put_char(self.origin_x + x, self.origin_y + y, ch, style);
    }

    fn draw_box(&self, fb: &mut FrameBuffer, left: u16, top: u16, right: u16, bottom: u16) {
        let style = CellStyle::BORDER;
        for x in left..=right {
            self.put(fb, x, top, '.', style);
        }
        for y in top + 1..=bottom {
            self.put(fb, left, y, ':', style);
            self.put(fb, right, y, ':', style);
        }
        for x in left + 1..right {
            self.put(fb, x, bottom, '.', style);
        }
    }

    fn draw_outline(&self, fb: &mut FrameBuffer) {
        self.draw_box(fb, FIELD_LEFT, FIELD_TOP, FIELD_RIGHT, FIELD_BOTTOM);
        self.draw_box(fb, PREVIEW_LEFT, PREVIEW_TOP, PREVIEW_RIGHT, PREVIEW_BOTTOM);
        fb.put_str(
            self.origin_x + PREVIEW_LEFT,
            self.origin_y + SCORE_ROW,
            SCORE_LABEL,
            CellStyle::TEXT,
        );
    }

    fn draw_block(&self, fb: &mut FrameBuffer, x: u16, y: u16, on: bool) {
        let style = if on { CellStyle::BLOCK } else { CellStyle::TEXT };
        for dx in 0..CELL_W {
            fb.put_char(x + dx, y, ' ', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, x: u8, y: u8, state: CellState) {
        let (px, py) = self.board_cell_origin(x, y);
        self.draw_block(fb, px, py, state.is_visible());
    }

    fn draw_score(&self, fb: &mut FrameBuffer, rows: u32) {
        let x = self.origin_x + PREVIEW_LEFT + SCORE_LABEL.len() as u16 + 1;
        // Trailing space wipes a longer previous value's last digit.
        fb.put_str(x, self.origin_y + SCORE_ROW, &format!("{rows} "), CellStyle::TEXT);
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, shape: ShapeId) {
        for (row, cells) in mask(shape, Rotation::North).iter().enumerate() {
            for (col, &on) in cells.iter().enumerate() {
                let px = self.origin_x + PREVIEW_LEFT + 1 + col as u16 * CELL_W;
                let py = self.origin_y + PREVIEW_MASK_TOP + row as u16;
                self.draw_block(fb, px, py, on);
            }
        }
    }

    fn draw_debug_grid(&self, fb: &mut FrameBuffer, grid: &DebugGrid) {
        for (y, row) in grid.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                let ch = char::from_digit(*code as u32, 10).unwrap_or('?');
                self.put(fb, x as u16, FIELD_TOP + 1 + y as u16, ch, CellStyle::DEBUG);
            }
        }
    }
}
