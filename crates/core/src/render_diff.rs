//! Render-diff emitter - turns board changes into minimal draw commands
//!
//! The board's shadow grid holds what the renderer was last told. Each
//! [`RenderDiff::emit`] sends a `SetCell` for every cell whose state differs
//! from the shadow (or repaints everything after a full-redraw request), then
//! settles the board so the next call starts from a clean slate.
//!
//! | pending | emitted |
//! |---------|---------|
//! | full redraw | `ClearAndDrawFrame`, every visible cell, score, preview |
//! | cell changed | `SetCell` with the raw state (`PreviouslyActive` erases) |
//! | score / preview changed | `SetScore` / `SetPreview` |
//! | overlay on and anything drawn | `DrawDebugGrid` |

use std::io;

use crate::board::Board;
use crate::ports::RenderPort;
use crate::types::{RenderCommand, ShapeId, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone)]
pub struct RenderDiff {
    full_redraw: bool,
    debug_overlay: bool,
    last_score: Option<u32>,
    last_preview: Option<ShapeId>,
}

impl RenderDiff {
    /// A new emitter starts with a full redraw pending.
    pub fn new() -> Self {
        Self {
            full_redraw: true,
            debug_overlay: false,
            last_score: None,
            last_preview: None,
        }
    }

    pub fn request_full_redraw(&mut self) {
        self.full_redraw = true;
    }

    pub fn needs_full_redraw(&self) -> bool {
        self.full_redraw
    }

    /// Flip the debug overlay. Either way the screen is repainted, so turning
    /// it off also wipes the old grid.
    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.set_debug_overlay(!self.debug_overlay);
        self.debug_overlay
    }

    pub fn set_debug_overlay(&mut self, on: bool) {
        if self.debug_overlay != on {
            self.debug_overlay = on;
            self.full_redraw = true;
        }
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Send the changes since the last call to `out`.
    ///
    /// Returns the number of `SetCell` commands emitted.
    pub fn emit<R>(
        &mut self,
        board: &mut Board,
        score: u32,
        preview: ShapeId,
        out: &mut R,
    ) -> io::Result<usize>
    where
        R: RenderPort + ?Sized,
    {
        let full = std::mem::take(&mut self.full_redraw);
        let mut drawn = 0;

        if full {
            out.apply(RenderCommand::ClearAndDrawFrame)?;
            self.last_score = None;
            self.last_preview = None;
        }

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                let (bx, by) = (x as i32, y as i32);
                let state = board.get(bx, by).unwrap_or_default();
                let send = if full {
                    state.is_visible()
                } else {
                    board.shadow_get(bx, by) != Some(state)
                };
                if send {
                    out.apply(RenderCommand::SetCell { x, y, state })?;
                    drawn += 1;
                }
            }
        }

        // The overlay shows the raw codes, so grab it before settling.
        let grid = (self.debug_overlay && (full || drawn > 0)).then(|| board.debug_grid());
        board.settle();

        if self.last_score != Some(score) {
            out.apply(RenderCommand::SetScore(score))?;
            self.last_score = Some(score);
        }
        if self.last_preview != Some(preview) {
            out.apply(RenderCommand::SetPreview(preview))?;
            self.last_preview = Some(preview);
        }
        if let Some(grid) = grid {
            out.apply(RenderCommand::DrawDebugGrid(grid))?;
        }

        Ok(drawn)
    }
}

impl Default for RenderDiff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellState, Rotation};

    fn o() -> ShapeId {
        ShapeId::new(0).unwrap()
    }

    #[test]
    fn first_emit_is_a_full_redraw() {
        let mut board = Board::from_rows(&["##........"]);
        let mut diff = RenderDiff::new();
        let mut out = Vec::new();

        let drawn = diff.emit(&mut board, 0, o(), &mut out).unwrap();
        assert_eq!(drawn, 2);
        assert_eq!(out[0], RenderCommand::ClearAndDrawFrame);
        assert!(out.contains(&RenderCommand::SetScore(0)));
        assert!(out.contains(&RenderCommand::SetPreview(o())));
    }

    #[test]
    fn second_emit_without_changes_is_silent() {
        let mut board = Board::new();
        board.place_active(o(), Rotation::North, 3, 5);
        let mut diff = RenderDiff::new();
        let mut out = Vec::new();
        diff.emit(&mut board, 4, o(), &mut out).unwrap();

        out.clear();
        assert_eq!(diff.emit(&mut board, 4, o(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn move_draws_new_cells_and_erases_old() {
        let mut board = Board::new();
        board.place_active(o(), Rotation::North, 3, 5);
        let mut diff = RenderDiff::new();
        diff.emit(&mut board, 0, o(), &mut Vec::new()).unwrap();

        board.place_active(o(), Rotation::North, 3, 6);
        let mut out = Vec::new();
        let drawn = diff.emit(&mut board, 0, o(), &mut out).unwrap();

        // Row 7 stays active; row 6 is erased and row 8 drawn.
        assert_eq!(drawn, 4);
        assert!(out.contains(&RenderCommand::SetCell {
            x: 4,
            y: 6,
            state: CellState::PreviouslyActive
        }));
        assert!(out.contains(&RenderCommand::SetCell {
            x: 5,
            y: 8,
            state: CellState::Active
        }));
        assert_eq!(board.get(4, 6), Some(CellState::Empty));
    }

    #[test]
    fn score_change_alone_emits_score_only() {
        let mut board = Board::new();
        let mut diff = RenderDiff::new();
        diff.emit(&mut board, 0, o(), &mut Vec::new()).unwrap();

        let mut out = Vec::new();
        diff.emit(&mut board, 1, o(), &mut out).unwrap();
        assert_eq!(out, vec![RenderCommand::SetScore(1)]);
    }

    #[test]
    fn overlay_toggle_forces_redraw_with_grid() {
        let mut board = Board::new();
        let mut diff = RenderDiff::new();
        diff.emit(&mut board, 0, o(), &mut Vec::new()).unwrap();

        assert!(diff.toggle_debug_overlay());
        assert!(diff.needs_full_redraw());
        let mut out = Vec::new();
        diff.emit(&mut board, 0, o(), &mut out).unwrap();
        assert_eq!(out.first(), Some(&RenderCommand::ClearAndDrawFrame));
        assert!(matches!(out.last(), Some(RenderCommand::DrawDebugGrid(_))));

        // Nothing changed: no grid either.
        out.clear();
        diff.emit(&mut board, 0, o(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
