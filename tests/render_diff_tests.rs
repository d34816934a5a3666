//! Render-diff emitter against a recording render port

use termtris::core::{Board, RenderDiff};
use termtris::types::{CellState, RenderCommand, Rotation, ShapeId};

fn t() -> ShapeId {
    ShapeId::new(1).unwrap()
}

fn cell_draws(cmds: &[RenderCommand]) -> usize {
    cmds.iter().filter(|c| c.is_cell_draw()).count()
}

#[test]
fn emitter_is_idempotent_on_unchanged_state() {
    let mut board = Board::from_rows(&["###.......", "#####....."]);
    board.place_active(t(), Rotation::East, 4, 3);
    let mut diff = RenderDiff::new();

    let mut first = Vec::new();
    diff.emit(&mut board, 3, t(), &mut first).unwrap();
    assert!(cell_draws(&first) > 0);

    for _ in 0..3 {
        let mut again = Vec::new();
        assert_eq!(diff.emit(&mut board, 3, t(), &mut again).unwrap(), 0);
        assert!(again.is_empty(), "unexpected commands: {again:?}");
    }
}

#[test]
fn full_redraw_paints_only_visible_cells() {
    let mut board = Board::from_rows(&["##+@......"]);
    let mut diff = RenderDiff::new();
    let mut out = Vec::new();
    diff.emit(&mut board, 0, t(), &mut out).unwrap();

    // Two petrified plus one active; the previously-active cell is not painted.
    assert_eq!(cell_draws(&out), 3);
    assert!(!out.contains(&RenderCommand::SetCell {
        x: 2,
        y: 19,
        state: CellState::PreviouslyActive
    }));
    assert_eq!(board.get(2, 19), Some(CellState::Empty));
}

#[test]
fn requested_redraw_repeats_score_and_preview() {
    let mut board = Board::new();
    let mut diff = RenderDiff::new();
    diff.emit(&mut board, 5, t(), &mut Vec::new()).unwrap();

    diff.request_full_redraw();
    let mut out = Vec::new();
    diff.emit(&mut board, 5, t(), &mut out).unwrap();
    assert_eq!(
        out,
        vec![
            RenderCommand::ClearAndDrawFrame,
            RenderCommand::SetScore(5),
            RenderCommand::SetPreview(t()),
        ]
    );
}

#[test]
fn row_shift_erases_vacated_cells() {
    let mut board = Board::from_rows(&["#.........", "##########"]);
    let mut diff = RenderDiff::new();
    diff.emit(&mut board, 0, t(), &mut Vec::new()).unwrap();

    board.shift_down_into(19);
    let mut out = Vec::new();
    diff.emit(&mut board, 1, t(), &mut out).unwrap();

    // Row 18 empties, row 19 keeps only its first cell.
    assert!(out.contains(&RenderCommand::SetCell {
        x: 0,
        y: 18,
        state: CellState::Empty
    }));
    assert!(out.contains(&RenderCommand::SetCell {
        x: 9,
        y: 19,
        state: CellState::Empty
    }));
    assert_eq!(cell_draws(&out), 10);
    assert!(out.contains(&RenderCommand::SetScore(1)));
}

#[test]
fn debug_grid_follows_each_drawing_emit() {
    let mut board = Board::new();
    let mut diff = RenderDiff::new();
    diff.set_debug_overlay(true);
    diff.emit(&mut board, 0, t(), &mut Vec::new()).unwrap();

    board.place_active(t(), Rotation::North, 3, 5);
    let mut out = Vec::new();
    diff.emit(&mut board, 0, t(), &mut out).unwrap();
    match out.last() {
        Some(RenderCommand::DrawDebugGrid(grid)) => assert_eq!(grid[6][3], 1),
        other => panic!("expected a debug grid, got {other:?}"),
    }
}

#[test]
fn preview_change_alone_emits_preview_only() {
    let mut board = Board::from_rows(&["##........"]);
    let mut diff = RenderDiff::new();
    diff.emit(&mut board, 2, t(), &mut Vec::new()).unwrap();

    let z = ShapeId::from_str("z").unwrap();
    let mut out = Vec::new();
    assert_eq!(diff.emit(&mut board, 2, z, &mut out).unwrap(), 0);
    assert_eq!(out, vec![RenderCommand::SetPreview(z)]);
}
