//! Game state - the board, the falling piece, the spawner and the score
//!
//! One `GameState` value is owned by the game loop. It knows nothing about
//! time, input devices or rendering; it only applies a resolved tick.

use log::{debug, info};

use crate::board::Board;
use crate::movement::{resolve, Delta, Resolution};
use crate::row_clear::{complete_rows, remove_rows, CompletedRows};
use crate::shapes::get_shape;
use crate::spawner::Spawner;
use crate::types::{Rotation, ShapeId};

/// The falling, player-controlled piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: ShapeId,
    pub rotation: Rotation,
    /// Anchor column of the 4x4 mask
    pub x: i32,
    /// Anchor row of the 4x4 mask; negative above the board
    pub y: i32,
}

impl ActivePiece {
    /// The pose this piece would take after applying `delta` in full.
    pub fn moved(&self, delta: &Delta) -> Self {
        Self {
            shape: self.shape,
            rotation: self.rotation.turned(delta.drotate),
            x: self.x + delta.dx,
            y: self.y + delta.dy + delta.yforce,
        }
    }

    /// Absolute board coordinates of the four cells, including rows above
    /// the board.
    pub fn cells(&self) -> [(i32, i32); 4] {
        get_shape(self.shape, self.rotation)
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}

/// Result of applying one tick's delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// No piece, game over, or the resolver kept the current pose
    Unchanged,
    /// The piece was redrawn at a new pose
    Moved,
    /// The piece petrified; the listed rows are complete (possibly none).
    /// No piece is active until [`GameState::spawn_next`].
    Locked(CompletedRows),
    /// The piece locked while still touching the top of the board
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    spawner: Spawner,
    score: u32,
    game_over: bool,
}

impl GameState {
    /// Fresh game with an empty board and no active piece yet.
    pub fn new(seed: u32) -> Self {
        Self::with_spawner(Spawner::new(seed))
    }

    pub fn with_spawner(spawner: Spawner) -> Self {
        Self {
            board: Board::new(),
            active: None,
            spawner,
            score: 0,
            game_over: false,
        }
    }

    /// Reset board and score, draw a new preview and spawn the first piece.
    pub fn new_game(&mut self, seed: u32) {
        *self = Self::new(seed);
        self.spawn_next();
        info!("new game, first piece {:?}", self.active.map(|p| p.shape.as_str()));
    }

    /// Apply one tick of movement.
    pub fn advance(&mut self, delta: Delta) -> Step {
        if self.game_over {
            return Step::Unchanged;
        }
        let Some(piece) = self.active else {
            return Step::Unchanged;
        };

        match resolve(&self.board, &piece, delta) {
            Resolution::Stay => Step::Unchanged,
            Resolution::Move(next) => {
                self.board
                    .place_active(next.shape, next.rotation, next.x, next.y);
                self.active = Some(next);
                Step::Moved
            }
            Resolution::Lock if piece.y < 1 => {
                info!("piece {} locked at y={}, game over", piece.shape.as_str(), piece.y);
                self.game_over = true;
                Step::GameOver
            }
            Resolution::Lock => {
                debug!(
                    "locking {} rotation {} at ({}, {})",
                    piece.shape.as_str(),
                    piece.rotation.as_str(),
                    piece.x,
                    piece.y
                );
                self.board
                    .petrify(piece.shape, piece.rotation, piece.x, piece.y);
                self.active = None;
                Step::Locked(complete_rows(&self.board))
            }
        }
    }

    /// Remove the given completed rows (ascending) and add them to the score.
    pub fn clear_rows(&mut self, rows: &[usize]) -> u32 {
        let removed = remove_rows(&mut self.board, rows);
        self.score += removed;
        removed
    }

    /// Spawn the queued preview shape and draw it at the spawn pose.
    pub fn spawn_next(&mut self) -> ActivePiece {
        let piece = self.spawner.spawn();
        self.board
            .place_active(piece.shape, piece.rotation, piece.x, piece.y);
        self.active = Some(piece);
        piece
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for fixtures and the render-diff emitter.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Replace the active piece and draw it (fixtures).
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.board
            .place_active(piece.shape, piece.rotation, piece.x, piece.y);
        self.active = Some(piece);
    }

    pub fn preview(&self) -> ShapeId {
        self.spawner.preview()
    }

    /// Rows cleared so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}
