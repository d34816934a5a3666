//! Movement resolver - turns one tick of input into a collision-free pose
//!
//! All button input of a tick is summed into a [`Delta`]. Resolution tries the
//! full delta first and, on a collision, undoes one unit of one input at a
//! time in fixed priority order: rotation, then horizontal, then soft drop.
//! Gravity (`yforce`) is never undone. If the pose still collides at the
//! bottom once every button input is gone, the piece locks.

use log::trace;

use crate::board::Board;
use crate::collision::{classify, Collision};
use crate::game_state::ActivePiece;
use crate::types::InputEvent;

/// Net movement requested for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub dx: i32,
    /// Soft-drop rows from buttons
    pub dy: i32,
    /// Quarter turns
    pub drotate: i32,
    /// Gravity rows, 0 or 1
    pub yforce: i32,
}

impl Delta {
    pub fn new(dx: i32, dy: i32, drotate: i32, yforce: i32) -> Self {
        Self {
            dx,
            dy,
            drotate,
            yforce,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0 && self.drotate == 0 && self.yforce == 0
    }

    /// Fold a movement event into the delta. Returns false for events that do
    /// not move the piece.
    pub fn accumulate(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::MoveLeft => self.dx -= 1,
            InputEvent::MoveRight => self.dx += 1,
            InputEvent::SoftDrop => self.dy += 1,
            InputEvent::Rotate => self.drotate += 1,
            _ => return false,
        }
        true
    }

    /// Undo one unit of the highest-priority nonzero button input.
    /// Returns false when there is nothing left to undo.
    fn undo_one(&mut self) -> bool {
        let component = if self.drotate != 0 {
            &mut self.drotate
        } else if self.dx != 0 {
            &mut self.dx
        } else if self.dy != 0 {
            &mut self.dy
        } else {
            return false;
        };
        let step = component.signum();
        *component -= step;
        true
    }

    fn button_units(&self) -> u32 {
        self.drotate.unsigned_abs() + self.dx.unsigned_abs() + self.dy.unsigned_abs()
    }
}

/// What the resolver decided for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Commit this pose
    Move(ActivePiece),
    /// Nothing to do; the current pose stands
    Stay,
    /// The current pose rests on the floor or stack: petrify it
    Lock,
}

/// Resolve `delta` for `piece` against `board`.
///
/// At most `|drotate| + |dx| + |dy| + 1` poses are classified.
pub fn resolve(board: &Board, piece: &ActivePiece, delta: Delta) -> Resolution {
    let mut d = delta;
    let bound = d.button_units();

    for _ in 0..=bound {
        let candidate = piece.moved(&d);
        let outcome = classify(
            board,
            candidate.shape,
            candidate.rotation,
            candidate.x,
            candidate.y,
        );
        match outcome {
            Collision::Clear => {
                return if candidate == *piece {
                    Resolution::Stay
                } else {
                    Resolution::Move(candidate)
                };
            }
            Collision::Edge => {
                trace!("edge collision at {:?}, undoing one input", candidate);
                if !d.undo_one() {
                    // The current pose is always in range, so this only
                    // happens if a caller hands in an already-invalid piece.
                    return Resolution::Stay;
                }
            }
            Collision::Bottom => {
                trace!("bottom collision at {:?}, undoing one input", candidate);
                if !d.undo_one() {
                    return Resolution::Lock;
                }
            }
        }
    }

    unreachable!("movement resolver exceeded {} retries", bound + 1)
}
