//! Spawner - produces the next active piece and keeps the preview slot filled

use log::debug;

use crate::game_state::ActivePiece;
use crate::rng::SimpleRng;
use crate::types::{Rotation, ShapeId, SPAWN_X, SPAWN_Y};

/// Holds the single upcoming shape and the RNG that refills it.
#[derive(Debug, Clone)]
pub struct Spawner {
    preview: ShapeId,
    rng: SimpleRng,
}

impl Spawner {
    /// Create a spawner with a random first preview.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let preview = rng.next_shape();
        Self { preview, rng }
    }

    /// Create a spawner whose first spawned shape is `preview`.
    pub fn with_preview(seed: u32, preview: ShapeId) -> Self {
        Self {
            preview,
            rng: SimpleRng::new(seed),
        }
    }

    /// The shape the next `spawn` will produce.
    pub fn preview(&self) -> ShapeId {
        self.preview
    }

    /// Take the queued shape at the spawn pose and draw a fresh preview.
    pub fn spawn(&mut self) -> ActivePiece {
        let piece = ActivePiece {
            shape: self.preview,
            rotation: Rotation::North,
            x: SPAWN_X as i32,
            y: SPAWN_Y as i32,
        };
        self.preview = self.rng.next_shape();
        debug!(
            "spawned {} (next {})",
            piece.shape.as_str(),
            self.preview.as_str()
        );
        piece
    }
}
