//! Piece: one tile of the picture.

use crate::types::{PieceId, Slot};

/// A single tile with a fixed origin and a movable board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: PieceId,
    correct_position: Slot,
    pub(crate) current_position: Slot,
}

impl Piece {
    /// Create a piece sitting in its own slot.
    pub fn new(id: PieceId) -> Self {
        Self {
            id,
            correct_position: id,
            current_position: id,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Slot this tile occupies in the source picture.
    pub fn correct_position(&self) -> Slot {
        self.correct_position
    }

    /// Slot this tile currently occupies on the board.
    pub fn current_position(&self) -> Slot {
        self.current_position
    }

    pub fn is_in_place(&self) -> bool {
        self.current_position == self.correct_position
    }
}
