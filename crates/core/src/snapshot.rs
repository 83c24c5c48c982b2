//! Snapshot: the read-only render input built from a session.
//!
//! `snapshot_into` refills one long-lived value every frame, so the hot path
//! reuses the tile vector instead of allocating.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::celebration::Particles;
use crate::gesture::Drag;
use crate::piece::Piece;
use crate::types::{PieceId, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub id: PieceId,
    pub correct: Slot,
    pub current: Slot,
    pub in_place: bool,
}

impl From<&Piece> for TileSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            id: value.id(),
            correct: value.correct_position(),
            current: value.current_position(),
            in_place: value.is_in_place(),
        }
    }
}

/// Drag state with the source resolved to its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragSnapshot {
    pub drag: Drag,
    pub source_slot: Slot,
    pub over_slot: Option<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PuzzleSnapshot {
    pub grid_size: u8,
    /// Tiles sorted by current position.
    pub tiles: Vec<TileSnapshot>,
    pub complete: bool,
    pub hint_visible: bool,
    pub drag: Option<DragSnapshot>,
    pub moves: u32,
    pub correct_count: u16,
    pub seed: u32,
    pub particles: Particles,
}

impl PuzzleSnapshot {
    /// Tile shown in `slot`.
    pub fn tile_at(&self, slot: Slot) -> Option<&TileSnapshot> {
        self.tiles.get(slot as usize)
    }

    /// True when a frame would look the same if nothing but time passed.
    pub fn is_static(&self) -> bool {
        self.particles.is_empty()
    }

    /// Hash of everything that affects the rendered frame.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}
