//! Drag gesture state machine.
//!
//! One gesture at a time: `Idle -> Dragging -> Idle`. A drop resolves to a swap
//! only when it lands on a tile other than the source.

use crate::types::{PieceId, Point};

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Drag {
    /// Tile picked up when the gesture began.
    pub source: PieceId,
    /// Tile currently under the pointer, if any.
    pub over: Option<PieceId>,
    /// Last known pointer cell, for the floating tile.
    pub pointer: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(Drag),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn drag(&self) -> Option<Drag> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging(drag) => Some(*drag),
        }
    }

    /// Start dragging `source`. Ignored while another gesture is active.
    pub fn begin(&mut self, source: PieceId, pointer: Option<Point>) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = GestureState::Dragging(Drag {
            source,
            over: Some(source),
            pointer,
        });
        true
    }

    /// Track the pointer. Returns `true` when anything visible changed.
    pub fn hover(&mut self, over: Option<PieceId>, pointer: Option<Point>) -> bool {
        match self {
            GestureState::Idle => false,
            GestureState::Dragging(drag) => {
                let pointer = pointer.or(drag.pointer);
                let changed = drag.over != over || drag.pointer != pointer;
                drag.over = over;
                drag.pointer = pointer;
                changed
            }
        }
    }

    /// End the gesture over `target`. Always returns to idle.
    ///
    /// Yields `(source, target)` when the drop should swap.
    pub fn finish(&mut self, target: Option<PieceId>) -> Option<(PieceId, PieceId)> {
        let state = std::mem::take(self);
        let drag = state.drag()?;
        match target {
            Some(target) if target != drag.source => Some((drag.source, target)),
            _ => None,
        }
    }

    /// Abort without swapping. Returns `true` if a gesture was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        *self = GestureState::Idle;
        was_active
    }
}
