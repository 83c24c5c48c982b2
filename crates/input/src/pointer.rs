//! Mouse mapping: left-button drag-and-drop.
//!
//! Only the left button takes part; a terminal reports a single pointer, so
//! there is nothing to arbitrate between touch points.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Point, PuzzleEvent, Slot};

/// Map a mouse event to a gesture event.
///
/// `hit` resolves a terminal cell to the board slot under it (`None` over
/// gutters or outside the board).
pub fn map_mouse_event(ev: MouseEvent, hit: impl Fn(u16, u16) -> Option<Slot>) -> Option<PuzzleEvent> {
    let at = Point::new(ev.column, ev.row);
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            hit(at.x, at.y).map(|slot| PuzzleEvent::GestureStart { slot })
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PuzzleEvent::GestureMove {
            slot: hit(at.x, at.y),
            at: Some(at),
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(PuzzleEvent::GestureEnd {
            slot: hit(at.x, at.y),
        }),
        _ => None,
    }
}
