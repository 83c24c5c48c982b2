//! Keyboard cursor: the pick-carry-drop path through the gesture machine.
//!
//! The cursor owns only its slot. Whether a tile is being carried is the
//! session's gesture state, passed in on each call, so keyboard and mouse can
//! never disagree about the active gesture.

use crate::map::{Direction, KeyCommand};
use crate::types::{slot_col, slot_of, slot_row, ControlAction, PuzzleEvent, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardCursor {
    slot: Slot,
    grid: u8,
}

impl KeyboardCursor {
    pub fn new(grid: u8) -> Self {
        Self {
            slot: 0,
            grid: grid.max(1),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Move the cursor, clamped at the board edges.
    pub fn step(&mut self, dir: Direction) -> bool {
        let col = slot_col(self.slot, self.grid);
        let row = slot_row(self.slot, self.grid);
        let last = (self.grid - 1) as u16;
        let (col, row) = match dir {
            Direction::Left => (col.saturating_sub(1), row),
            Direction::Right => ((col + 1).min(last), row),
            Direction::Up => (col, row.saturating_sub(1)),
            Direction::Down => (col, (row + 1).min(last)),
        };
        let next = slot_of(col, row, self.grid).unwrap_or(self.slot);
        let moved = next != self.slot;
        self.slot = next;
        moved
    }

    /// Place the cursor on a slot (e.g. where the mouse last clicked).
    pub fn jump(&mut self, slot: Slot) {
        let count = (self.grid as u16) * (self.grid as u16);
        if slot < count {
            self.slot = slot;
        }
    }

    /// Turn a key command into a session event.
    ///
    /// `dragging` is whether a gesture is currently active.
    pub fn handle(&mut self, cmd: KeyCommand, dragging: bool) -> Option<PuzzleEvent> {
        match cmd {
            KeyCommand::Move(dir) => {
                if !self.step(dir) {
                    return None;
                }
                // Not moving a tile: the caller redraws the cursor highlight.
                if !dragging {
                    return None;
                }
                Some(PuzzleEvent::GestureMove {
                    slot: Some(self.slot),
                    at: None,
                })
            }
            KeyCommand::Grab if dragging => Some(PuzzleEvent::GestureEnd {
                slot: Some(self.slot),
            }),
            KeyCommand::Grab => Some(PuzzleEvent::GestureStart { slot: self.slot }),
            KeyCommand::Cancel if dragging => Some(PuzzleEvent::GestureCancel),
            KeyCommand::Cancel => Some(PuzzleEvent::Control(ControlAction::HideHint)),
            KeyCommand::Control(action) => Some(PuzzleEvent::Control(action)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_clamps_at_edges() {
        let mut c = KeyboardCursor::new(3);
        assert!(!c.step(Direction::Left));
        assert!(!c.step(Direction::Up));
        assert_eq!(c.slot(), 0);

        assert!(c.step(Direction::Right));
        assert!(c.step(Direction::Right));
        assert!(!c.step(Direction::Right));
        assert_eq!(c.slot(), 2);

        assert!(c.step(Direction::Down));
        assert!(c.step(Direction::Down));
        assert!(!c.step(Direction::Down));
        assert_eq!(c.slot(), 8);
    }

    #[test]
    fn grab_starts_then_drops() {
        let mut c = KeyboardCursor::new(3);
        assert_eq!(
            c.handle(KeyCommand::Grab, false),
            Some(PuzzleEvent::GestureStart { slot: 0 })
        );
        assert_eq!(
            c.handle(KeyCommand::Move(Direction::Right), true),
            Some(PuzzleEvent::GestureMove {
                slot: Some(1),
                at: None
            })
        );
        assert_eq!(
            c.handle(KeyCommand::Grab, true),
            Some(PuzzleEvent::GestureEnd { slot: Some(1) })
        );
    }

    #[test]
    fn moving_while_idle_emits_nothing() {
        let mut c = KeyboardCursor::new(3);
        assert_eq!(c.handle(KeyCommand::Move(Direction::Down), false), None);
        assert_eq!(c.slot(), 3);
    }

    #[test]
    fn cancel_aborts_carry_or_hides_hint() {
        let mut c = KeyboardCursor::new(3);
        assert_eq!(
            c.handle(KeyCommand::Cancel, false),
            Some(PuzzleEvent::Control(ControlAction::HideHint))
        );
        assert_eq!(
            c.handle(KeyCommand::Cancel, true),
            Some(PuzzleEvent::GestureCancel)
        );
    }

    #[test]
    fn controls_pass_through() {
        let mut c = KeyboardCursor::new(3);
        assert_eq!(
            c.handle(KeyCommand::Control(ControlAction::Shuffle), true),
            Some(PuzzleEvent::Control(ControlAction::Shuffle))
        );
    }

    #[test]
    fn jump_ignores_out_of_range() {
        let mut c = KeyboardCursor::new(2);
        c.jump(3);
        assert_eq!(c.slot(), 3);
        c.jump(4);
        assert_eq!(c.slot(), 3);
    }
}
