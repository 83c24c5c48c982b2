//! Board geometry and hit testing.
//!
//! ```text
//! ┌────┬────┬ ... ┐   frame row
//! │tile│tile│     │   cell_h rows of tile pixels
//! │━━━━│────│     │   status strip (one per tile)
//! ...
//! └────┴────┴ ... ┘
//! ```
//!
//! Tiles are separated by one gutter column; each tile row is followed by a
//! one-row status strip.

use crate::types::{slot_col, slot_of, slot_row, Point, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the frame.
    pub origin: Point,
    pub grid: u8,
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardLayout {
    pub fn frame_w(&self) -> u16 {
        (self.grid as u16) * (self.cell_w + 1) + 1
    }

    pub fn frame_h(&self) -> u16 {
        (self.grid as u16) * (self.cell_h + 1) + 2
    }

    /// Top-left terminal cell of the tile shown in `slot`.
    pub fn tile_origin(&self, slot: Slot) -> Point {
        let col = slot_col(slot, self.grid);
        let row = slot_row(slot, self.grid);
        Point::new(
            self.origin.x + 1 + col * (self.cell_w + 1),
            self.origin.y + 1 + row * (self.cell_h + 1),
        )
    }

    /// Row of the status strip under `slot`.
    pub fn strip_y(&self, slot: Slot) -> u16 {
        self.tile_origin(slot).y + self.cell_h
    }

    /// Slot under terminal cell `(x, y)`; `None` on gutters, strips and outside.
    pub fn slot_at(&self, x: u16, y: u16) -> Option<Slot> {
        let dx = x.checked_sub(self.origin.x + 1)?;
        let dy = y.checked_sub(self.origin.y + 1)?;
        let pitch_x = self.cell_w + 1;
        let pitch_y = self.cell_h + 1;
        if dx % pitch_x >= self.cell_w || dy % pitch_y >= self.cell_h {
            return None;
        }
        slot_of(dx / pitch_x, dy / pitch_y, self.grid)
    }

    /// Right edge of the frame plus one, where side panels may start.
    pub fn right(&self) -> u16 {
        self.origin.x.saturating_add(self.frame_w())
    }
}
