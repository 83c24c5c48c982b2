//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The board is square:
//!
//! - **Grid size**: 6 rows by 6 columns
//! - **Pieces**: 36, one per slot
//! - **Slots**: numbered row-major, `slot = row * GRID_SIZE + col`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `CELEBRATION_STAGGER_MS` | 100 | Delay between two hearts |
//! | `PARTICLE_LIFETIME_MS` | 3000 | Time a heart takes to float off screen |
//! | `STATIC_RENDER_INTERVAL_MS` | 250 | Redraw interval when nothing changes |
//!
//! # Examples
//!
//! ```
//! use tile_swap_types::{slot_col, slot_of, slot_row, GRID_SIZE, PIECE_COUNT};
//!
//! assert_eq!(PIECE_COUNT, (GRID_SIZE as usize) * (GRID_SIZE as usize));
//!
//! // Slot 8 on a 6x6 board is row 1, column 2.
//! assert_eq!((slot_col(8, GRID_SIZE), slot_row(8, GRID_SIZE)), (2, 1));
//! assert_eq!(slot_of(2, 1, GRID_SIZE), Some(8));
//! assert_eq!(slot_of(GRID_SIZE as u16, 0, GRID_SIZE), None);
//! ```

/// Number of rows and columns on the board.
pub const GRID_SIZE: u8 = 6;

/// Total number of pieces (`GRID_SIZE²`).
pub const PIECE_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Source picture, relative to the terminal crate. Embedded at compile time.
pub const IMAGE_PATH: &str = "assets/jungle.png";

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Number of hearts released when the puzzle is solved.
pub const CELEBRATION_PARTICLES: usize = 20;

/// Delay between two consecutive hearts.
pub const CELEBRATION_STAGGER_MS: u32 = 100;

/// Time a heart takes to float from the bottom edge to the top edge.
pub const PARTICLE_LIFETIME_MS: u32 = 3000;

/// Minimum redraw interval while the screen is static.
pub const STATIC_RENDER_INTERVAL_MS: u64 = 250;

/// Stable piece identity, `0..N-1`.
pub type PieceId = u16;

/// Board position, `0..N-1`, row-major.
pub type Slot = u16;

/// Row of a slot on a board of `grid` columns.
pub fn slot_row(slot: Slot, grid: u8) -> u16 {
    slot / (grid.max(1) as u16)
}

/// Column of a slot on a board of `grid` columns.
pub fn slot_col(slot: Slot, grid: u8) -> u16 {
    slot % (grid.max(1) as u16)
}

/// Slot for a (col, row) pair, or `None` when outside the grid.
pub fn slot_of(col: u16, row: u16, grid: u8) -> Option<Slot> {
    let g = grid as u16;
    if col >= g || row >= g {
        return None;
    }
    Some(row * g + col)
}

/// Terminal cell coordinate (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Manual controls outside the drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Re-shuffle the current pieces.
    Shuffle,
    /// Show or hide the reference picture.
    ToggleHint,
    /// Hide the reference picture.
    HideHint,
    /// Rebuild the piece set and start over.
    Restart,
}

/// A discrete input event delivered to the session.
///
/// Gesture events carry the slot under the pointer (or cursor). The session
/// resolves slots to pieces at the time the event is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleEvent {
    /// Pointer pressed (or tile picked up) over `slot`.
    GestureStart { slot: Slot },
    /// Pointer moved while a gesture is active.
    ///
    /// `slot` is `None` over gutters or outside the board; `at` is the
    /// terminal cell under the pointer, when known.
    GestureMove { slot: Option<Slot>, at: Option<Point> },
    /// Pointer released (or tile dropped). `None` means outside any tile.
    GestureEnd { slot: Option<Slot> },
    /// Abort the active gesture without swapping.
    GestureCancel,
    /// A manual control was activated.
    Control(ControlAction),
}
