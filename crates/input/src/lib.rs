//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::PuzzleEvent`]s: mouse
//! drag-and-drop on one side, a keyboard pick-and-drop cursor on the other.

pub mod cursor;
pub mod map;
pub mod pointer;

pub use tile_swap_types as types;

pub use cursor::KeyboardCursor;
pub use map::{map_key_event, should_quit, Direction, KeyCommand};
pub use pointer::map_mouse_event;
