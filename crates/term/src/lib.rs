//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget toolkits and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw picture tiles as truecolor half-block pixels (two pixels per cell)
//! - Share one board layout between drawing and mouse hit testing

pub mod fb;
pub mod layout;
pub mod picture;
pub mod puzzle_view;
pub mod render_throttle;
pub mod renderer;

pub use tile_swap_core as core;
pub use tile_swap_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use layout::BoardLayout;
pub use picture::{Picture, EMBEDDED_IMAGE};
pub use puzzle_view::{AnchorY, PuzzleView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
