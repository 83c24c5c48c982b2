//! Core puzzle logic module - pure, deterministic, and testable
//!
//! This module contains the piece model, the shuffle/swap/completion rules, the
//! drag gesture state machine and the session that ties them together.
//! It has **no dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same shuffles
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`piece`]: A tile with a fixed origin slot and a movable current slot
//! - [`puzzle`]: The board, Fisher-Yates shuffle, swap and completion check
//! - [`gesture`]: Single-gesture drag state machine
//! - [`session`]: Event dispatch over puzzle, gesture, hint and effects
//! - [`celebration`]: Decorative hearts released when the board is solved
//! - [`rng`]: Seeded LCG used for shuffles and effects
//! - [`snapshot`]: Render input for the presentation layer
//!
//! # Example
//!
//! ```
//! use tile_swap_core::{Puzzle, Session};
//! use tile_swap_types::PuzzleEvent;
//!
//! // A solved 2x2 board with the first two tiles exchanged.
//! let mut puzzle = Puzzle::solved(2, 1);
//! assert!(puzzle.set_positions(&[1, 0, 2, 3]));
//! let mut session = Session::from_puzzle(puzzle);
//!
//! // Drag the tile in slot 0 onto slot 1.
//! session.apply(PuzzleEvent::GestureStart { slot: 0 });
//! let outcome = session.apply(PuzzleEvent::GestureEnd { slot: Some(1) });
//!
//! assert!(outcome.swapped);
//! assert!(outcome.solved);
//! assert!(session.is_complete());
//! ```

pub mod celebration;
pub mod gesture;
pub mod piece;
pub mod puzzle;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tile_swap_types as types;

// Re-export commonly used types for convenience
pub use celebration::{Celebration, ParticleView, Particles, HEART_KINDS};
pub use gesture::{Drag, GestureState};
pub use piece::Piece;
pub use puzzle::Puzzle;
pub use rng::SimpleRng;
pub use session::{Outcome, Session};
pub use snapshot::{DragSnapshot, PuzzleSnapshot, TileSnapshot};
