//! Tile swap (workspace facade crate).
//!
//! Re-exports the workspace crates under `tile_swap::{core,input,term,types}` and
//! hosts [`app`], the glue that turns terminal events into session events.

pub mod app;

pub use tile_swap_core as core;
pub use tile_swap_input as input;
pub use tile_swap_term as term;
pub use tile_swap_types as types;
