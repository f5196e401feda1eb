//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The host reads at
//! most one key per frame and hands the mapped action to the core; unmapped keys
//! are ignored.

pub mod map;

pub use blockfall_types as types;

pub use map::{is_pause, is_quit, map_key};
