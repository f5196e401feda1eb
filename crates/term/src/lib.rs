//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes framebuffers to the terminal through crossterm,
//! rewriting only the cells that changed since the previous frame.
//!
//! Each field cell is drawn as a block of `display_cell_size` characters so the
//! field keeps a square look on terminals whose glyphs are twice as tall as wide.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
