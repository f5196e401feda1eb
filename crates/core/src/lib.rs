//! Core game logic - pure, deterministic, and testable
//!
//! This crate owns every game rule. It has **no dependencies** on the terminal, input
//! devices, or any I/O, so the same seed and the same input sequence always produce
//! the same field, score and level.
//!
//! # Module Structure
//!
//! - [`pieces`]: piece shapes per orientation and wall kick tables
//! - [`piece`]: a piece instance with cached bounding box and display anchor
//! - [`rng`]: bag randomizer over the seven kinds
//! - [`field`]: the playfield grid, fit tests and line removal
//! - [`scoring`]: line clear, perfect clear, combo and drop points
//! - [`game_state`]: the per-frame state machine
//! - [`snapshot`]: copy-only view handed to the renderer
//!
//! # Frame Loop
//!
//! The host calls [`GameState::step`] once per frame with at most one input:
//!
//! 1. A running entry delay counts down; when it reaches zero the next piece spawns.
//!    A spawn that does not fit ends the game.
//! 2. An airborne piece gets its floor timer and floor move budget back.
//! 3. The input is dispatched (move, rotate, hold, soft drop, hard drop).
//! 4. A grounded piece counts its floor timer down and locks at zero.
//! 5. Gravity moves the piece down every `gravity_frames(level)` frames and locks it
//!    if it cannot move.
//! 6. If a piece locked, full rows are cleared and scored.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Flow, GameAction, Timing, Vec2};
//!
//! let mut game = GameState::new(12345, Timing::default(), Vec2::new(1, 2));
//!
//! game.step(Some(GameAction::MoveRight));
//! game.step(Some(GameAction::RotateCw));
//! assert_eq!(game.step(Some(GameAction::HardDrop)), Flow::Continue);
//!
//! // Hard drop awards points per cell
//! assert!(game.score() > 0);
//! assert_eq!(game.step(Some(GameAction::Quit)), Flow::Stop);
//! ```

pub mod field;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use field::Field;
pub use game_state::GameState;
pub use piece::Piece;
pub use pieces::{get_kicks, get_shape, try_rotate, PieceShape};
pub use rng::{Bag, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
