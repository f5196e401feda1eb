//! Terminal falling-block puzzle game (workspace facade crate).
//!
//! The simulation lives in `blockfall-core`, key mapping in `blockfall-input` and the
//! framebuffer renderer in `blockfall-term`. This crate re-exports them as
//! `tui_blockfall::{core,input,term,types}` and adds the host pieces: environment
//! configuration and the optional JSON-lines event log.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;
