//! Runtime configuration read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `BLOCKFALL_SEED` | bag seed (`u32`) | derived from the clock |
//! | `BLOCKFALL_FPS` | frame rate, `1..=240` | `60` |
//! | `BLOCKFALL_LOG_PATH` | JSON-lines event log | disabled |
//! | `BLOCKFALL_CELL` | `small`, `large` or `auto` | `auto` |
//!
//! Malformed values fall back to the default instead of failing.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Vec2, DEFAULT_FRAME_RATE};

pub const MAX_FRAME_RATE: u32 = 240;

/// Characters per field cell for small terminals, `(rows, cols)`.
pub const SMALL_CELL: Vec2 = Vec2::new(1, 2);
/// Characters per field cell when the terminal has room for it.
pub const LARGE_CELL: Vec2 = Vec2::new(2, 4);
/// Smallest terminal that gets large cells.
pub const LARGE_CELL_MIN_COLS: u16 = 62;
pub const LARGE_CELL_MIN_ROWS: u16 = 42;

/// Requested display cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellSize {
    Small,
    Large,
    /// Large when the terminal is big enough, small otherwise
    #[default]
    Auto,
}

impl CellSize {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "large" => Some(Self::Large),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    /// Pick the concrete cell size for a terminal of `cols` x `rows`.
    pub fn resolve(self, cols: u16, rows: u16) -> Vec2 {
        match self {
            Self::Small => SMALL_CELL,
            Self::Large => LARGE_CELL,
            Self::Auto if cols >= LARGE_CELL_MIN_COLS && rows >= LARGE_CELL_MIN_ROWS => LARGE_CELL,
            Self::Auto => SMALL_CELL,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub fps: u32,
    pub log_path: Option<String>,
    pub cell: CellSize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            fps: DEFAULT_FRAME_RATE,
            log_path: None,
            cell: CellSize::Auto,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let fps = lookup("BLOCKFALL_FPS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|fps| (1..=MAX_FRAME_RATE).contains(fps))
            .unwrap_or(DEFAULT_FRAME_RATE);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let cell = lookup("BLOCKFALL_CELL")
            .and_then(|s| CellSize::from_str(&s))
            .unwrap_or_default();

        Self {
            seed,
            fps,
            log_path,
            cell,
        }
    }
}

/// Seed from the wall clock's sub-second nanos mixed with the seconds.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
