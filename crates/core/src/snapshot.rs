use crate::field::Row;
use crate::piece::Piece;
use crate::types::{PieceKind, Vec2, FIELD_X, FIELD_Y};

/// Copy-only view of a [`GameState`](crate::GameState) for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub field: [Row; FIELD_Y],
    pub active: Option<Piece>,
    /// Active piece moved to its landing position
    pub ghost: Option<Piece>,
    pub held: Option<Piece>,
    pub next: Piece,
    pub score: u32,
    pub level: u8,
    pub lines: u32,
    pub combo: i8,
    pub floor_timer: u16,
    /// Active piece is resting on the floor or the stack
    pub grounded: bool,
    pub entry_delay: u16,
    pub paused: bool,
    pub game_over: bool,
    pub display_cell_size: Vec2,
}

impl GameSnapshot {
    /// Whether the active piece should be hidden this frame for the about-to-lock blink.
    pub fn blink_hidden(&self, blink_frames: u16) -> bool {
        self.grounded && blink_frames > 0 && self.floor_timer % blink_frames == 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let display_cell_size = Vec2::new(1, 2);
        Self {
            field: [[None; FIELD_X]; FIELD_Y],
            active: None,
            ghost: None,
            held: None,
            next: Piece::new(PieceKind::O, display_cell_size),
            score: 0,
            level: 1,
            lines: 0,
            combo: -1,
            floor_timer: 0,
            grounded: false,
            entry_delay: 0,
            paused: false,
            game_over: false,
            display_cell_size,
        }
    }
}
