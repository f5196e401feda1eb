//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 21 rows (indexed 0-20), of which row 0 is a hidden upper margin
//!   used as spawn buffer
//! - **Spawn position**: `y = 0`, `x = FIELD_X / 2 - 1`
//!
//! # Frame Timing
//!
//! The core counts frames, not milliseconds. Every frame-based budget is expressed
//! at [`REFERENCE_FRAME_RATE`] and rescaled by [`Timing`] for the host's actual rate:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `REFERENCE_FRAME_RATE` | 30 | Rate the gravity table and entry delay are authored at |
//! | `DEFAULT_FRAME_RATE` | 60 | Host frame rate when not configured |
//! | `LOCK_DELAY_DIVISOR` | 2 | Floor timer budget is `frame_rate / 2` (half a second) |
//! | `FLOOR_MOVES` | 15 | Max floor-timer resets per piece |
//! | `ENTRY_DELAY_REF_FRAMES` | 10 | Frames between lock and next spawn |
//! | `BLINK_FRAMES` | 4 | About-to-lock blink period |
//!
//! # Gravity by Level
//!
//! Frames per one-cell drop at the reference rate, indexed by `level - 1`:
//!
//! | Level | Frames |
//! |-------|--------|
//! | 1 | 50 |
//! | 5 | 42 |
//! | 10 | 32 |
//! | 15 | 22 |
//! | 20+ | 4 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, Rotation, Vec2, FIELD_X, FIELD_Y};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate(true), Rotation::East);
//! assert_eq!(Rotation::North.rotate(false), Rotation::West);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(Vec2::new(1, 2) + Vec2::DOWN, Vec2::new(2, 2));
//! assert_eq!((FIELD_X, FIELD_Y), (10, 21));
//! ```

use std::ops::{Add, AddAssign, Mul, Sub};

/// Field width in cells
pub const FIELD_X: usize = 10;

/// Field height in cells, including the hidden upper margin
pub const FIELD_Y: usize = 21;

/// Hidden rows above the visible playing area
pub const FIELD_UM: usize = 1;

/// Side length of the local frame every piece is authored in
pub const TM_SIZE: usize = 4;

/// Number of piece kinds
pub const TM_NUM: usize = 7;

/// Number of rotation states
pub const TM_ORIENT: usize = 4;

/// Wall-kick candidates tried after an in-place rotation fails
pub const WK_TESTS: usize = 4;

/// Width of a window border in terminal cells
pub const BORDER_THICKNESS: u16 = 1;

/// Lines required to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Floor-timer resets granted to a single piece
pub const FLOOR_MOVES: u8 = 15;

/// Frame rate the gravity table and entry delay are authored at
pub const REFERENCE_FRAME_RATE: u32 = 30;

/// Frame rate used when the host does not configure one
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Lock-down budget is `frame_rate / LOCK_DELAY_DIVISOR` frames
pub const LOCK_DELAY_DIVISOR: u32 = 2;

/// Entry delay at the reference frame rate
pub const ENTRY_DELAY_REF_FRAMES: u32 = 10;

/// Blink period of a grounded piece, in floor-timer frames
pub const BLINK_FRAMES: u16 = 4;

/// Number of entries in the gravity table
pub const LVL_NUM: usize = 20;

/// Gravity table: frames per one-cell drop at [`REFERENCE_FRAME_RATE`], indexed by `level - 1`.
///
/// Levels above [`LVL_NUM`] reuse the last entry.
pub const GRAVITY: [u16; LVL_NUM] = [
    50, 48, 46, 44, 42, 40, 38, 36, 34, 32, //
    30, 28, 26, 24, 22, 20, 16, 12, 8, 4,
];

/// Line clear multipliers indexed by lines cleared in one step (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Line clear multipliers when the clear empties the field
pub const PERFECT_CLEAR_SCORES: [u32; 5] = [0, 800, 1200, 1800, 3200];

/// Combo bonus per combo step (multiplied by combo and level)
pub const COMBO_BASE: u32 = 50;

/// Points per cell for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Origin of a freshly spawned piece
pub const SPAWN_POSITION: Vec2 = Vec2::new(0, (FIELD_X / 2) as i16 - 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_tables_match_rules() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(PERFECT_CLEAR_SCORES, [0, 800, 1200, 1800, 3200]);
        assert_eq!(COMBO_BASE, 50);
    }

    #[test]
    fn gravity_table_is_monotonic() {
        assert!(GRAVITY.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(GRAVITY[0], 50);
        assert_eq!(GRAVITY[LVL_NUM - 1], 4);
    }

    #[test]
    fn spawn_position_is_centered() {
        assert_eq!(SPAWN_POSITION, Vec2::new(0, 4));
    }

    #[test]
    fn timing_scales_with_frame_rate() {
        let t60 = Timing::new(60);
        assert_eq!(t60.gravity_frames(1), 100);
        assert_eq!(t60.gravity_frames(20), 8);
        assert_eq!(t60.lock_frames(), 30);
        assert_eq!(t60.entry_delay_frames(), 20);
    }

    #[test]
    fn timing_at_reference_rate_uses_tables_verbatim() {
        let t30 = Timing::new(REFERENCE_FRAME_RATE);
        assert_eq!(t30.gravity_frames(1), 50);
        assert_eq!(t30.gravity_frames(20), 4);
        assert_eq!(t30.entry_delay_frames(), 10);
        // Half a second at any rate.
        assert_eq!(t30.lock_frames(), 15);
    }

    #[test]
    fn timing_clamps_high_levels_and_tiny_rates() {
        let t = Timing::new(60);
        assert_eq!(t.gravity_frames(21), t.gravity_frames(20));
        assert_eq!(t.gravity_frames(99), 8);
        assert_eq!(t.gravity_frames(0), 100);

        let slow = Timing::new(1);
        assert_eq!(slow.gravity_frames(20), 1);
        assert_eq!(slow.lock_frames(), 1);
        assert_eq!(slow.entry_delay_frames(), 1);
    }

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2::new(2, 3);
        let b = Vec2::new(1, -1);
        assert_eq!(a + b, Vec2::new(3, 2));
        assert_eq!(a - b, Vec2::new(1, 4));
        assert_eq!(a * Vec2::new(2, 4), Vec2::new(4, 12));

        let mut c = a;
        c += Vec2::LEFT;
        assert_eq!(c, Vec2::new(2, 2));
    }

    #[test]
    fn bounding_box_of_cells() {
        let cells = [
            Vec2::new(1, 0),
            Vec2::new(1, 1),
            Vec2::new(1, 2),
            Vec2::new(0, 1),
        ];
        let bbox = BoundingBox::of(&cells);
        assert_eq!(
            bbox,
            BoundingBox {
                top: 0,
                bottom: 1,
                left: 0,
                right: 2
            }
        );
        assert_eq!(bbox.height(), 2);
        assert_eq!(bbox.width(), 3);
    }
}

/// 2D integer vector, `y` first.
///
/// Used both as field coordinates and as terminal cell offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec2 {
    pub y: i16,
    pub x: i16,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);
    pub const LEFT: Vec2 = Vec2::new(0, -1);
    pub const RIGHT: Vec2 = Vec2::new(0, 1);
    pub const UP: Vec2 = Vec2::new(-1, 0);
    pub const DOWN: Vec2 = Vec2::new(1, 0);

    pub const fn new(y: i16, x: i16) -> Self {
        Self { y, x }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.y + rhs.y, self.x + rhs.x)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.y += rhs.y;
        self.x += rhs.x;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.y - rhs.y, self.x - rhs.x)
    }
}

/// Component-wise product (cell coordinates scaled to terminal cells).
impl Mul for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.y * rhs.y, self.x * rhs.x)
    }
}

/// Inclusive bounds of a piece's occupied cells in its local 4x4 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    pub top: u8,
    pub bottom: u8,
    pub left: u8,
    pub right: u8,
}

impl BoundingBox {
    /// Compute the bounding box of four local cells.
    pub fn of(cells: &[Vec2; 4]) -> Self {
        let mut bbox = BoundingBox {
            top: (TM_SIZE - 1) as u8,
            bottom: 0,
            left: (TM_SIZE - 1) as u8,
            right: 0,
        };
        for c in cells {
            let (y, x) = (c.y as u8, c.x as u8);
            bbox.top = bbox.top.min(y);
            bbox.bottom = bbox.bottom.max(y);
            bbox.left = bbox.left.min(x);
            bbox.right = bbox.right.max(x);
        }
        bbox
    }

    pub fn width(&self) -> u8 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u8 {
        self.bottom - self.top + 1
    }
}

/// The seven piece kinds, in catalog order
///
/// Each piece has a distinct shape and color:
/// - **O**: Yellow, 2x2 square
/// - **Z**: Red, Z-shaped
/// - **S**: Green, S-shaped (mirror of Z)
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
/// - **T**: Magenta, T-shaped
/// - **I**: Cyan, horizontal bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    Z,
    S,
    L,
    J,
    T,
    I,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; TM_NUM] = [
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::I,
    ];

    /// Catalog index (0-6)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
            PieceKind::I => "i",
        }
    }
}

/// Rotation states
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Orientation index in `[0, 4)`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Inverse of [`Rotation::index`], wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % TM_ORIENT {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// `(orientation + (clockwise ? 1 : 3)) % 4`
    pub fn rotate(&self, clockwise: bool) -> Self {
        Self::from_index(self.index() + if clockwise { 1 } else { 3 })
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        self.rotate(true)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        self.rotate(false)
    }
}

/// One input event, as delivered by the host once per frame
///
/// "No event" is represented by `Option::None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the held one (once per piece)
    Hold,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Move one cell down (with soft drop scoring)
    SoftDrop,
    /// Stop the game
    Quit,
    /// Suspend the frame loop (handled by the host)
    Pause,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "harddrop" => Some(GameAction::HardDrop),
            "softdrop" => Some(GameAction::SoftDrop),
            "quit" => Some(GameAction::Quit),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::HardDrop => "hardDrop",
            GameAction::SoftDrop => "softDrop",
            GameAction::Quit => "quit",
            GameAction::Pause => "pause",
        }
    }
}

/// Result of one frame transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Core-side event emitted after a piece locks.
///
/// The host maps this into its event log; the core never performs I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub score_gained: u32,
    pub perfect_clear: bool,
    pub combo: i8,
    pub level: u8,
    pub hard_drop_cells: u32,
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Frame-rate dependent budgets, derived once from the host's frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    frame_rate: u32,
}

impl Timing {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    fn scale(&self, reference_frames: u32) -> u16 {
        let frames = reference_frames * self.frame_rate / REFERENCE_FRAME_RATE;
        frames.clamp(1, u16::MAX as u32) as u16
    }

    /// Frames per one-cell drop at `level` (1-based; levels past the table clamp).
    pub fn gravity_frames(&self, level: u8) -> u16 {
        let idx = (level.max(1) as usize - 1).min(LVL_NUM - 1);
        self.scale(GRAVITY[idx] as u32)
    }

    /// Frames a grounded piece may rest before it is forced to lock.
    pub fn lock_frames(&self) -> u16 {
        (self.frame_rate / LOCK_DELAY_DIVISOR).clamp(1, u16::MAX as u32) as u16
    }

    pub fn entry_delay_frames(&self) -> u16 {
        self.scale(ENTRY_DELAY_REF_FRAMES)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}
