//! Pieces module - piece shapes and wall kick tables
//!
//! Every shape is authored in a 4x4 local frame as `(y, x)` offsets with `y` growing
//! downward. Kick offsets use the same convention, so they can be added directly to
//! a piece position.

use crate::types::{PieceKind, Rotation, Vec2, TM_NUM, TM_ORIENT, TM_SIZE, WK_TESTS};

/// Shape of a piece - 4 cell offsets from the piece origin
pub type PieceShape = [Vec2; TM_SIZE];

const fn v(y: i16, x: i16) -> Vec2 {
    Vec2::new(y, x)
}

/// `ROTATION_SHAPE[kind][orientation]`, indexed by catalog order.
pub const ROTATION_SHAPE: [[PieceShape; TM_ORIENT]; TM_NUM] = [
    // O
    [
        [v(0, 0), v(0, 1), v(1, 0), v(1, 1)],
        [v(0, 0), v(0, 1), v(1, 0), v(1, 1)],
        [v(0, 0), v(0, 1), v(1, 0), v(1, 1)],
        [v(0, 0), v(0, 1), v(1, 0), v(1, 1)],
    ],
    // Z
    [
        [v(1, 2), v(1, 1), v(0, 1), v(0, 0)],
        [v(2, 1), v(1, 1), v(1, 2), v(0, 2)],
        [v(1, 0), v(1, 1), v(2, 1), v(2, 2)],
        [v(0, 1), v(1, 1), v(1, 0), v(2, 0)],
    ],
    // S
    [
        [v(1, 0), v(1, 1), v(0, 1), v(0, 2)],
        [v(0, 1), v(1, 1), v(1, 2), v(2, 2)],
        [v(1, 2), v(1, 1), v(2, 1), v(2, 0)],
        [v(2, 1), v(1, 1), v(1, 0), v(0, 0)],
    ],
    // L
    [
        [v(1, 0), v(1, 1), v(1, 2), v(0, 2)],
        [v(0, 1), v(1, 1), v(2, 1), v(2, 2)],
        [v(1, 0), v(1, 1), v(1, 2), v(2, 0)],
        [v(0, 1), v(1, 1), v(2, 1), v(0, 0)],
    ],
    // J
    [
        [v(1, 0), v(1, 1), v(1, 2), v(0, 0)],
        [v(0, 1), v(1, 1), v(2, 1), v(0, 2)],
        [v(1, 0), v(1, 1), v(1, 2), v(2, 2)],
        [v(0, 1), v(1, 1), v(2, 1), v(2, 0)],
    ],
    // T
    [
        [v(1, 0), v(1, 1), v(1, 2), v(0, 1)],
        [v(0, 1), v(1, 1), v(2, 1), v(1, 2)],
        [v(1, 0), v(1, 1), v(1, 2), v(2, 1)],
        [v(0, 1), v(1, 1), v(2, 1), v(1, 0)],
    ],
    // I
    [
        [v(1, 0), v(1, 1), v(1, 2), v(1, 3)],
        [v(0, 2), v(1, 2), v(2, 2), v(3, 2)],
        [v(2, 0), v(2, 1), v(2, 2), v(2, 3)],
        [v(0, 1), v(1, 1), v(2, 1), v(3, 1)],
    ],
];

/// Get the shape (cell offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    ROTATION_SHAPE[kind.index()][rotation.index()]
}

/// Get initial shape for a new piece
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Kick candidates indexed by `[direction][from_orientation]`,
/// where direction 0 is clockwise and 1 is counter-clockwise.
pub type KickTable = [[[Vec2; WK_TESTS]; TM_ORIENT]; 2];

/// Kick table shared by Z, S, L, J and T
pub const JLSTZ_KICKS: KickTable = [
    // clockwise
    [
        [v(0, -1), v(-1, -1), v(2, 0), v(2, -1)], // 0 -> 1
        [v(0, 1), v(1, 1), v(-2, 0), v(-2, 1)],   // 1 -> 2
        [v(0, 1), v(-1, 1), v(2, 0), v(2, 1)],    // 2 -> 3
        [v(0, -1), v(1, -1), v(-2, 0), v(-2, -1)], // 3 -> 0
    ],
    // counter-clockwise
    [
        [v(0, 1), v(-1, 1), v(2, 0), v(2, 1)],    // 0 -> 3
        [v(0, 1), v(1, 1), v(-2, 0), v(-2, 1)],   // 1 -> 0
        [v(0, -1), v(-1, -1), v(2, 0), v(2, -1)], // 2 -> 1
        [v(0, -1), v(1, -1), v(-2, 0), v(-2, -1)], // 3 -> 2
    ],
];

/// I piece kick table
pub const I_KICKS: KickTable = [
    // clockwise
    [
        [v(0, -2), v(0, 1), v(1, -2), v(-2, 1)], // 0 -> 1
        [v(0, -1), v(0, 2), v(-2, -1), v(1, 2)], // 1 -> 2
        [v(0, 2), v(0, -1), v(-1, 2), v(2, -1)], // 2 -> 3
        [v(0, 1), v(0, -2), v(2, 1), v(-1, -2)], // 3 -> 0
    ],
    // counter-clockwise
    [
        [v(0, -1), v(0, 2), v(-2, -1), v(1, 2)], // 0 -> 3
        [v(0, 2), v(0, -1), v(-1, 2), v(2, -1)], // 1 -> 0
        [v(0, 1), v(0, -2), v(2, 1), v(-1, -2)], // 2 -> 1
        [v(0, -2), v(0, 1), v(1, -2), v(-2, 1)], // 3 -> 2
    ],
];

/// Kick candidates for rotating `kind` out of `from` in the given direction.
///
/// Returns `None` for the O piece, which never kicks.
pub fn get_kicks(kind: PieceKind, from: Rotation, clockwise: bool) -> Option<&'static [Vec2; WK_TESTS]> {
    let dir = if clockwise { 0 } else { 1 };
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS[dir][from.index()]),
        _ => Some(&JLSTZ_KICKS[dir][from.index()]),
    }
}

/// Try to rotate a piece with wall kicks
///
/// `fits(offset)` answers whether the piece, already turned to the new rotation, is
/// legal at its current position translated by `offset`. Returns the new rotation and
/// the applied offset, or `None` if neither the in-place rotation nor any kick fits.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    clockwise: bool,
    fits: impl Fn(Vec2) -> bool,
) -> Option<(Rotation, Vec2)> {
    let new_rotation = rotation.rotate(clockwise);

    // All four O orientations are the same cells.
    let Some(kicks) = get_kicks(kind, rotation, clockwise) else {
        return Some((new_rotation, Vec2::ZERO));
    };

    if fits(Vec2::ZERO) {
        return Some((new_rotation, Vec2::ZERO));
    }

    kicks
        .iter()
        .copied()
        .find(|&offset| fits(offset))
        .map(|offset| (new_rotation, offset))
}
