//! Pieces module tests - shapes, kick tables and rotation

use tui_blockfall::core::pieces::{get_kicks, get_shape, get_spawn_shape, try_rotate, I_KICKS, JLSTZ_KICKS};
use tui_blockfall::core::Piece;
use tui_blockfall::types::{PieceKind, Rotation, Vec2, SPAWN_POSITION};

const SMALL: Vec2 = Vec2::new(1, 2);

fn v(y: i16, x: i16) -> Vec2 {
    Vec2::new(y, x)
}

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, Rotation::North), [v(1, 0), v(1, 1), v(1, 2), v(1, 3)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::East), [v(0, 2), v(1, 2), v(2, 2), v(3, 2)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::South), [v(2, 0), v(2, 1), v(2, 2), v(2, 3)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::West), [v(0, 1), v(1, 1), v(2, 1), v(3, 1)]);
}

#[test]
fn test_o_piece_shapes() {
    // O piece is the same for all rotations
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north, [v(0, 0), v(0, 1), v(1, 0), v(1, 1)]);
    for rotation in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_points_up_at_spawn() {
    let north = get_spawn_shape(PieceKind::T);
    assert!(north.contains(&v(0, 1)));
    assert!(north.contains(&v(1, 0)));
    assert!(north.contains(&v(1, 1)));
    assert!(north.contains(&v(1, 2)));
}

#[test]
fn test_spawn_shapes_use_top_two_rows() {
    for kind in PieceKind::ALL {
        for c in get_spawn_shape(kind) {
            assert!(c.y <= 1, "{:?} spawns below row 1", kind);
        }
    }
}

// ============== Kick Tests ==============

#[test]
fn test_kick_tables_by_kind() {
    assert!(get_kicks(PieceKind::O, Rotation::North, true).is_none());
    assert_eq!(get_kicks(PieceKind::I, Rotation::North, true), Some(&I_KICKS[0][0]));
    for kind in [PieceKind::Z, PieceKind::S, PieceKind::L, PieceKind::J, PieceKind::T] {
        assert_eq!(get_kicks(kind, Rotation::East, false), Some(&JLSTZ_KICKS[1][1]));
    }
}

#[test]
fn test_rotation_in_place_preferred() {
    let result = try_rotate(PieceKind::T, Rotation::North, true, |_| true);
    assert_eq!(result, Some((Rotation::East, Vec2::ZERO)));

    let result = try_rotate(PieceKind::T, Rotation::North, false, |_| true);
    assert_eq!(result, Some((Rotation::West, Vec2::ZERO)));
}

#[test]
fn test_kicks_tried_in_order() {
    let kicks = get_kicks(PieceKind::J, Rotation::South, true).copied().unwrap();
    let accepted = [kicks[2], kicks[3]];
    let result = try_rotate(PieceKind::J, Rotation::South, true, |offset| accepted.contains(&offset));
    assert_eq!(result, Some((Rotation::West, kicks[2])));
}

#[test]
fn test_rotation_fails_when_nothing_fits() {
    assert_eq!(try_rotate(PieceKind::I, Rotation::West, true, |_| false), None);
    assert_eq!(try_rotate(PieceKind::S, Rotation::East, false, |_| false), None);
}

// ============== Piece Tests ==============

#[test]
fn test_new_piece_at_spawn() {
    let piece = Piece::new(PieceKind::L, SMALL);
    assert_eq!(piece.position(), SPAWN_POSITION);
    assert_eq!(piece.orientation(), Rotation::North);
    assert_eq!(piece.cells(), &get_spawn_shape(PieceKind::L));
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let start = Piece::new(kind, SMALL);
        let mut piece = start;
        for _ in 0..4 {
            piece = piece.rotated(true);
        }
        assert_eq!(piece, start);

        let back = start.rotated(true).rotated(false);
        assert_eq!(back, start);
    }
}

#[test]
fn test_rotated_piece_keeps_position() {
    let mut piece = Piece::new(PieceKind::Z, SMALL);
    piece.translate(v(5, -2));
    let turned = piece.rotated(false);
    assert_eq!(turned.position(), piece.position());
    assert_eq!(turned.orientation(), Rotation::West);
    assert_eq!(turned.cells(), &get_shape(PieceKind::Z, Rotation::West));
}

#[test]
fn test_absolute_cells_offset_by_position() {
    let mut piece = Piece::new(PieceKind::O, SMALL);
    piece.set_position(v(10, 3));
    assert_eq!(piece.absolute_cells(), [v(10, 3), v(10, 4), v(11, 3), v(11, 4)]);
}
