//! Piece module - a piece instance with cached geometry
//!
//! A [`Piece`] caches its current shape, the shape's bounding box, and the display
//! anchor used to center it in a preview window. The cache is rebuilt whenever the
//! orientation changes, so it can never drift from `(kind, orientation)`.

use crate::pieces::{get_shape, PieceShape};
use crate::types::{BoundingBox, PieceKind, Rotation, Vec2, BORDER_THICKNESS, SPAWN_POSITION, TM_SIZE};

/// A falling, held, or queued piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    orientation: Rotation,
    pos: Vec2,
    cells: PieceShape,
    bbox: BoundingBox,
    display_anchor: Vec2,
    /// Terminal characters per field cell, `(rows, cols)`
    cell_size: Vec2,
}

impl Piece {
    /// New piece at the spawn position in its North orientation.
    pub fn new(kind: PieceKind, cell_size: Vec2) -> Self {
        let cells = get_shape(kind, Rotation::North);
        let bbox = BoundingBox::of(&cells);
        Self {
            kind,
            orientation: Rotation::North,
            pos: SPAWN_POSITION,
            cells,
            bbox,
            display_anchor: display_anchor(&bbox, cell_size),
            cell_size,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Top-left of the 4x4 local frame in field coordinates
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Cell offsets in the local frame
    pub fn cells(&self) -> &PieceShape {
        &self.cells
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Character offset inside a bordered preview window at which local `(0, 0)` is drawn.
    pub fn display_anchor(&self) -> Vec2 {
        self.display_anchor
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Cells in field coordinates
    pub fn absolute_cells(&self) -> [Vec2; TM_SIZE] {
        self.cells.map(|c| self.pos + c)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.pos += offset;
    }

    /// Change orientation and rebuild the cached geometry.
    pub fn set_orientation(&mut self, orientation: Rotation) {
        self.orientation = orientation;
        self.cells = get_shape(self.kind, orientation);
        self.bbox = BoundingBox::of(&self.cells);
        self.display_anchor = display_anchor(&self.bbox, self.cell_size);
    }

    /// Copy of this piece turned one step.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let mut piece = *self;
        piece.set_orientation(self.orientation.rotate(clockwise));
        piece
    }

    /// Back to spawn position and North orientation (used when a piece goes to hold).
    pub fn reset_to_spawn(&mut self) {
        self.pos = SPAWN_POSITION;
        if self.orientation != Rotation::North {
            self.set_orientation(Rotation::North);
        }
    }
}

/// Center the occupied part of a 4x4 piece frame inside a `TM_SIZE * cell_size` window.
///
/// The result is relative to the window's outer corner, border included.
fn display_anchor(bbox: &BoundingBox, cell_size: Vec2) -> Vec2 {
    let min = Vec2::new(bbox.top as i16, bbox.left as i16) * cell_size;
    let max = Vec2::new(bbox.bottom as i16 + 1, bbox.right as i16 + 1) * cell_size;
    let span = max - min;
    let window = Vec2::new(TM_SIZE as i16, TM_SIZE as i16) * cell_size;
    let margin = Vec2::new((window.y - span.y) / 2, (window.x - span.x) / 2);
    let border = BORDER_THICKNESS as i16;
    Vec2::new(border, border) + margin - min
}
