//! Field module - the playfield grid
//!
//! `FIELD_Y` rows by `FIELD_X` columns, row 0 at the top. The first `FIELD_UM` rows
//! are a hidden spawn margin: pieces may occupy them but the renderer does not show
//! them. Rows are stored as fixed arrays so clearing is a `copy_within` on the outer
//! array and never allocates.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, Vec2, FIELD_X, FIELD_Y};

/// One field row
pub type Row = [Cell; FIELD_X];

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    rows: [Row; FIELD_Y],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            rows: [[None; FIELD_X]; FIELD_Y],
        }
    }

    #[inline(always)]
    fn index(pos: Vec2) -> Option<(usize, usize)> {
        if pos.y < 0 || pos.x < 0 || pos.y >= FIELD_Y as i16 || pos.x >= FIELD_X as i16 {
            return None;
        }
        Some((pos.y as usize, pos.x as usize))
    }

    /// Cell at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Vec2) -> Option<Cell> {
        Self::index(pos).map(|(y, x)| self.rows[y][x])
    }

    /// Set the cell at `pos`. Returns false if out of bounds.
    pub fn set(&mut self, pos: Vec2, cell: Cell) -> bool {
        match Self::index(pos) {
            Some((y, x)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_free(&self, pos: Vec2) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Whether `piece` translated by `offset` lies inside the field on empty cells.
    ///
    /// The cached bounding box rejects out-of-bounds placements before any cell is read.
    pub fn fits(&self, piece: &Piece, offset: Vec2) -> bool {
        let pos = piece.position() + offset;
        let bbox = piece.bbox();
        let top = pos.y + bbox.top as i16;
        let bottom = pos.y + bbox.bottom as i16;
        let left = pos.x + bbox.left as i16;
        let right = pos.x + bbox.right as i16;
        if top < 0 || left < 0 || bottom >= FIELD_Y as i16 || right >= FIELD_X as i16 {
            return false;
        }

        piece.cells().iter().all(|&c| self.is_free(pos + c))
    }

    /// Write the piece's cells into the grid with its kind.
    ///
    /// Callers only lock pieces that fit; cells outside the field are skipped.
    pub fn lock(&mut self, piece: &Piece) {
        for c in piece.absolute_cells() {
            self.set(c, Some(piece.kind()));
        }
    }

    /// How far the piece can fall before it would collide.
    pub fn drop_distance(&self, piece: &Piece) -> i16 {
        let mut distance = 0;
        while self.fits(piece, Vec2::new(distance + 1, 0)) {
            distance += 1;
        }
        distance
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < FIELD_Y && self.rows[y].iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        y < FIELD_Y && self.rows[y].iter().all(|cell| cell.is_none())
    }

    /// Remove row `y`, shift every row above it down by one, and clear the top row.
    pub fn remove_row(&mut self, y: usize) {
        if y >= FIELD_Y {
            return;
        }
        self.rows.copy_within(0..y, 1);
        self.rows[0] = [None; FIELD_X];
    }

    /// Remove all full rows, scanning top to bottom.
    ///
    /// Returns the removed row indices in scan order. Removing a row only moves rows
    /// above it, so rows not yet scanned keep their indices.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        for y in 0..FIELD_Y {
            if cleared.is_full() {
                break;
            }
            if self.is_row_full(y) {
                self.remove_row(y);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Bottom row empty after a clear, which means the whole field is empty.
    pub fn is_perfect_clear(&self) -> bool {
        self.is_row_empty(FIELD_Y - 1)
    }

    pub fn rows(&self) -> &[Row; FIELD_Y] {
        &self.rows
    }

    /// Build a field from rows, top first.
    pub fn from_rows(rows: [Row; FIELD_Y]) -> Self {
        Self { rows }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
