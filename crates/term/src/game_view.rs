//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the field window, then a column holding the HOLD, NEXT,
//! SCORE and LEVEL windows. Every field cell is drawn as `display_cell_size`
//! characters, and the hidden spawn rows above `FIELD_UM` are not shown.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{PieceKind, Vec2, BLINK_FRAMES, BORDER_THICKNESS, FIELD_UM, FIELD_X, FIELD_Y, TM_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Positions of every window for one cell size and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub field: Rect,
    pub hold: Rect,
    pub next: Rect,
    pub score: Rect,
    pub level: Rect,
}

const BORDER: u16 = BORDER_THICKNESS;
/// Height of the SCORE and LEVEL windows: one text row plus borders.
const TEXT_WINDOW_H: u16 = 1 + 2 * BORDER;

impl Layout {
    /// Total size of all windows for a given cell size.
    pub fn required_size(cell: Vec2) -> (u16, u16) {
        let (field_w, field_h) = field_window_size(cell);
        let (preview_w, preview_h) = preview_window_size(cell);
        let column_h = 2 * preview_h + 2 * TEXT_WINDOW_H;
        (field_w + preview_w, field_h.max(column_h))
    }

    pub fn compute(cell: Vec2, viewport: Viewport, anchor_y: AnchorY) -> Self {
        let (field_w, field_h) = field_window_size(cell);
        let (preview_w, preview_h) = preview_window_size(cell);
        let (total_w, total_h) = Self::required_size(cell);

        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let column_x = x + field_w;

        let hold = Rect::new(column_x, y, preview_w, preview_h);
        let next = Rect::new(column_x, hold.y + preview_h, preview_w, preview_h);
        let score = Rect::new(column_x, next.y + preview_h, preview_w, TEXT_WINDOW_H);
        let level = Rect::new(column_x, score.y + TEXT_WINDOW_H, preview_w, TEXT_WINDOW_H);

        Self {
            field: Rect::new(x, y, field_w, field_h),
            hold,
            next,
            score,
            level,
        }
    }
}

fn field_window_size(cell: Vec2) -> (u16, u16) {
    let w = FIELD_X as u16 * cell.x as u16 + 2 * BORDER;
    let h = (FIELD_Y - FIELD_UM) as u16 * cell.y as u16 + 2 * BORDER;
    (w, h)
}

fn preview_window_size(cell: Vec2) -> (u16, u16) {
    let w = TM_SIZE as u16 * cell.x as u16 + 2 * BORDER;
    let h = TM_SIZE as u16 * cell.y as u16 + 2 * BORDER;
    (w, h)
}

/// What the field window shows this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMode {
    Play,
    /// Field hidden behind the pause pattern
    Paused,
    /// Field visible again, still titled as paused
    Resuming,
}

const BLOCK_CHAR: char = '█';
const GHOST_CHAR: char = '░';
const EMPTY_CHAR: char = '·';
const PAUSE_CHAR: char = '/';

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes. A paused snapshot is drawn as the pause screen.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let mode = if snap.paused {
            FieldMode::Paused
        } else {
            FieldMode::Play
        };
        self.render_mode(snap, viewport, fb, mode);
    }

    /// Render the frame shown right after leaving pause: the field is visible but
    /// its window is still titled `PAUSED`.
    pub fn render_resume_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_mode(snap, viewport, fb, FieldMode::Resuming);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        Layout::compute(snap.display_cell_size, viewport, self.anchor_y)
    }

    fn render_mode(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer, mode: FieldMode) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let cell = snap.display_cell_size;

        self.draw_field(fb, snap, layout.field, cell, mode);
        let field_title = match mode {
            FieldMode::Play => "",
            FieldMode::Paused | FieldMode::Resuming => "PAUSED",
        };
        draw_window(fb, layout.field, field_title);

        draw_window(fb, layout.hold, "HOLD");
        if let Some(held) = snap.held.as_ref() {
            draw_preview(fb, layout.hold, held);
        }

        draw_window(fb, layout.next, "NEXT");
        draw_preview(fb, layout.next, &snap.next);

        let value = CellStyle::default();
        draw_window(fb, layout.score, "SCORE");
        fb.put_u32(layout.score.x + BORDER, layout.score.y + BORDER, snap.score, value);
        draw_window(fb, layout.level, "LEVEL");
        fb.put_u32(layout.level.x + BORDER, layout.level.y + BORDER, snap.level as u32, value);

        if snap.game_over {
            draw_overlay_text(fb, layout.field, "GAME OVER");
        }
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, rect: Rect, cell: Vec2, mode: FieldMode) {
        if mode == FieldMode::Paused {
            let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
            fb.fill(rect.inset(BORDER), style.cell(PAUSE_CHAR));
            return;
        }

        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        for y in FIELD_UM..FIELD_Y {
            for x in 0..FIELD_X {
                let pos = Vec2::new(y as i16, x as i16);
                match snap.field[y][x] {
                    Some(kind) => fill_field_cell(fb, rect, cell, pos, BLOCK_CHAR, block_style(kind)),
                    None => fill_field_cell(fb, rect, cell, pos, EMPTY_CHAR, empty),
                }
            }
        }

        // Pieces are hidden while the entry delay runs and on blink frames.
        let Some(active) = snap.active.as_ref() else {
            return;
        };
        if snap.blink_hidden(BLINK_FRAMES) {
            return;
        }

        if let Some(ghost) = snap.ghost.as_ref() {
            let style = CellStyle::new(piece_color(ghost.kind()), PLAY_BG).dim();
            for pos in ghost.absolute_cells() {
                fill_field_cell(fb, rect, cell, pos, GHOST_CHAR, style);
            }
        }
        for pos in active.absolute_cells() {
            fill_field_cell(fb, rect, cell, pos, BLOCK_CHAR, block_style(active.kind()));
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    CellStyle::new(piece_color(kind), PLAY_BG).bold()
}

/// Fill the characters of field cell `pos`. Cells in the hidden rows are skipped.
fn fill_field_cell(fb: &mut FrameBuffer, rect: Rect, cell: Vec2, pos: Vec2, ch: char, style: CellStyle) {
    let row = pos.y - FIELD_UM as i16;
    if row < 0 || pos.x < 0 || pos.y >= FIELD_Y as i16 || pos.x >= FIELD_X as i16 {
        return;
    }
    let px = rect.x + BORDER + pos.x as u16 * cell.x as u16;
    let py = rect.y + BORDER + row as u16 * cell.y as u16;
    fb.fill(Rect::new(px, py, cell.x as u16, cell.y as u16), style.cell(ch));
}

/// Draw a piece in a HOLD or NEXT window, centered by its cached display anchor.
fn draw_preview(fb: &mut FrameBuffer, rect: Rect, piece: &Piece) {
    let anchor = piece.display_anchor();
    let cell = piece.cell_size();
    let style = block_style(piece.kind());
    for c in piece.cells() {
        let at = anchor + *c * cell;
        if at.x < 0 || at.y < 0 {
            continue;
        }
        let at = Rect::new(rect.x + at.x as u16, rect.y + at.y as u16, cell.x as u16, cell.y as u16);
        fb.fill(at, style.cell(BLOCK_CHAR));
    }
}

/// Box-drawing border with an optional `|TITLE|` on the top edge.
fn draw_window(fb: &mut FrameBuffer, rect: Rect, title: &str) {
    let Rect { x, y, w, h } = rect;
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }

    if !title.is_empty() {
        let label = style.bold();
        fb.put_char(x + 1, y, '|', label);
        let end = fb.put_str(x + 2, y, title, label);
        fb.put_char(end, y, '|', label);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, rect: Rect, text: &str) {
    let mid_y = rect.y.saturating_add(rect.h / 2);
    let text_w = text.chars().count() as u16;
    let x = rect.x.saturating_add(rect.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
