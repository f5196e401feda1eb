//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame and any frame after a size change are full redraws; every other
//! frame only rewrites runs of changed cells.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Current terminal size as a viewport.
    pub fn viewport() -> Result<Viewport> {
        let (width, height) = terminal::size()?;
        Ok(Viewport::new(width, height))
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Undo [`TerminalRenderer::enter`]. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// The renderer will diff against the previous frame and then swap buffers
    /// so the caller can reuse the old one without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        // Take previous out to avoid borrow conflicts (no cloning).
        let (mut prev, needs_full) = match self.last.take() {
            Some(prev) => {
                let resized = prev.width() != fb.width() || prev.height() != fb.height();
                (prev, resized)
            }
            None => (FrameBuffer::new(fb.width(), fb.height()), true),
        };

        if needs_full {
            self.buf.clear();
            encode_full_into(fb, &mut self.buf)?;
            self.flush_buf()?;
            prev.resize(fb.width(), fb.height());
        } else {
            self.buf.clear();
            encode_diff_into(&prev, fb, &mut self.buf)?;
            self.flush_buf()?;
        }

        // Swap current into prev so next frame can diff without cloning.
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for (y, row) in rows(fb).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for cell in row {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// Identical frames encode to nothing. A size mismatch falls back to a full redraw.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut pen = Pen::default();
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for run in changed_runs(old, new) {
            out.queue(cursor::MoveTo(run.start as u16, y as u16))?;
            for cell in &new[run] {
                pen.print(out, cell)?;
            }
        }
    }
    pen.finish(out)
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    // `chunks` panics on a zero width; an empty buffer has no rows anyway.
    fb.cells().chunks(fb.width().max(1) as usize)
}

/// Ranges of `new` that differ from `old`, adjacent changed cells merged.
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && old[x] == new[x] {
            x += 1;
        }
        if x >= new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && old[x] != new[x] {
            x += 1;
        }
        Some(start..x)
    })
}

/// Tracks the terminal's current style so each change is sent once.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: &Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    /// Leave the terminal with default colors if anything was printed.
    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
