//! TerminalRenderer: flushes framebuffers to a real terminal.
//!
//! The first frame (and any frame after a resize) is drawn in full; after that only
//! runs of changed cells are re-emitted.

use std::io::{self, Write};
use std::mem;

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Previously presented frame; `None` forces a full redraw
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Raw mode is disabled even if the write fails.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next frame to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Present `fb`, then hand back the previous frame in its place.
    ///
    /// Callers keep one framebuffer and render into it every frame; the two buffers
    /// ping-pong so diffing never clones.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching the terminal.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            pen.print(out, cell.style, cell.ch)?;
        }
    }

    pen.reset(out)
}

/// Encode only the runs of cells that differ between two equally sized frames.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for run in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let cell = next.get(x, run.y).unwrap_or_default();
            pen.print(out, cell.style, cell.ch)?;
        }
    }

    if pen.used() {
        pen.reset(out)?;
    }
    Ok(())
}

/// Tracks the active terminal style so it is only re-sent when it changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, style: CellStyle, ch: char) -> Result<()> {
        if self.style != Some(style) {
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(ch))?;
        Ok(())
    }

    fn used(&self) -> bool {
        self.style.is_some()
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        self.style = None;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// A horizontal run of changed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Iterator over maximal runs of differing cells, row by row.
///
/// Frames of different sizes are treated as entirely changed.
pub struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    full: bool,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    pub fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            full: prev.width() != next.width() || prev.height() != next.height(),
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let w = self.next.width();
        let h = self.next.height();

        while self.y < h {
            if self.full {
                let y = self.y;
                self.y += 1;
                if w > 0 {
                    return Some(Run { x: 0, y, len: w });
                }
                continue;
            }

            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some(Run {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }

            self.x = 0;
            self.y += 1;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn x_cell() -> Cell {
        CellStyle::default().into_cell('X')
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);
        for x in 1..=3 {
            b.set(x, 0, x_cell());
        }
        b.set(0, 1, x_cell());
        b.set(4, 1, x_cell());

        let runs: Vec<Run> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(
            runs,
            vec![
                Run { x: 1, y: 0, len: 3 },
                Run { x: 0, y: 1, len: 1 },
                Run { x: 4, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 3);
        assert_eq!(ChangedRuns::new(&a, &a.clone()).count(), 0);

        let mut out = Vec::new();
        encode_diff_into(&a, &a, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn size_change_marks_every_row() {
        let a = FrameBuffer::new(2, 2);
        let b = FrameBuffer::new(3, 2);
        let runs: Vec<Run> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(runs.len(), 2);
        assert!(runs.iter().all(|r| r.x == 0 && r.len == 3));
    }

    #[test]
    fn present_diffs_after_first_frame() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ab", CellStyle::default());
        renderer.present(&mut fb).unwrap();
        let first = renderer.writer().len();
        assert!(first > 0);

        // The swapped-in buffer is the blank previous frame.
        assert_eq!(fb.row_text(0), "    ");

        // Re-render the same content: nothing to emit.
        fb.put_str(0, 0, "ab", CellStyle::default());
        renderer.present(&mut fb).unwrap();
        assert_eq!(renderer.writer().len(), first);

        fb.put_str(0, 0, "ac", CellStyle::default());
        renderer.present(&mut fb).unwrap();
        let emitted = String::from_utf8_lossy(&renderer.writer()[first..]).into_owned();
        assert!(emitted.contains('c'));
        assert!(!emitted.contains('a'));
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
