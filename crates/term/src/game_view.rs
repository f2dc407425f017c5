//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces::EMPTY_COLOR;
use crate::core::{base_matrix, display_color, ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Narrowest side panel worth drawing
const MIN_PANEL_WIDTH: u16 = 12;

/// Ghost cells use the piece color at this brightness (percent).
const GHOST_BRIGHTNESS: u8 = 45;

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

/// Where the board frame landed in the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares cells given typical glyph aspect ratios.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        self.draw_border(fb, frame);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, *kind),
                    None => self.draw_empty_cell(fb, frame, x as i8, y as i8),
                }
            }
        }

        if let Some(active) = snap.active {
            if snap.phase != Phase::GameOver {
                if let Some(ghost_y) = snap.ghost_y.filter(|gy| *gy != active.y) {
                    self.draw_ghost(fb, frame, &active, ghost_y);
                }
            }
            for (x, y) in active.cells() {
                self.draw_block(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        let overlay = match snap.phase {
            Phase::Idle => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::GameOver => Some("GAME OVER"),
            Phase::Running => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
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
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8) {
        let bg = Rgb::from(EMPTY_COLOR);
        let style = CellStyle::new(Rgb::new(60, 70, 80), bg).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(display_color(kind).into(), Rgb::from(EMPTY_COLOR)).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, frame: Frame, active: &ActiveSnapshot, ghost_y: i8) {
        let fg = Rgb::from(display_color(active.kind)).dimmed(GHOST_BRIGHTNESS);
        let style = CellStyle::new(fg, Rgb::from(EMPTY_COLOR));
        for (x, y) in active.cells_at(ghost_y) {
            self.fill_cell_rect(fb, frame, x, y, '░', style);
        }
    }

    /// Paint one board cell. Cells outside the board (e.g. above the top) are skipped.
    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < MIN_PANEL_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            self.draw_preview(fb, panel_x, y, kind);
        }
        y = y.saturating_add(5);

        fb.put_str(panel_x, y, snap.phase.status_text(), value.dim());
    }

    /// Draw a piece's base matrix at 2 columns per cell; blank rows are skipped.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let matrix = base_matrix(kind);
        let style = CellStyle::new(display_color(kind).into(), Rgb::new(0, 0, 0));

        let mut row_y = y;
        for my in 0..matrix.size() {
            if !(0..matrix.size()).any(|mx| matrix.get(mx, my)) {
                continue;
            }
            for mx in 0..matrix.size() {
                if matrix.get(mx, my) {
                    fb.fill_rect(x + (mx as u16) * 2, row_y, 2, 1, '█', style);
                }
            }
            row_y = row_y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
