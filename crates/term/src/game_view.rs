//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, ShapeKind, SPAWN_BUFFER_ROW};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Vertical placement of the board frame inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the bomb-piece game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Top-left corner of the board frame in terminal coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
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
    /// The framebuffer is resized to the viewport; callers keep one buffer
    /// across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let rows = snap.rows.max(0) as u16;
        let cols = snap.cols.max(0) as u16;
        let board_w = cols * self.cell_w;
        let board_h = rows * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        let play = CellStyle::fg(PLAY_BG).on(PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', play);
        draw_border(fb, frame, CellStyle::fg(Rgb::new(200, 200, 200)));

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let pos = Position::new(row, col);
                match snap.get(pos) {
                    Some(block) => {
                        let active = snap.is_active_cell(pos);
                        self.draw_block(fb, frame, pos, block.kind, active);
                    }
                    None => self.draw_empty_cell(fb, frame, pos),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, pos: Position) {
        // The spawn-buffer row gets its own mark so the danger line is visible.
        let (ch, fg) = if pos.row == SPAWN_BUFFER_ROW {
            ('-', Rgb::new(140, 60, 60))
        } else {
            ('·', Rgb::new(90, 90, 100))
        };
        let style = CellStyle::fg(fg).on(PLAY_BG).dim();
        self.fill_cell(fb, frame, pos, ch, style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        pos: Position,
        kind: ShapeKind,
        active: bool,
    ) {
        let ch = if kind.is_bomb() { '▓' } else { '█' };
        let mut style = CellStyle::fg(kind.color().into()).on(PLAY_BG);
        if active {
            style = style.bold();
        }
        self.fill_cell(fb, frame, pos, ch, style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        pos: Position,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + (pos.col as u16) * self.cell_w;
        let py = frame.y + 1 + (pos.row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).on(PANEL_BG).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200)).on(PANEL_BG);
        let hint = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "TETRAD", label);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.pieces_spawned as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u64(panel_x, y, snap.rows_cleared as u64, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SEED", label);
        y = y.saturating_add(1);
        match snap.seed {
            Some(seed) => fb.put_u64(panel_x, y, seed, value),
            None => fb.put_str(panel_x, y, "-", value),
        };
        y = y.saturating_add(2);

        let bomb = CellStyle::fg(ShapeKind::Bomb.color().into()).on(PANEL_BG);
        let x = fb.put_str(panel_x, y, "▓▓", bomb);
        fb.put_str(x + 1, y, "bomb", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "keep -- clear", hint);
        y = y.saturating_add(2);

        for line in ["←→ move", "↑ rotate", "↓ drop", "space slam", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
