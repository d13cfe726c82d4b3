//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{PieceKind, Rgb, BLOCK_SIZE, PALETTE};

const BOARD_BG: Rgb = PALETTE[0];
const GRID_FG: Rgb = Rgb::new(60, 60, 60);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const LABEL_FG: Rgb = Rgb::new(220, 220, 220);
const VALUE_FG: Rgb = Rgb::new(200, 200, 200);

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

/// Final stats shown over the board after a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverBanner {
    pub final_score: u32,
    pub final_lines: u32,
    pub final_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Lays out the board, side panel and banner for one snapshot.
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
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
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

    /// Scale cells from a block size in pixels.
    ///
    /// The default 30px block maps to one row by two columns; every further
    /// multiple of 30 adds a row (and two columns).
    pub fn from_block_size(block_size: u16) -> Self {
        let cell_h = (block_size / BLOCK_SIZE).max(1);
        Self::new(cell_h.saturating_mul(2), cell_h)
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_banner(snap, None, viewport, fb);
    }

    pub fn render_into_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&GameOverBanner>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        fb.draw_box(start_x, start_y, frame_w, frame_h, CellStyle::plain(BORDER_FG, BOARD_BG));

        // Locked cells, with a faint dot for empty ones.
        let empty = CellStyle::plain(GRID_FG, BOARD_BG).dim();
        for y in 0..snap.height {
            for x in 0..snap.width {
                match PieceKind::from_id(snap.cell(x, y)) {
                    Some(kind) => self.draw_block(fb, start_x, start_y, x, y, kind),
                    None => self.fill_cell_rect(fb, start_x, start_y, x, y, '·', empty),
                }
            }
        }

        // Active piece; rows above the top stay hidden.
        if let Some(active) = &snap.active {
            for (x, y) in active.cells() {
                if x >= 0 && y >= 0 && (x as u16) < snap.width && (y as u16) < snap.height {
                    self.draw_block(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if let Some(banner) = banner {
            self.draw_banner(fb, banner, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_banner(
        &self,
        snap: &GameSnapshot,
        banner: Option<&GameOverBanner>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_banner(snap, banner, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::plain(kind.color(), BOARD_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::plain(LABEL_FG, BOARD_BG).bold();
        let value = CellStyle::plain(VALUE_FG, BOARD_BG);

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, n, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let preview = get_shape(snap.next);
        let style = CellStyle::plain(snap.next.color(), BOARD_BG).bold();
        for (dx, dy) in preview.occupied() {
            let px = panel_x.saturating_add(dx as u16 * 2);
            let py = y.saturating_add(dy as u16);
            fb.fill_rect(px, py, 2, 1, '█', style);
        }
        y = y.saturating_add(preview.rows() as u16).saturating_add(1);

        if panel_w < 16 {
            return;
        }
        let hint = value.dim();
        for line in ["←→  move", "↑   rotate", "↓   soft drop", "SPC hard drop", "Q   quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        banner: &GameOverBanner,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), BOARD_BG).bold();
        let title = "GAME OVER";
        let x = start_x.saturating_add(frame_w.saturating_sub(title.len() as u16) / 2);
        fb.put_str(x, mid_y.saturating_sub(1), title, style);

        let digits = decimal_width(banner.final_score);
        let line_w = 6 + digits;
        let x = start_x.saturating_add(frame_w.saturating_sub(line_w) / 2);
        let after = fb.put_str(x, mid_y.saturating_add(1), "SCORE ", style);
        fb.put_u32(after, mid_y.saturating_add(1), banner.final_score, style);
    }
}

fn decimal_width(mut n: u32) -> u16 {
    let mut w = 1;
    while n >= 10 {
        n /= 10;
        w += 1;
    }
    w
}
