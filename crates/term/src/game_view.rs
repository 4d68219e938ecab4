//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShapeKind;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Lays out the board, a score panel and the game-over banner.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Top-left corner of the board frame on screen.
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the
    /// viewport first.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let cols = u16::from(snap.bounds.width());
        let rows = u16::from(snap.bounds.height());
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        draw_border(
            fb,
            origin,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        // Screen rows run top-down, grid rows bottom-up.
        let x_min = i16::from(snap.bounds.x_min());
        let y_top = i16::from(snap.bounds.y_max()) - 1;
        for row in 0..rows {
            for col in 0..cols {
                let x = (x_min + col as i16) as i8;
                let y = (y_top - row as i16) as i8;
                match snap.visible(x, y) {
                    Some(kind) => self.fill_cell(fb, origin, col, row, '█', shape_style(kind)),
                    None => self.fill_cell(
                        fb,
                        origin,
                        col,
                        row,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim(),
                    ),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.game_over {
            draw_banner(fb, origin, frame_w, frame_h, "GAME OVER");
            draw_banner(
                fb,
                Origin {
                    x: origin.x,
                    y: origin.y.saturating_add(2),
                },
                frame_w,
                frame_h,
                "R to restart",
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: Origin,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.x.saturating_add(1).saturating_add(col.saturating_mul(self.cell_w));
        let py = origin.y.saturating_add(1).saturating_add(row.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        origin: Origin,
        frame_w: u16,
    ) {
        let panel_x = origin.x.saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = origin.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        if let Some(active) = snap.active {
            fb.put_str(panel_x, y, "PIECE", label);
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, active.kind.as_str(), shape_style(active.kind));
            y = y.saturating_add(2);
        }

        let help = value.dim();
        for line in ["←→↓ move", "↑/x  rotate", "z    rotate ccw", "spc  drop", "esc  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

fn shape_style(kind: ShapeKind) -> CellStyle {
    let fg = match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, BOARD_BG).bold()
}

fn draw_border(fb: &mut FrameBuffer, origin: Origin, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let Origin { x, y } = origin;

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

fn draw_banner(fb: &mut FrameBuffer, origin: Origin, frame_w: u16, frame_h: u16, text: &str) {
    let mid_y = origin.y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = origin.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.put_str(
        x,
        mid_y,
        text,
        CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold(),
    );
}
