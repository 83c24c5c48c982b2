//! PuzzleView: maps a `core::PuzzleSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Every call rebuilds the whole frame: tiles are redrawn from the snapshot in
//! slot order, then overlays (hint, floating tile, banner, hearts) go on top.

use crate::core::{ParticleView, PuzzleSnapshot, HEART_KINDS};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::layout::BoardLayout;
use crate::picture::Picture;
use crate::types::{Point, Slot};

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

const BG: Rgb = Rgb::new(0, 0, 0);
const FRAME: Rgb = Rgb::new(200, 200, 200);
const GUTTER: Rgb = Rgb::new(70, 70, 80);
const IN_PLACE: Rgb = Rgb::new(90, 220, 110);
const TARGET: Rgb = Rgb::new(250, 210, 70);
const CURSOR: Rgb = Rgb::new(255, 255, 255);
const BANNER: Rgb = Rgb::new(255, 120, 170);

const HEART_GLYPHS: [char; HEART_KINDS as usize] = ['♥', '♡', '❥', '❣', '♥'];
const HEART_TINTS: [Rgb; HEART_KINDS as usize] = [
    Rgb::new(255, 60, 90),
    Rgb::new(255, 130, 180),
    Rgb::new(240, 80, 160),
    Rgb::new(255, 100, 120),
    Rgb::new(250, 170, 200),
];

/// A lightweight terminal renderer for the puzzle board.
pub struct PuzzleView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows (two picture pixels per row).
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for PuzzleView {
    fn default() -> Self {
        // 4x2 cells with half blocks gives 4x4 square pixels per tile.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl PuzzleView {
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

    /// Board placement for a grid within a viewport.
    ///
    /// The same layout is used for drawing and for mouse hit testing.
    pub fn layout(&self, grid: u8, viewport: Viewport) -> BoardLayout {
        let mut layout = BoardLayout {
            origin: Point::new(0, 0),
            grid: grid.max(1),
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        };
        let x = viewport.width.saturating_sub(layout.frame_w()) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(layout.frame_h()) / 2,
            AnchorY::Top => 0,
        };
        layout.origin = Point::new(x, y);
        layout
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is the keyboard cursor slot, highlighted when given.
    pub fn render_into(
        &self,
        snap: &PuzzleSnapshot,
        picture: &Picture,
        cursor: Option<Slot>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(snap.grid_size, viewport);
        self.draw_frame(fb, &layout);

        let drag = snap.drag;
        for tile in &snap.tiles {
            let slot = tile.current;
            let dim = drag.map(|d| d.source_slot == slot).unwrap_or(false);
            self.draw_tile(fb, &layout, picture, slot, tile.correct, dim);

            let strip = if drag.and_then(|d| d.over_slot) == Some(slot) && !dim {
                ('━', TARGET)
            } else if tile.in_place {
                ('━', IN_PLACE)
            } else {
                ('─', GUTTER)
            };
            self.draw_strip(fb, &layout, slot, strip.0, strip.1);
        }

        if snap.hint_visible {
            self.draw_hint(fb, &layout, picture);
        }

        if let Some(slot) = cursor {
            let color = if drag.is_some() { TARGET } else { CURSOR };
            self.draw_cursor(fb, &layout, slot, color);
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if let Some(d) = drag {
            if let (Some(at), Some(tile)) = (d.drag.pointer, snap.tile_at(d.source_slot)) {
                self.draw_floating_tile(fb, picture, snap.grid_size, tile.correct, at);
            }
        }

        if snap.complete {
            self.draw_banner(fb, &layout, snap.moves);
        }

        for p in &snap.particles {
            draw_particle(fb, viewport, p);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &PuzzleSnapshot,
        picture: &Picture,
        cursor: Option<Slot>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, picture, cursor, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let style = plain(FRAME);
        let Point { x, y } = layout.origin;
        let w = layout.frame_w();
        let h = layout.frame_h();

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

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        picture: &Picture,
        slot: Slot,
        correct: Slot,
        dim: bool,
    ) {
        let o = layout.tile_origin(slot);
        let tile_w = self.cell_w as u32;
        let tile_h = (self.cell_h as u32) * 2;
        for cy in 0..self.cell_h {
            for cx in 0..self.cell_w {
                let px = cx as u32;
                let py = (cy as u32) * 2;
                let mut top = picture.tile_pixel(correct, layout.grid, px, py, tile_w, tile_h);
                let mut bottom = picture.tile_pixel(correct, layout.grid, px, py + 1, tile_w, tile_h);
                if dim {
                    top = top.mix(BG, 160);
                    bottom = bottom.mix(BG, 160);
                }
                fb.put_pixels(o.x + cx, o.y + cy, top, bottom);
            }
        }
    }

    fn draw_strip(&self, fb: &mut FrameBuffer, layout: &BoardLayout, slot: Slot, ch: char, fg: Rgb) {
        let o = layout.tile_origin(slot);
        let style = plain(fg);
        fb.fill_rect(o.x, layout.strip_y(slot), self.cell_w, 1, ch, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &BoardLayout, slot: Slot, fg: Rgb) {
        let o = layout.tile_origin(slot);
        let style = CellStyle {
            bold: true,
            ..plain(fg)
        };
        for dy in 0..self.cell_h {
            fb.put_char(o.x.saturating_sub(1), o.y + dy, '▐', style);
            fb.put_char(o.x + self.cell_w, o.y + dy, '▌', style);
        }
    }

    fn draw_hint(&self, fb: &mut FrameBuffer, layout: &BoardLayout, picture: &Picture) {
        // The reference picture: every slot shows its own crop.
        let count = (layout.grid as u16) * (layout.grid as u16);
        for slot in 0..count {
            self.draw_tile(fb, layout, picture, slot, slot, false);
        }
        let label = " HINT ";
        let x = layout.origin.x + (layout.frame_w().saturating_sub(label.len() as u16)) / 2;
        let style = CellStyle {
            bold: true,
            ..plain(TARGET)
        };
        fb.put_str(x, layout.origin.y, label, style);
    }

    fn draw_floating_tile(
        &self,
        fb: &mut FrameBuffer,
        picture: &Picture,
        grid: u8,
        correct: Slot,
        at: Point,
    ) {
        let tile_w = self.cell_w as u32;
        let tile_h = (self.cell_h as u32) * 2;
        let x0 = at.x.saturating_sub(self.cell_w / 2);
        let y0 = at.y.saturating_sub(self.cell_h / 2);
        for cy in 0..self.cell_h {
            for cx in 0..self.cell_w {
                let py = (cy as u32) * 2;
                let top = picture.tile_pixel(correct, grid, cx as u32, py, tile_w, tile_h);
                let bottom = picture.tile_pixel(correct, grid, cx as u32, py + 1, tile_w, tile_h);
                fb.put_pixels(x0.saturating_add(cx), y0.saturating_add(cy), top, bottom);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &PuzzleSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.right().saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..plain(Rgb::new(220, 220, 220))
        };
        let value = plain(Rgb::new(200, 200, 200));
        let dim = CellStyle { dim: true, ..value };

        let mut y = layout.origin.y;
        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PLACED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.correct_count as u32, value);
        let total = snap.tiles.len() as u32;
        let digits = digit_count(snap.correct_count as u32);
        fb.put_char(panel_x + digits, y, '/', value);
        fb.put_u32(panel_x + digits + 1, y, total, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.seed, value);
        y = y.saturating_add(2);

        let help: [(&str, &str); 6] = [
            ("drag", "swap"),
            ("spc", "pick/drop"),
            ("r", "shuffle"),
            ("?", "hint"),
            ("n", "new"),
            ("q", "quit"),
        ];
        for (key, what) in help {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            if panel_w >= 16 {
                fb.put_str(panel_x + 5, y, what, dim);
            }
            y = y.saturating_add(1);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, layout: &BoardLayout, moves: u32) {
        let style = CellStyle {
            bold: true,
            ..plain(BANNER)
        };
        let text = " PUZZLE COMPLETE! ";
        let w = layout.frame_w();
        let x = layout.origin.x + w.saturating_sub(text.chars().count() as u16) / 2;
        fb.put_str(x, layout.origin.y, text, style);

        // Move count centred on the bottom edge: " N MOVES ".
        let digits = digit_count(moves);
        let len = digits + 8;
        let bx = layout.origin.x + w.saturating_sub(len) / 2;
        let by = layout.origin.y + layout.frame_h() - 1;
        fb.put_char(bx, by, ' ', style);
        fb.put_u32(bx + 1, by, moves, style);
        fb.put_str(bx + 1 + digits, by, " MOVES ", style);
    }
}

fn draw_particle(fb: &mut FrameBuffer, viewport: Viewport, p: &ParticleView) {
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }
    let x = ((p.x_permille as u32) * (viewport.width as u32) / 1000) as u16;
    let travel = viewport.height as u32;
    let y = (viewport.height - 1).saturating_sub(((p.rise_permille as u32) * travel / 1000) as u16);
    let kind = (p.kind as usize) % HEART_GLYPHS.len();
    let style = CellStyle {
        fg: HEART_TINTS[kind],
        bg: fb.get(x, y).map(|c| c.style.bg).unwrap_or(BG),
        bold: !p.fading,
        dim: p.fading,
    };
    fb.put_char(x, y, HEART_GLYPHS[kind], style);
}

fn plain(fg: Rgb) -> CellStyle {
    CellStyle {
        fg,
        bg: BG,
        bold: false,
        dim: false,
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
