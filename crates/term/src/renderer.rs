//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The view rebuilds the whole frame every time; this layer decides what the
//! terminal has to receive. Most of the screen is half-block picture pixels,
//! where neighbouring cells often share one of their two colours, so the
//! encoder tracks foreground, background and attributes separately and emits
//! only the part that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, FrameBuffer, Rgb};

/// Unchanged cells between two dirty runs that are reprinted rather than
/// skipped with a cursor move (a `MoveTo` costs about as many bytes).
const RUN_MERGE_GAP: usize = 4;

pub struct TerminalRenderer {
    out: io::Stdout,
    /// What the terminal currently shows; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, mouse reporting, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf().context("failed to set up terminal")
    }

    /// Undo everything `enter` did.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }

    /// Forget what is on screen; the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand the previously shown buffer back through `fb`.
    ///
    /// The caller renders the next frame into whatever comes back, so frames
    /// are never cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.buf)?;
                shown
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut spare = stale.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out
            .write_all(&self.buf)
            .context("failed to write to terminal")?;
        self.out.flush().context("failed to flush terminal")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode a full repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            pen.put(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Frames of different sizes fall back to a full repaint.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if !same_size(prev, next) {
        return encode_full_into(next, out);
    }

    let mut pen = Pen::default();
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        if old == new {
            continue;
        }
        for_each_dirty_run(old, new, |start, end| {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for &cell in &new[start..end] {
                pen.put(out, cell)?;
            }
            Ok(())
        })?;
    }
    pen.finish(out)
}

/// Call `f(start, end)` for each dirty span of a row.
///
/// Spans separated by at most [`RUN_MERGE_GAP`] clean cells are merged.
fn for_each_dirty_run(
    old: &[Cell],
    new: &[Cell],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let mut run: Option<(usize, usize)> = None;
    for (x, cell) in new.iter().enumerate() {
        if old.get(x) == Some(cell) {
            continue;
        }
        run = match run {
            Some((start, end)) if x - end <= RUN_MERGE_GAP => Some((start, x + 1)),
            Some((start, end)) => {
                f(start, end)?;
                Some((x, x + 1))
            }
            None => Some((x, x + 1)),
        };
    }
    if let Some((start, end)) = run {
        f(start, end)?;
    }
    Ok(())
}

/// Terminal drawing state while one frame is encoded.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    /// (bold, dim)
    attrs: Option<(bool, bool)>,
}

impl Pen {
    fn put(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        let style = cell.style;
        let attrs = (style.bold, style.dim);
        if self.attrs != Some(attrs) {
            // SGR reset clears colours too.
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.attrs = Some(attrs);
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::CellStyle;

    fn frame(text: &str) -> FrameBuffer {
        let mut fb = FrameBuffer::new(text.chars().count() as u16, 1);
        fb.put_str(0, 0, text, CellStyle::default());
        fb
    }

    fn runs(old: &FrameBuffer, new: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        for_each_dirty_run(old.row(0), new.row(0), |start, end| {
            runs.push((start, end));
            Ok(())
        })
        .unwrap();
        runs
    }

    fn encoded(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let text = encoded(|out| encode_full_into(&frame("ab▀"), out));
        assert!(text.contains('a'));
        assert!(text.contains('b'));
        assert!(text.contains('▀'));
    }

    #[test]
    fn diff_of_identical_frames_prints_no_glyphs() {
        let a = frame("tile");
        let text = encoded(|out| encode_diff_into(&a, &a.clone(), out));
        assert!(!text.contains("tile"));
    }

    #[test]
    fn diff_of_resized_frames_repaints_everything() {
        let text = encoded(|out| encode_diff_into(&frame("ab"), &frame("abc"), out));
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("abc"));
    }

    #[test]
    fn adjacent_changes_form_one_run() {
        assert_eq!(runs(&frame("....."), &frame(".XXX.")), vec![(1, 4)]);
    }

    #[test]
    fn short_gaps_are_merged_and_long_ones_split() {
        assert_eq!(runs(&frame("........"), &frame("X..X....")), vec![(0, 4)]);
        assert_eq!(
            runs(&frame("............"), &frame("X.........X.")),
            vec![(0, 1), (10, 11)]
        );
    }

    #[test]
    fn colours_are_sent_only_when_they_change() {
        let mut fb = FrameBuffer::new(4, 1);
        let (a, b) = (Rgb::new(10, 20, 30), Rgb::new(40, 50, 60));
        fb.put_pixels(0, 0, a, a);
        fb.put_pixels(1, 0, a, a);
        fb.put_pixels(2, 0, a, b);
        fb.put_pixels(3, 0, a, b);

        let text = encoded(|out| encode_full_into(&fb, out));
        assert_eq!(text.matches("38;2;").count(), 1);
        assert_eq!(text.matches("48;2;").count(), 2);
    }

    #[test]
    fn style_conversion_keeps_channels() {
        assert_eq!(
            rgb_to_color(Rgb::new(1, 2, 3)),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
