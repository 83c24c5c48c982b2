//! Frame pacing for a mostly static board.
//!
//! The board only changes on input, so most ticks would redraw an identical
//! frame. Animations (the celebration) opt out of throttling.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `animating=true`: always render.
    /// - Otherwise: render immediately on fingerprint change, else at most once
    ///   per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if self.has_rendered && !animating && !changed && !due {
            return false;
        }
        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}
