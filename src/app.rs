//! App: terminal events in, frames out.
//!
//! Owns the session plus everything presentation needs (cursor, view, picture,
//! framebuffer). No terminal I/O happens here, so the whole input path can be
//! driven from tests with synthetic crossterm events.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crossterm::event::{Event, KeyEventKind};
use tracing::debug;

use crate::core::{Outcome, PuzzleSnapshot, Session};
use crate::input::{map_key_event, map_mouse_event, should_quit, KeyCommand, KeyboardCursor};
use crate::term::{BoardLayout, FrameBuffer, Picture, PuzzleView, RenderThrottle, Viewport};
use crate::types::{ControlAction, PuzzleEvent, STATIC_RENDER_INTERVAL_MS};

/// What the run loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Terminal size changed; the renderer must redraw everything.
    Resized,
    Quit,
}

pub struct App {
    session: Session,
    cursor: KeyboardCursor,
    cursor_visible: bool,
    view: PuzzleView,
    picture: Picture,
    viewport: Viewport,
    throttle: RenderThrottle,
    snap: PuzzleSnapshot,
    fb: FrameBuffer,
}

impl App {
    pub fn new(session: Session, picture: Picture, viewport: Viewport) -> Self {
        let grid = session.puzzle().grid_size();
        Self {
            session,
            cursor: KeyboardCursor::new(grid),
            cursor_visible: false,
            view: PuzzleView::default(),
            picture,
            viewport,
            throttle: RenderThrottle::new(STATIC_RENDER_INTERVAL_MS),
            snap: PuzzleSnapshot::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cursor(&self) -> &KeyboardCursor {
        &self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn layout(&self) -> BoardLayout {
        self.view
            .layout(self.session.puzzle().grid_size(), self.viewport)
    }

    /// Handle one terminal event.
    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    return Flow::Continue;
                }
                if should_quit(key) {
                    return Flow::Quit;
                }
                let Some(cmd) = map_key_event(key) else {
                    return Flow::Continue;
                };
                if !matches!(cmd, KeyCommand::Control(_)) {
                    self.cursor_visible = true;
                }
                if let Some(ev) = self.cursor.handle(cmd, self.session.is_dragging()) {
                    self.dispatch(ev);
                }
                Flow::Continue
            }
            Event::Mouse(mouse) => {
                let layout = self.layout();
                let Some(ev) = map_mouse_event(mouse, |x, y| layout.slot_at(x, y)) else {
                    return Flow::Continue;
                };
                self.cursor_visible = false;
                if let PuzzleEvent::GestureStart { slot } = ev {
                    // A click on the hint overlay dismisses it.
                    if self.session.hint_visible() {
                        self.dispatch(PuzzleEvent::Control(ControlAction::HideHint));
                        return Flow::Continue;
                    }
                    self.cursor.jump(slot);
                }
                self.dispatch(ev);
                Flow::Continue
            }
            Event::Resize(width, height) => {
                self.viewport = Viewport::new(width, height);
                self.throttle.invalidate();
                Flow::Resized
            }
            _ => Flow::Continue,
        }
    }

    /// Apply a session event directly.
    pub fn dispatch(&mut self, event: PuzzleEvent) -> Outcome {
        let outcome = self.session.apply(event);
        if outcome.swapped || outcome.solved {
            debug!(?event, ?outcome, "applied");
        }
        outcome
    }

    /// Advance animations by one fixed step.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
    }

    /// Render a frame if anything changed (or an animation is running).
    ///
    /// Returns the framebuffer to flush, or `None` to skip this frame.
    pub fn frame(&mut self, now_ms: u64) -> Option<&mut FrameBuffer> {
        self.session.snapshot_into(&mut self.snap);
        let cursor = self.cursor_visible.then(|| self.cursor.slot());

        let mut h = DefaultHasher::new();
        self.snap.fingerprint().hash(&mut h);
        cursor.hash(&mut h);
        let fingerprint = h.finish();

        if !self
            .throttle
            .should_render(now_ms, fingerprint, !self.snap.is_static())
        {
            return None;
        }
        self.view
            .render_into(&self.snap, &self.picture, cursor, self.viewport, &mut self.fb);
        Some(&mut self.fb)
    }
}
