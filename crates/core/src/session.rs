//! Session: the single owned state object behind the game loop.
//!
//! Every input arrives as a [`PuzzleEvent`] and is handled by [`Session::apply`],
//! which updates the model and reports what the caller should do next. The
//! completion check runs after every state change.

use tracing::{debug, info};

use crate::celebration::Celebration;
use crate::gesture::GestureState;
use crate::puzzle::Puzzle;
use crate::rng::SimpleRng;
use crate::snapshot::{DragSnapshot, PuzzleSnapshot, TileSnapshot};
use crate::types::{ControlAction, PieceId, Point, PuzzleEvent, Slot};

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Something visible changed.
    pub redraw: bool,
    /// Two tiles were swapped.
    pub swapped: bool,
    /// This event solved the puzzle.
    pub solved: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    gesture: GestureState,
    hint_visible: bool,
    celebration: Celebration,
    fx_rng: SimpleRng,
    moves: u32,
    was_complete: bool,
}

impl Session {
    /// Start a session on a freshly shuffled board.
    pub fn new(grid_size: u8, seed: u32) -> Self {
        Self::from_puzzle(Puzzle::new(grid_size, seed))
    }

    pub fn from_puzzle(puzzle: Puzzle) -> Self {
        info!(
            grid = puzzle.grid_size(),
            seed = puzzle.seed(),
            "session started"
        );
        let mut session = Self {
            fx_rng: SimpleRng::new(puzzle.seed().rotate_left(16) ^ 0x9e37_79b9),
            puzzle,
            gesture: GestureState::Idle,
            hint_visible: false,
            celebration: Celebration::new(),
            moves: 0,
            was_complete: false,
        };
        // A board dealt solved celebrates right away.
        session.check_completion();
        session
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        !self.gesture.is_idle()
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_complete(&self) -> bool {
        self.puzzle.is_complete()
    }

    pub fn celebrating(&self) -> bool {
        self.celebration.is_running()
    }

    /// Handle one input event.
    pub fn apply(&mut self, event: PuzzleEvent) -> Outcome {
        let mut out = match event {
            PuzzleEvent::GestureStart { slot } => self.gesture_start(slot),
            PuzzleEvent::GestureMove { slot, at } => self.gesture_move(slot, at),
            PuzzleEvent::GestureEnd { slot } => self.gesture_end(slot),
            PuzzleEvent::GestureCancel => Outcome {
                redraw: self.gesture.cancel(),
                ..Outcome::default()
            },
            PuzzleEvent::Control(action) => self.control(action),
        };
        out.solved = self.check_completion();
        out.redraw |= out.solved;
        out
    }

    /// Advance time-based effects.
    ///
    /// Returns `true` while an animation is on screen.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let running = self.celebration.is_running();
        self.celebration.tick(elapsed_ms);
        running
    }

    fn gesture_start(&mut self, slot: Slot) -> Outcome {
        let Some(source) = self.puzzle.piece_at(slot) else {
            return Outcome::default();
        };
        Outcome {
            redraw: self.gesture.begin(source, None),
            ..Outcome::default()
        }
    }

    fn gesture_move(&mut self, slot: Option<Slot>, at: Option<Point>) -> Outcome {
        let over = slot.and_then(|s| self.puzzle.piece_at(s));
        Outcome {
            redraw: self.gesture.hover(over, at),
            ..Outcome::default()
        }
    }

    fn gesture_end(&mut self, slot: Option<Slot>) -> Outcome {
        let was_active = !self.gesture.is_idle();
        let target = slot.and_then(|s| self.puzzle.piece_at(s));
        let Some((a, b)) = self.gesture.finish(target) else {
            return Outcome {
                redraw: was_active,
                ..Outcome::default()
            };
        };
        let swapped = self.swap(a, b);
        Outcome {
            redraw: true,
            swapped,
            solved: false,
        }
    }

    /// Swap two tiles by id, counting the move.
    pub fn swap(&mut self, a: PieceId, b: PieceId) -> bool {
        if !self.puzzle.swap(a, b) {
            debug!(a, b, "swap ignored: unknown piece");
            return false;
        }
        if a == b {
            return true;
        }
        self.moves = self.moves.saturating_add(1);
        debug!(a, b, moves = self.moves, "swapped");
        true
    }

    fn control(&mut self, action: ControlAction) -> Outcome {
        match action {
            ControlAction::Shuffle => {
                self.gesture.cancel();
                self.celebration.stop();
                self.puzzle.shuffle();
                self.was_complete = false;
                info!(moves = self.moves, "board shuffled");
            }
            ControlAction::ToggleHint => {
                self.hint_visible = !self.hint_visible;
            }
            ControlAction::HideHint => {
                if !self.hint_visible {
                    return Outcome::default();
                }
                self.hint_visible = false;
            }
            ControlAction::Restart => {
                self.gesture.cancel();
                self.hint_visible = false;
                self.celebration.stop();
                self.moves = 0;
                self.puzzle.initialize();
                self.was_complete = false;
                info!("session restarted");
            }
        }
        Outcome {
            redraw: true,
            ..Outcome::default()
        }
    }

    /// Start the celebration on the unsolved -> solved edge.
    fn check_completion(&mut self) -> bool {
        let complete = self.puzzle.is_complete();
        let solved_now = complete && !self.was_complete;
        if solved_now {
            info!(moves = self.moves, "puzzle solved");
            self.celebration.start(&mut self.fx_rng);
        }
        if !complete && self.was_complete {
            self.celebration.stop();
        }
        self.was_complete = complete;
        solved_now
    }

    pub fn snapshot_into(&self, out: &mut PuzzleSnapshot) {
        out.grid_size = self.puzzle.grid_size();
        out.tiles.clear();
        out.tiles.extend(self.puzzle.ordered().map(TileSnapshot::from));
        out.complete = self.puzzle.is_complete();
        out.hint_visible = self.hint_visible;
        out.drag = self.gesture.drag().and_then(|drag| {
            let source_slot = self.puzzle.piece(drag.source)?.current_position();
            let over_slot = drag
                .over
                .and_then(|id| self.puzzle.piece(id))
                .map(|p| p.current_position());
            Some(DragSnapshot {
                drag,
                source_slot,
                over_slot,
            })
        });
        out.moves = self.moves;
        out.correct_count = self.puzzle.correct_count() as u16;
        out.seed = self.puzzle.seed();
        self.celebration.visible_into(&mut out.particles);
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let mut snap = PuzzleSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::types::GRID_SIZE, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapped_session() -> Session {
        // grid=2, pieces 0 and 1 exchanged.
        let mut puzzle = Puzzle::solved(2, 1);
        puzzle.set_positions(&[1, 0, 2, 3]);
        Session::from_puzzle(puzzle)
    }

    fn drag(session: &mut Session, from: Slot, to: Option<Slot>) -> Outcome {
        session.apply(PuzzleEvent::GestureStart { slot: from });
        session.apply(PuzzleEvent::GestureEnd { slot: to })
    }

    #[test]
    fn drag_between_tiles_swaps_and_solves() {
        let mut s = swapped_session();
        assert!(!s.is_complete());

        let out = drag(&mut s, 0, Some(1));
        assert!(out.swapped);
        assert!(out.solved);
        assert!(out.redraw);
        assert!(s.is_complete());
        assert!(s.celebrating());
        assert_eq!(s.moves(), 1);
        assert!(!s.is_dragging());
    }

    #[test]
    fn drop_on_self_changes_nothing() {
        let mut s = swapped_session();
        let before = s.puzzle().positions();
        let out = drag(&mut s, 2, Some(2));
        assert!(!out.swapped);
        assert_eq!(s.puzzle().positions(), before);
        assert_eq!(s.moves(), 0);
        assert!(!s.is_dragging());
    }

    #[test]
    fn drop_outside_changes_nothing() {
        let mut s = swapped_session();
        let before = s.puzzle().positions();
        let out = drag(&mut s, 0, None);
        assert!(!out.swapped);
        assert!(out.redraw);
        assert_eq!(s.puzzle().positions(), before);
    }

    #[test]
    fn start_outside_board_is_ignored() {
        let mut s = swapped_session();
        let out = s.apply(PuzzleEvent::GestureStart { slot: 40 });
        assert_eq!(out, Outcome::default());
        assert!(!s.is_dragging());
    }

    #[test]
    fn hover_updates_drag_snapshot() {
        let mut s = swapped_session();
        s.apply(PuzzleEvent::GestureStart { slot: 0 });
        let out = s.apply(PuzzleEvent::GestureMove {
            slot: Some(3),
            at: Some(Point::new(4, 2)),
        });
        assert!(out.redraw);

        let snap = s.snapshot();
        let drag = snap.drag.unwrap();
        assert_eq!(drag.source_slot, 0);
        assert_eq!(drag.over_slot, Some(3));
        assert_eq!(drag.drag.pointer, Some(Point::new(4, 2)));
    }

    #[test]
    fn cancel_drops_gesture_without_swap() {
        let mut s = swapped_session();
        s.apply(PuzzleEvent::GestureStart { slot: 0 });
        assert!(s.apply(PuzzleEvent::GestureCancel).redraw);
        assert!(!s.is_dragging());
        assert_eq!(s.puzzle().positions(), vec![1, 0, 2, 3]);
    }

    #[test]
    fn celebration_starts_once_per_solve() {
        let mut s = swapped_session();
        assert!(drag(&mut s, 0, Some(1)).solved);
        // Toggling the hint keeps the board solved; no second burst.
        assert!(!s.apply(PuzzleEvent::Control(ControlAction::ToggleHint)).solved);
    }

    #[test]
    fn hint_toggles_and_hides() {
        let mut s = Session::new(3, 9);
        assert!(!s.hint_visible());
        s.apply(PuzzleEvent::Control(ControlAction::ToggleHint));
        assert!(s.hint_visible());
        s.apply(PuzzleEvent::Control(ControlAction::ToggleHint));
        assert!(!s.hint_visible());

        s.apply(PuzzleEvent::Control(ControlAction::ToggleHint));
        assert!(s.apply(PuzzleEvent::Control(ControlAction::HideHint)).redraw);
        assert!(!s.hint_visible());
        assert!(!s.apply(PuzzleEvent::Control(ControlAction::HideHint)).redraw);
    }

    #[test]
    fn shuffle_cancels_gesture_and_keeps_moves() {
        let mut s = Session::new(4, 3);
        drag(&mut s, 0, Some(1));
        s.apply(PuzzleEvent::GestureStart { slot: 2 });
        s.apply(PuzzleEvent::Control(ControlAction::Shuffle));
        assert!(!s.is_dragging());
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn restart_resets_session_state() {
        let mut s = swapped_session();
        drag(&mut s, 0, Some(1));
        s.apply(PuzzleEvent::Control(ControlAction::ToggleHint));
        s.apply(PuzzleEvent::Control(ControlAction::Restart));
        assert_eq!(s.moves(), 0);
        assert!(!s.hint_visible());
        assert_eq!(s.celebrating(), s.is_complete());
    }

    #[test]
    fn board_dealt_solved_celebrates() {
        // A 1x1 board is solved by every shuffle.
        let s = Session::new(1, 7);
        assert!(s.is_complete());
        assert!(s.celebrating());

        let s = Session::from_puzzle(Puzzle::solved(2, 1));
        assert!(s.celebrating());
        assert!(!s.snapshot().particles.is_empty());
    }

    #[test]
    fn shuffle_landing_solved_celebrates_again() {
        let mut s = Session::new(1, 7);
        s.tick(10_000);
        assert!(!s.celebrating());

        let out = s.apply(PuzzleEvent::Control(ControlAction::Shuffle));
        assert!(out.solved);
        assert!(s.celebrating());

        let out = s.apply(PuzzleEvent::Control(ControlAction::Restart));
        assert!(out.solved);
        assert!(s.celebrating());
    }

    #[test]
    fn shuffle_away_from_solved_stops_celebration() {
        let mut s = Session::from_puzzle(Puzzle::solved(3, 5));
        assert!(s.celebrating());
        s.apply(PuzzleEvent::Control(ControlAction::Shuffle));
        assert_eq!(s.celebrating(), s.is_complete());
    }

    #[test]
    fn move_counter_saturates() {
        let mut s = swapped_session();
        s.moves = u32::MAX;
        assert!(s.swap(0, 1));
        assert_eq!(s.moves(), u32::MAX);
    }

    #[test]
    fn swap_with_unknown_id_is_ignored() {
        let mut s = swapped_session();
        assert!(!s.swap(0, 9));
        assert_eq!(s.moves(), 0);
    }

    #[test]
    fn tick_reports_running_animation() {
        let mut s = swapped_session();
        assert!(!s.tick(16));
        drag(&mut s, 0, Some(1));
        assert!(s.tick(16));
        assert!(!s.snapshot().particles.is_empty());
    }

    #[test]
    fn snapshot_lists_tiles_in_slot_order() {
        let s = swapped_session();
        let snap = s.snapshot();
        assert_eq!(snap.grid_size, 2);
        let ids: Vec<_> = snap.tiles.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 0, 2, 3]);
        assert_eq!(snap.correct_count, 2);
        assert!(!snap.complete);
        assert_eq!(snap.tile_at(0).unwrap().correct, 1);
    }
}
