use tile_swap::core::{Puzzle, Session};
use tile_swap::term::{AnchorY, Picture, PuzzleView, Rgb, Viewport};
use tile_swap::types::{ControlAction, Point, PuzzleEvent};

fn picture() -> Picture {
    Picture::embedded().unwrap()
}

fn session_2x2(positions: &[u16]) -> Session {
    let mut puzzle = Puzzle::solved(2, 1);
    assert!(puzzle.set_positions(positions));
    Session::from_puzzle(puzzle)
}

fn screen_text(fb: &tile_swap::term::FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = session_2x2(&[1, 0, 2, 3]).snapshot();
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);

    // 2 tiles of 4 columns plus 3 gutters => 11 wide;
    // 2 tiles of 2 rows plus 2 strips plus top/bottom => 8 high.
    let vp = Viewport::new(11, 8);
    let fb = view.render(&snap, &picture(), None, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(10, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 7).unwrap().ch, '└');
    assert_eq!(fb.get(10, 7).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_tiles_as_half_blocks() {
    let snap = session_2x2(&[0, 1, 2, 3]).snapshot();
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(11, 8);
    let fb = view.render(&snap, &picture(), None, vp);

    let layout = view.layout(2, vp);
    for slot in 0..4 {
        let o = layout.tile_origin(slot);
        assert_eq!(fb.get(o.x, o.y).unwrap().ch, '▀');
        assert_eq!(fb.get(o.x + 3, o.y + 1).unwrap().ch, '▀');
    }
}

#[test]
fn term_view_tile_shows_crop_of_its_correct_position() {
    let pic = picture();
    let snap = session_2x2(&[1, 0, 2, 3]).snapshot();
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(11, 8);
    let fb = view.render(&snap, &pic, None, vp);

    // Slot 0 holds piece 1, so it shows the top-right crop.
    let o = view.layout(2, vp).tile_origin(0);
    let cell = fb.get(o.x, o.y).unwrap();
    assert_eq!(cell.style.fg, pic.tile_pixel(1, 2, 0, 0, 4, 4));
    assert_eq!(cell.style.bg, pic.tile_pixel(1, 2, 0, 1, 4, 4));
}

#[test]
fn term_view_marks_in_place_tiles() {
    let snap = session_2x2(&[1, 0, 2, 3]).snapshot();
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(11, 8);
    let fb = view.render(&snap, &picture(), None, vp);
    let layout = view.layout(2, vp);

    let misplaced = fb.get(layout.tile_origin(0).x, layout.strip_y(0)).unwrap();
    let in_place = fb.get(layout.tile_origin(2).x, layout.strip_y(2)).unwrap();
    assert_eq!(misplaced.ch, '─');
    assert_eq!(in_place.ch, '━');
    assert_ne!(misplaced.style.fg, in_place.style.fg);
}

#[test]
fn term_view_highlights_drag_target_and_floats_source() {
    let mut session = session_2x2(&[1, 0, 2, 3]);
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(40, 12);
    let layout = view.layout(2, vp);

    session.apply(PuzzleEvent::GestureStart { slot: 0 });
    session.apply(PuzzleEvent::GestureMove {
        slot: Some(3),
        at: Some(Point::new(30, 10)),
    });
    let fb = view.render(&session.snapshot(), &picture(), None, vp);

    // Drag-over strip under slot 3 differs from the plain in-place colour of slot 2.
    let target = fb.get(layout.tile_origin(3).x, layout.strip_y(3)).unwrap();
    let other = fb.get(layout.tile_origin(2).x, layout.strip_y(2)).unwrap();
    assert_eq!(target.ch, '━');
    assert_ne!(target.style.fg, other.style.fg);

    // Floating copy of the source tile is drawn around the pointer.
    assert_eq!(fb.get(30, 10).unwrap().ch, '▀');
}

#[test]
fn term_view_draws_cursor_markers() {
    let snap = session_2x2(&[1, 0, 2, 3]).snapshot();
    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(11, 8);
    let fb = view.render(&snap, &picture(), Some(3), vp);
    let o = view.layout(2, vp).tile_origin(3);

    assert_eq!(fb.get(o.x - 1, o.y).unwrap().ch, '▐');
    assert_eq!(fb.get(o.x + 4, o.y).unwrap().ch, '▌');
}

#[test]
fn term_view_hint_overlay_shows_reference_picture() {
    let pic = picture();
    let mut session = session_2x2(&[1, 0, 2, 3]);
    session.apply(PuzzleEvent::Control(ControlAction::ToggleHint));

    let view = PuzzleView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(11, 8);
    let fb = view.render(&session.snapshot(), &pic, None, vp);
    let o = view.layout(2, vp).tile_origin(0);

    // Slot 0 shows its own crop while the hint is up.
    assert_eq!(fb.get(o.x, o.y).unwrap().style.fg, pic.tile_pixel(0, 2, 0, 0, 4, 4));
    assert!(screen_text(&fb).contains("HINT"));
}

#[test]
fn term_view_shows_banner_and_hearts_when_solved() {
    let mut session = session_2x2(&[1, 0, 2, 3]);
    session.apply(PuzzleEvent::GestureStart { slot: 0 });
    session.apply(PuzzleEvent::GestureEnd { slot: Some(1) });
    session.tick(500);

    let view = PuzzleView::default();
    let fb = view.render(&session.snapshot(), &picture(), None, Viewport::new(60, 20));
    let text = screen_text(&fb);

    assert!(text.contains("PUZZLE COMPLETE!"));
    assert!(text.contains("1 MOVES"));
    assert!(text.chars().any(|c| matches!(c, '♥' | '♡' | '❥' | '❣')));
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let snap = session_2x2(&[1, 0, 2, 3]).snapshot();
    let view = PuzzleView::default();

    let wide = screen_text(&view.render(&snap, &picture(), None, Viewport::new(60, 20)));
    assert!(wide.contains("MOVES"));
    assert!(wide.contains("PLACED"));
    assert!(wide.contains("2/4"));

    let narrow = screen_text(&view.render(&snap, &picture(), None, Viewport::new(11, 8)));
    assert!(!narrow.contains("MOVES"));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let snap = Session::new(6, 1).snapshot();
    let fb = PuzzleView::default().render(&snap, &picture(), Some(0), Viewport::new(3, 2));
    assert_eq!(fb.width(), 3);
    assert_eq!(fb.height(), 2);
    assert_ne!(fb.get(0, 0).unwrap().style.bg, Rgb::new(1, 2, 3));
}
