use tui_blockfall::core::{GameSnapshot, GameState};
use tui_blockfall::term::{AnchorY, FrameBuffer, GameView, Layout, Viewport};
use tui_blockfall::types::{PieceKind, Timing, Vec2};

const SMALL: Vec2 = Vec2::new(1, 2);
const LARGE: Vec2 = Vec2::new(2, 4);

fn snapshot(cell: Vec2) -> GameSnapshot {
    GameState::new(1, Timing::default(), cell).snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot(SMALL);
    let view = GameView::default();

    // With cell 1x2: 10*2 by 20*1 visible field chars, plus border => 22x22,
    // followed by a 10-wide column of side windows.
    let fb = view.render(&snap, Viewport::new(32, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = snapshot(SMALL);
    snap.field[20][0] = Some(PieceKind::I);
    snap.active = None;
    snap.ghost = None;

    let fb = GameView::default().render(&snap, Viewport::new(32, 22));

    // Row 0 is hidden, so field row 20 is the 20th visible row.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = snapshot(SMALL);
    let fb = GameView::default().render(&snap, Viewport::new(32, 22));

    // O spawns on rows 0-1, columns 4-5; only row 1 is visible.
    for x in 9..13 {
        assert_eq!(fb.get(x, 1).unwrap().ch, '█');
        assert_eq!(fb.get(x, 19).unwrap().ch, '░');
        assert_eq!(fb.get(x, 20).unwrap().ch, '░');
    }
}

#[test]
fn term_view_hides_pieces_on_blink_frames() {
    let mut snap = snapshot(SMALL);
    snap.grounded = true;
    snap.floor_timer = 8;
    let fb = GameView::default().render(&snap, Viewport::new(32, 22));
    assert_eq!(fb.get(9, 1).unwrap().ch, '·');

    snap.floor_timer = 7;
    let fb = GameView::default().render(&snap, Viewport::new(32, 22));
    assert_eq!(fb.get(9, 1).unwrap().ch, '█');
}

#[test]
fn term_view_titles_side_windows() {
    let mut snap = snapshot(SMALL);
    snap.score = 1234;
    snap.level = 7;
    snap.held = Some(tui_blockfall::core::Piece::new(PieceKind::T, SMALL));

    let fb = GameView::default().render(&snap, Viewport::new(32, 22));

    assert!(fb.row_text(0).ends_with("┌|HOLD|──┐"));
    assert!(fb.row_text(6).ends_with("┌|NEXT|──┐"));
    assert!(fb.row_text(12).contains("|SCORE|"));
    assert!(fb.row_text(13).contains("1234"));
    assert!(fb.row_text(15).contains("|LEVEL|"));
    assert!(fb.row_text(16).contains('7'));
}

#[test]
fn term_view_draws_previews_inside_their_windows() {
    let mut snap = snapshot(SMALL);
    snap.held = Some(tui_blockfall::core::Piece::new(PieceKind::I, SMALL));
    let view = GameView::default();
    let viewport = Viewport::new(32, 22);
    let fb = view.render(&snap, viewport);
    let layout = view.layout(&snap, viewport);

    for rect in [layout.hold, layout.next] {
        let mut blocks = 0;
        for y in rect.y + 1..rect.y + rect.h - 1 {
            for x in rect.x + 1..rect.x + rect.w - 1 {
                if fb.get(x, y).unwrap().ch == '█' {
                    blocks += 1;
                }
            }
        }
        // Four cells, two characters each.
        assert_eq!(blocks, 8);
    }
}

#[test]
fn term_view_pause_screen_hides_field() {
    let mut snap = snapshot(SMALL);
    snap.paused = true;
    let fb = GameView::default().render(&snap, Viewport::new(32, 22));

    assert!(fb.row_text(0).starts_with("┌|PAUSED|"));
    assert_eq!(fb.get(1, 1).unwrap().ch, '/');
    assert_eq!(fb.get(9, 1).unwrap().ch, '/');
    assert_eq!(fb.get(20, 20).unwrap().ch, '/');
}

#[test]
fn term_view_resume_frame_shows_field_with_paused_title() {
    let snap = snapshot(SMALL);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(32, 22);
    view.render_resume_into(&snap, Viewport::new(32, 22), &mut fb);

    assert!(fb.row_text(0).starts_with("┌|PAUSED|"));
    assert_eq!(fb.get(9, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_shows_game_over() {
    let mut snap = snapshot(SMALL);
    snap.game_over = true;
    snap.active = None;
    let fb = GameView::default().render(&snap, Viewport::new(32, 22));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_layout_by_default_on_tall_viewports() {
    let snap = snapshot(SMALL);
    let fb = GameView::default().render(&snap, Viewport::new(32, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_layout_to_top() {
    let snap = snapshot(SMALL);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(32, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_large_cells_fill_minimum_terminal() {
    let snap = snapshot(LARGE);
    assert_eq!(Layout::required_size(LARGE), (60, 42));

    let fb = GameView::default().render(&snap, Viewport::new(62, 42));
    // (62 - 60) / 2 = 1 column of horizontal margin.
    assert_eq!(fb.get(1, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(42, 41).unwrap().ch, '┘');

    // One O cell is 4 chars wide and 2 rows tall; row 1 of the field is visible.
    for x in 18..26 {
        assert_eq!(fb.get(x, 1).unwrap().ch, '█');
        assert_eq!(fb.get(x, 2).unwrap().ch, '█');
    }
}
