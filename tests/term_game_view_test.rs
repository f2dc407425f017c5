use blockfall::core::{ActiveSnapshot, GameState, ScriptedSource};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport};
use blockfall::types::{Command, Phase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn running_o_game() -> GameState<ScriptedSource> {
    let mut state = GameState::with_source(ScriptedSource::new([PieceKind::O, PieceKind::T]));
    state.dispatch(Command::Start);
    state
}

#[test]
fn term_view_renders_border_corners() {
    let state = GameState::new(1);
    let snap = state.snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = Some(PieceKind::L);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    let cell = fb.get(x0, y0).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, Rgb::new(0xff, 0x9f, 0x43));
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let snap = running_o_game().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O at x=4: columns 1 + 4*2 .. 1 + 6*2.
    let px = 1 + 4 * 2;
    assert_eq!(fb.get(px, 1).unwrap().ch, '█');
    assert_eq!(fb.get(px + 3, 2).unwrap().ch, '█');

    // Ghost rows 18-19.
    assert_eq!(fb.get(px, 1 + 18).unwrap().ch, '░');
    assert_eq!(fb.get(px + 3, 1 + 19).unwrap().ch, '░');
    assert_eq!(fb.get(px, 1 + 17).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = running_o_game().snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_previews_next_piece() {
    let snap = running_o_game().snapshot();
    assert_eq!(snap.next, Some(PieceKind::T));

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(60, 22));

    // Panel starts two columns right of the frame; NEXT label is on row 9.
    let frame_x = (60 - 22) / 2;
    let panel_x = frame_x + 22 + 2;
    assert!(fb.row_text(9).contains("NEXT"));
    // T preview: stem on the first row, bar on the second.
    assert_eq!(fb.get(panel_x + 2, 10).unwrap().ch, '█');
    assert_eq!(fb.get(panel_x, 10).unwrap().ch, ' ');
    assert_eq!(fb.get(panel_x, 11).unwrap().ch, '█');
    assert_eq!(fb.get(panel_x + 5, 11).unwrap().ch, '█');
}

#[test]
fn term_view_shows_status_text() {
    let mut state = running_o_game();
    let wide = Viewport::new(100, 24);

    let all = screen_text(&GameView::default().render(&state.snapshot(), wide));
    assert!(all.contains("Playing"));

    state.dispatch(Command::PauseToggle);
    let all = screen_text(&GameView::default().render(&state.snapshot(), wide));
    assert!(all.contains("Paused"));
    assert!(all.contains("PAUSED"));
}

#[test]
fn term_view_overlays_idle_and_game_over() {
    let idle = GameState::new(1).snapshot();
    let all = screen_text(&GameView::default().render(&idle, Viewport::new(22, 22)));
    assert!(all.contains("PRESS ENTER"));

    let mut over = idle;
    over.phase = Phase::GameOver;
    let all = screen_text(&GameView::default().render(&over, Viewport::new(22, 22)));
    assert!(all.contains("GAME OVER"));
}

#[test]
fn term_view_skips_ghost_after_game_over() {
    let mut snap = running_o_game().snapshot();
    snap.phase = Phase::GameOver;
    let active: ActiveSnapshot = snap.active.unwrap();
    assert_eq!(snap.ghost_y, Some(18));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let px = 1 + (active.x as u16) * 2;
    assert_eq!(fb.get(px, 1 + 18).unwrap().ch, '·');
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();

    // Board frame is 22 rows tall (20 + border).
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
