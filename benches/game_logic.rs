use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blockfall::core::{Field, GameSnapshot, GameState};
use tui_blockfall::term::{FrameBuffer, GameView, Viewport};
use tui_blockfall::types::{GameAction, PieceKind, Timing, Vec2, FIELD_X, FIELD_Y};

const SMALL: Vec2 = Vec2::new(1, 2);

fn new_game() -> GameState {
    GameState::new(12345, Timing::default(), SMALL)
}

fn bench_step_idle(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("step_idle", |b| {
        b.iter(|| {
            if state.game_over() {
                state = new_game();
            }
            state.step(black_box(None));
        })
    });
}

fn bench_step_hard_drop(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("step_hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state = new_game();
            }
            state.step(black_box(Some(GameAction::HardDrop)));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new();
            for y in FIELD_Y - 4..FIELD_Y {
                for x in 0..FIELD_X {
                    field.set(Vec2::new(y as i16, x as i16), Some(PieceKind::I));
                }
            }
            black_box(field.clear_full_rows());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = new_game();
    let mut dir = Vec2::LEFT;

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.try_move(black_box(dir)) {
                dir = Vec2::ZERO - dir;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = new_game();
    // Leave the O so every rotation exercises the kick path.
    state.step(Some(GameAction::Hold));

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate(black_box(true));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = new_game();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_step_idle,
    bench_step_hard_drop,
    bench_line_clear,
    bench_try_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
