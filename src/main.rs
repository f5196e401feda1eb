//! Terminal runner (default binary).
//!
//! Fixed-rate frame loop: one simulation step per frame, at most one key consumed per
//! frame, drawing through the diffing framebuffer renderer.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_blockfall::config::GameConfig;
use tui_blockfall::core::{GameSnapshot, GameState};
use tui_blockfall::event_log::{EventLog, LogEvent, Standing};
use tui_blockfall::input::{is_pause, is_quit, map_key};
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{Flow, GameAction, Timing};

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};
const RESUME_HOLD: Duration = Duration::from_secs(1);
const GAME_OVER_HOLD: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let mut log = EventLog::from_config(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();

    let standing = result?;
    println!("LEVEL: {} | SCORE: {}", standing.level, standing.score);
    Ok(())
}

struct Screen<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    snap: GameSnapshot,
}

impl Screen<'_> {
    fn draw(&mut self, game: &GameState) -> Result<()> {
        game.snapshot_into(&mut self.snap);
        let viewport = TerminalRenderer::viewport().unwrap_or(FALLBACK_VIEWPORT);
        self.view.render_into(&self.snap, viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }

    fn draw_resume(&mut self, game: &GameState) -> Result<()> {
        game.snapshot_into(&mut self.snap);
        let viewport = TerminalRenderer::viewport().unwrap_or(FALLBACK_VIEWPORT);
        self.view.render_resume_into(&self.snap, viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, log: &mut EventLog) -> Result<Standing> {
    let viewport = TerminalRenderer::viewport().unwrap_or(FALLBACK_VIEWPORT);
    let cell = config.cell.resolve(viewport.width, viewport.height);
    let timing = Timing::new(config.fps);
    let frame = Duration::from_nanos(1_000_000_000 / u64::from(timing.frame_rate()));

    let mut game = GameState::new(config.seed, timing, cell);
    log.record(&LogEvent::Start {
        seed: config.seed,
        fps: timing.frame_rate(),
    });

    let mut screen = Screen {
        term,
        view: GameView::default(),
        fb: FrameBuffer::new(viewport.width, viewport.height),
        snap: GameSnapshot::default(),
    };

    let mut input: Option<GameAction> = None;
    loop {
        let frame_start = Instant::now();

        let flow = game.step(input.take());
        if let Some(event) = game.take_last_event() {
            log.record(&LogEvent::lock(&event, game.score()));
        }
        if flow == Flow::Stop {
            break;
        }

        // The field only changes visibly while a piece is in play or on the frame it locks.
        let delay = game.entry_delay();
        if delay == 0 || delay == timing.entry_delay_frames() {
            screen.draw(&game)?;
        }

        input = poll_action()?;
        if is_pause(input) {
            input = None;
            if pause(&mut game, &mut screen, log)? == Flow::Stop {
                input = Some(GameAction::Quit);
            }
        }

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    let standing = Standing {
        score: game.score(),
        level: game.level(),
        lines: game.lines_cleared(),
    };
    if game.game_over() {
        screen.draw(&game)?;
        thread::sleep(GAME_OVER_HOLD);
        log.record(&LogEvent::GameOver(standing));
    } else {
        log.record(&LogEvent::Quit(standing));
    }
    Ok(standing)
}

/// Block until the player resumes or quits.
fn pause(game: &mut GameState, screen: &mut Screen<'_>, log: &mut EventLog) -> Result<Flow> {
    game.set_paused(true);
    log.record(&LogEvent::Pause);
    screen.draw(game)?;

    let flow = loop {
        if let Event::Key(key) = event::read()? {
            let action = map_key(key);
            if is_quit(action) {
                break Flow::Stop;
            }
            if is_pause(action) {
                break Flow::Continue;
            }
        }
    };

    game.set_paused(false);
    if flow == Flow::Stop {
        return Ok(flow);
    }

    log.record(&LogEvent::Resume);
    screen.draw_resume(game)?;
    thread::sleep(RESUME_HOLD);
    drain_input()?;
    Ok(flow)
}

/// Next mapped action, without blocking.
fn poll_action() -> Result<Option<GameAction>> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if let Some(action) = map_key(key) {
                return Ok(Some(action));
            }
        }
    }
    Ok(None)
}

/// Discard keys pressed while the resume frame was on screen.
fn drain_input() -> Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}
