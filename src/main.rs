//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall::term`.
//! The engine is driven by a monotonic millisecond clock fed into `tick_at`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{command_for_key, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

#[derive(Debug, Parser)]
#[command(version, about = "Falling-block puzzle game for the terminal")]
struct Cli {
    #[arg(long, help = "Seed for a reproducible piece sequence (random when omitted)")]
    seed: Option<u64>,

    #[arg(long, help = "Write diagnostics to this file (logging is off when omitted)")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = DEBUG, -vv = TRACE)")]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.verbose)?;
    }

    let mut game = match cli.seed {
        Some(seed) => GameState::new(seed),
        None => GameState::from_entropy(),
    };
    info!(seed = ?cli.seed, "starting blockfall");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let restored = term.exit();
    info!(
        score = game.score(),
        lines = game.lines(),
        level = game.level(),
        "exiting"
    );
    result.and(restored)
}

/// Send tracing output to `path`. The terminal itself is in raw mode, so never log there.
fn init_logging(path: &Path, verbose: u8) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .init();

    info!("Logging initialized at level: {}", level);
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let clock = Instant::now();
    let frame = Duration::from_millis(FRAME_MS as u64);

    loop {
        let frame_start = Instant::now();

        game.tick_at(clock.elapsed().as_millis() as u64);

        let (w, h) = terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input until the frame budget is spent.
        while let Some(timeout) = frame.checked_sub(frame_start.elapsed()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = command_for_key(key) {
                        game.dispatch(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
