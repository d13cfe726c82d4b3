//! Terminal blockfall runner (default binary).
//!
//! Owns the wall clock, the keyboard and the screen. The session itself only
//! ever sees millisecond deltas and game actions.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::core::{FrameClock, GameEvent, GameSnapshot, Session, SessionConfig};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameOverBanner, GameView, TerminalRenderer, Viewport};
use blockfall::types::{BASE_DROP_MS, BLOCK_SIZE, BOARD_HEIGHT, BOARD_WIDTH};

/// Target frame time, roughly 60 frames per second.
const FRAME_MS: u64 = 16;

/// How long the game-over banner stays up.
const BANNER_MS: u64 = 2000;

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle game for the terminal")]
struct Args {
    #[arg(long, default_value_t = BOARD_WIDTH, help = "Board width in cells")]
    width: u16,

    #[arg(long, default_value_t = BOARD_HEIGHT, help = "Board height in cells")]
    height: u16,

    #[arg(long, default_value_t = BLOCK_SIZE, help = "Cell size in pixels (30 = one terminal row)")]
    block_size: u16,

    #[arg(long, default_value_t = BASE_DROP_MS, help = "Gravity interval at level 1, in milliseconds")]
    initial_interval_ms: u32,

    #[arg(long, help = "Piece seed (defaults to the current time)")]
    seed: Option<u32>,

    #[arg(long, help = "Write logs to this file (the terminal is used for the game)")]
    log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)")]
    verbose: u8,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: self.width,
            height: self.height,
            block_size: self.block_size,
            initial_drop_ms: self.initial_interval_ms,
            seed: self.seed.unwrap_or_else(time_seed),
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(args.log_level()))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.session_config();
    let session = Session::new(config).context("invalid game settings")?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        "starting session"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = GameView::from_block_size(session.config().block_size);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut clock = FrameClock::new();
    let mut banner: Option<(GameOverBanner, Instant)> = None;

    let started = Instant::now();
    let frame = Duration::from_millis(FRAME_MS);

    loop {
        let frame_start = Instant::now();

        let now_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        session.update(clock.delta(now_ms));

        for event in session.drain_events() {
            match event {
                GameEvent::StatsChanged { score, level, lines } => {
                    debug!(score, level, lines, "stats changed");
                }
                GameEvent::GameOver {
                    final_score,
                    final_lines,
                    final_level,
                } => {
                    let shown = GameOverBanner {
                        final_score,
                        final_lines,
                        final_level,
                    };
                    banner = Some((shown, frame_start));
                }
            }
        }
        if banner.is_some_and(|(_, at)| at.elapsed() >= Duration::from_millis(BANNER_MS)) {
            banner = None;
        }

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_banner(&snap, banner.as_ref().map(|(b, _)| b), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next frame is due.
        let deadline = frame_start + frame;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}
