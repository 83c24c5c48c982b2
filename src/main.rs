//! Terminal tile-swap runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and a custom framebuffer-based
//! renderer. Logs go to a file because the terminal is in use.

mod cli;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tile_swap::app::{App, Flow};
use tile_swap::core::Session;
use tile_swap::term::{Picture, TerminalRenderer, Viewport};
use tile_swap::types::{GRID_SIZE, IMAGE_PATH, TICK_MS};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let picture = Picture::embedded()?;
    info!(seed, image = IMAGE_PATH, "starting");

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut app = App::new(Session::new(GRID_SIZE, seed), picture, Viewport::new(w, h));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "exiting with error");
    }
    info!(moves = app.session().moves(), solved = app.session().is_complete(), "bye");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let now_ms = started.elapsed().as_millis() as u64;
        if let Some(fb) = app.frame(now_ms) {
            term.draw_swap(fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match app.handle(event::read()?) {
                Flow::Quit => return Ok(()),
                Flow::Resized => term.invalidate(),
                Flow::Continue => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
