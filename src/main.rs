//! Terminal runner (default binary).
//!
//! Owns the wall clock: every loop iteration measures the elapsed time,
//! gathers the keys pressed since the previous tick and hands both to
//! `Session::tick`, then draws the resulting snapshot.
//!
//! Environment:
//! - `BLOCKFALL_CONFIG`: JSON file with [`GameConfig`] overrides
//! - `BLOCKFALL_SHAPES`: JSON file with a full set of shape definitions
//! - `BLOCKFALL_SEED`: seed for the shape source (default: clock based)
//! - `BLOCKFALL_LOG`: log file; logging is off when unset
//! - `BLOCKFALL_LOG_LEVEL`: tracing filter (default `info`)

#[macro_use]
extern crate tracing;

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing_subscriber::EnvFilter;

use blockfall::core::{GameConfig, GameSnapshot, ScoreTally, Session, ShapeCatalog, UniformSource};
use blockfall::input::InputCollector;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    init_logging()?;

    let mut session = build_session()?;
    session.start();

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &mut session));

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("BLOCKFALL_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    let level = std::env::var("BLOCKFALL_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).with_context(|| format!("log filter {level:?}"))?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
    Ok(())
}

fn build_session() -> Result<Session<UniformSource>> {
    let config = match std::env::var("BLOCKFALL_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            GameConfig::from_json(&json).with_context(|| format!("loading config {path}"))?
        }
        Err(_) => GameConfig::default(),
    };

    let catalog = match std::env::var("BLOCKFALL_SHAPES") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            ShapeCatalog::from_json(&json).with_context(|| format!("loading shapes {path}"))?
        }
        Err(_) => ShapeCatalog::standard()?,
    };

    let seed = match std::env::var("BLOCKFALL_SEED") {
        Ok(s) => s.parse().with_context(|| format!("BLOCKFALL_SEED={s:?}"))?,
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1),
    };

    info!(?config, seed, "starting session");
    Ok(Session::new(config, Arc::new(catalog), UniformSource::new(seed))?)
}

fn run(term: &mut TerminalRenderer, session: &mut Session<UniformSource>) -> Result<()> {
    let view = GameView::default();
    let mut input = InputCollector::new();
    let mut tally = ScoreTally::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                term.invalidate();
            }
            input.handle_event(&ev);
            if input.quit_requested() {
                info!(score = tally.score, lines = tally.lines, "quit");
                return Ok(());
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        let report = session.tick(elapsed_ms, input.take(), &mut tally);
        if report.game_over {
            info!(pieces = session.pieces_spawned(), "game over, press R to restart");
        }

        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
