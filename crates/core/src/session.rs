//! Session module - the game loop
//!
//! A session owns the grid and the falling piece and drives them through
//! spawn -> fall -> lock -> clear -> respawn. It never reads a clock: the
//! driver calls [`Session::tick`] with the elapsed time and the actions
//! triggered since the previous tick.
//!
//! Each tick runs in a fixed order:
//!
//! 1. advance the clock and the piece's lock timer
//! 2. apply at most one rotation (counter-clockwise wins over clockwise)
//! 3. apply at most one translation (left, right, down, hard drop)
//! 4. run the automatic step if its deadline has passed
//! 5. on lock: commit, clear lines, score, spawn the next piece
//! 6. deliver score events to the sink
//!
//! A spawn that collides ends the game: the grid is emptied, the counters go
//! back to zero and nothing spawns until [`GameAction::Restart`] arrives.

use std::sync::Arc;

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{ShapeSource, UniformSource};
use crate::scoring::{line_clear_points, ScoreEvent, ScoreSink};
use crate::shapes::ShapeCatalog;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, InputFrame, MoveDir, RotateDir};

/// Score events a single tick can produce: points, lines and a reset.
const MAX_TICK_EVENTS: usize = 4;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// Created, first piece not spawned yet.
    Ready,
    Running,
    /// Spawn collided; waiting for a restart.
    GameOver,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// A piece was committed to the grid.
    pub locked: bool,
    pub lines_cleared: u32,
    pub points: u32,
    /// The tick ended the game.
    pub game_over: bool,
}

pub struct Session<S = UniformSource> {
    config: GameConfig,
    catalog: Arc<ShapeCatalog>,
    source: S,
    grid: Grid,
    active: Option<Piece>,
    score: u32,
    lines: u32,
    status: SessionStatus,
    /// Monotonic session clock, advanced only by `tick`.
    now_ms: u64,
    pieces_spawned: u32,
    pending: ArrayVec<ScoreEvent, MAX_TICK_EVENTS>,
}

impl Session<UniformSource> {
    /// Default board, standard shapes and uniformly random pieces.
    pub fn standard(seed: u32) -> Result<Self, ConfigError> {
        Self::new(
            GameConfig::default(),
            Arc::new(ShapeCatalog::standard()?),
            UniformSource::new(seed),
        )
    }
}

impl<S: ShapeSource> Session<S> {
    pub fn new(
        config: GameConfig,
        catalog: Arc<ShapeCatalog>,
        source: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.bounds()?);

        Ok(Self {
            config,
            catalog,
            source,
            grid,
            active: None,
            score: 0,
            lines: 0,
            status: SessionStatus::Ready,
            now_ms: 0,
            pieces_spawned: 0,
            pending: ArrayVec::new(),
        })
    }

    /// Spawn the first piece. Does nothing unless the session is ready.
    pub fn start(&mut self) {
        if self.status != SessionStatus::Ready {
            return;
        }
        self.status = SessionStatus::Running;
        self.spawn_piece();
    }

    /// Start over with an empty grid and zeroed counters.
    pub fn restart(&mut self) {
        if self.status != SessionStatus::GameOver {
            self.reset_state();
        }
        info!(pieces = self.pieces_spawned, "session restarted");
        self.status = SessionStatus::Running;
        self.spawn_piece();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<ShapeCatalog> {
        &self.catalog
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for setting up positions (puzzles, tests).
    ///
    /// Cells written under the falling piece break the lock invariant.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Advance the session by `elapsed_ms` and apply `input`.
    ///
    /// Score events produced by the tick are delivered to `sink` before
    /// returning.
    pub fn tick<K: ScoreSink + ?Sized>(
        &mut self,
        elapsed_ms: u32,
        input: InputFrame,
        sink: &mut K,
    ) -> TickReport {
        let mut report = TickReport::default();
        let was_over = self.is_game_over();

        match self.status {
            SessionStatus::Ready => {}
            SessionStatus::GameOver => {
                if input.contains(GameAction::Restart) {
                    self.restart();
                }
            }
            SessionStatus::Running => {
                self.now_ms += u64::from(elapsed_ms);
                if self.update_active(elapsed_ms, input) {
                    self.lock_active(&mut report);
                }
            }
        }

        report.game_over = !was_over && self.is_game_over();
        self.flush_events(sink);
        report
    }

    /// Move the falling piece for this tick. Returns true if it must lock.
    fn update_active(&mut self, elapsed_ms: u32, input: InputFrame) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let grid = &self.grid;

        piece.advance_lock_timer(elapsed_ms);

        if input.contains(GameAction::RotateCcw) {
            piece.rotate(grid, RotateDir::CounterClockwise);
        } else if input.contains(GameAction::RotateCw) {
            piece.rotate(grid, RotateDir::Clockwise);
        }

        if input.contains(GameAction::MoveLeft) {
            piece.try_move(grid, MoveDir::Left);
        } else if input.contains(GameAction::MoveRight) {
            piece.try_move(grid, MoveDir::Right);
        } else if input.contains(GameAction::MoveDown) {
            piece.try_move(grid, MoveDir::Down);
        } else if input.contains(GameAction::HardDrop) {
            let rows = piece.hard_drop(grid);
            debug!(rows, "hard drop");
            return true;
        }

        if piece.is_step_due(self.now_ms) {
            return piece.step(grid, self.now_ms);
        }
        false
    }

    /// Commit the falling piece, score any cleared lines and spawn the next.
    fn lock_active(&mut self, report: &mut TickReport) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let kind = piece.kind();
        let position = piece.position();
        let cleared = piece.lock(&mut self.grid);
        debug!(?kind, ?position, cleared, "piece locked");

        report.locked = true;
        report.lines_cleared = cleared;

        if cleared > 0 {
            let points = line_clear_points(cleared);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(cleared);
            report.points = points;
            self.pending.push(ScoreEvent::ScoreAdded(points));
            self.pending.push(ScoreEvent::LinesCleared(cleared));
        }

        self.spawn_piece();
    }

    /// Spawn the next shape at the spawn position, or end the game if it
    /// does not fit.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_shape();
        let piece = Piece::new(
            Arc::clone(self.catalog.get(kind)),
            self.config.spawn,
            self.config.timing(),
            self.now_ms,
        );

        if !piece.is_valid(&self.grid) {
            self.game_over();
            return false;
        }

        debug!(?kind, "piece spawned");
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    fn game_over(&mut self) {
        info!(score = self.score, lines = self.lines, "game over");
        self.reset_state();
        self.status = SessionStatus::GameOver;
    }

    fn reset_state(&mut self) {
        self.grid.reset();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        // Keep room for the reset even if earlier events were never flushed.
        if self.pending.is_full() {
            self.pending.clear();
        }
        self.pending.push(ScoreEvent::Reset);
    }

    /// Deliver queued score events. `tick` does this itself; call it after
    /// `start`/`restart` to deliver events they produced immediately.
    pub fn flush_events<K: ScoreSink + ?Sized>(&mut self, sink: &mut K) {
        for event in self.pending.drain(..) {
            sink.dispatch(event);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.bounds = self.grid.bounds();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
