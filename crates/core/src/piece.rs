//! Piece module - the currently falling piece
//!
//! A piece is spawned with its shape's base cells at rotation 0, moves and
//! rotates against a [`Grid`], and is finally consumed by [`Piece::lock`],
//! which commits its cells and runs line clearing.
//!
//! Lifecycle: spawned -> falling (moves, rotations, automatic steps) ->
//! locked. A locked piece no longer exists; the next shape gets a new piece.
//!
//! Timing is driven from outside: the caller passes the current monotonic
//! time to [`Piece::new`] and [`Piece::step`], and the elapsed time of each
//! tick to [`Piece::advance_lock_timer`].

use std::sync::Arc;

use tracing::error;

use crate::grid::Grid;
use crate::rotation::{next_rotation, rotate_cells, wall_kick_index};
use crate::shapes::{PieceCells, Shape};
use crate::types::{CellOffset, MoveDir, RotateDir, ShapeKind, LOCK_DELAY_MS, STEP_DELAY_MS};

/// Step and lock delays for a piece, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTiming {
    pub step_delay_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for PieceTiming {
    fn default() -> Self {
        Self {
            step_delay_ms: STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    shape: Arc<Shape>,
    /// Live offsets from the pivot, after rotation.
    cells: PieceCells,
    position: CellOffset,
    rotation: i8,
    timing: PieceTiming,
    step_deadline_ms: u64,
    lock_timer_ms: u32,
}

impl Piece {
    /// Initialize a piece at `position` with rotation 0 and the shape's base cells.
    pub fn new(shape: Arc<Shape>, position: CellOffset, timing: PieceTiming, now_ms: u64) -> Self {
        Self {
            cells: *shape.cells(),
            shape,
            position,
            rotation: 0,
            timing,
            step_deadline_ms: now_ms + u64::from(timing.step_delay_ms),
            lock_timer_ms: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Live cell offsets relative to the pivot.
    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    pub fn position(&self) -> CellOffset {
        self.position
    }

    /// Rotation index in `0..4`.
    pub fn rotation(&self) -> i8 {
        self.rotation
    }

    pub fn timing(&self) -> PieceTiming {
        self.timing
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn step_deadline_ms(&self) -> u64 {
        self.step_deadline_ms
    }

    /// Grid cells the piece would cover with its pivot at `position`.
    ///
    /// `None` if a cell falls outside the `i8` coordinate range.
    pub fn cells_at(&self, position: CellOffset) -> Option<PieceCells> {
        let mut cells = self.cells;
        for cell in cells.iter_mut() {
            *cell = offset(position, *cell)?;
        }
        Some(cells)
    }

    /// Grid cells the piece covers now.
    ///
    /// A placed piece always lies inside its grid, so nothing saturates here.
    pub fn absolute_cells(&self) -> PieceCells {
        let (x, y) = self.position;
        self.cells
            .map(|(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// True if the piece fits the grid where it stands.
    pub fn is_valid(&self, grid: &Grid) -> bool {
        self.fits_at(grid, self.position)
    }

    fn fits_at(&self, grid: &Grid, position: CellOffset) -> bool {
        self.cells_at(position)
            .is_some_and(|cells| grid.is_valid(&cells))
    }

    /// Try to shift the pivot by `(dx, dy)`.
    ///
    /// A successful move resets the lock timer.
    fn translate(&mut self, grid: &Grid, delta: CellOffset) -> bool {
        let Some(candidate) = offset(self.position, delta) else {
            return false;
        };
        if !self.fits_at(grid, candidate) {
            return false;
        }
        self.position = candidate;
        self.lock_timer_ms = 0;
        true
    }

    /// Try to move one cell in `dir`.
    pub fn try_move(&mut self, grid: &Grid, dir: MoveDir) -> bool {
        self.translate(grid, dir.delta())
    }

    /// Rotate one step, resolving collisions with the shape's wall kicks.
    ///
    /// On failure the rotation index and the cell geometry are restored.
    pub fn rotate(&mut self, grid: &Grid, dir: RotateDir) -> bool {
        let from = self.rotation;
        let to = next_rotation(from, dir);

        self.rotation = to;
        rotate_cells(&mut self.cells, self.shape.pivot(), dir);

        if self.try_wall_kicks(grid, from, to) {
            return true;
        }

        self.rotation = from;
        rotate_cells(&mut self.cells, self.shape.pivot(), dir.opposite());
        false
    }

    fn try_wall_kicks(&mut self, grid: &Grid, from: i8, to: i8) -> bool {
        let Some(index) = wall_kick_index(from, to) else {
            return false;
        };
        let shape = Arc::clone(&self.shape);
        shape
            .wall_kicks(index)
            .iter()
            .any(|&kick| self.translate(grid, kick))
    }

    /// Add one tick's elapsed time to the lock timer.
    pub fn advance_lock_timer(&mut self, elapsed_ms: u32) {
        self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
    }

    /// True once the automatic step deadline has been reached.
    pub fn is_step_due(&self, now_ms: u64) -> bool {
        now_ms >= self.step_deadline_ms
    }

    /// Automatic step: re-arm the deadline and move down one row.
    ///
    /// Returns true when the lock delay has run out and the piece must lock.
    pub fn step(&mut self, grid: &Grid, now_ms: u64) -> bool {
        self.step_deadline_ms = now_ms + u64::from(self.timing.step_delay_ms);
        self.try_move(grid, MoveDir::Down);
        self.is_lock_due()
    }

    pub fn is_lock_due(&self) -> bool {
        self.lock_timer_ms >= self.timing.lock_delay_ms
    }

    /// Move down until blocked, returning the number of rows dropped.
    pub fn hard_drop(&mut self, grid: &Grid) -> u32 {
        let mut rows = 0;
        while self.try_move(grid, MoveDir::Down) {
            rows += 1;
        }
        rows
    }

    /// Commit the piece into the grid and clear full rows.
    ///
    /// Returns the number of rows cleared.
    pub fn lock(self, grid: &mut Grid) -> u32 {
        let cells = self.absolute_cells();
        if !grid.commit(&cells, self.kind()) {
            error!(kind = ?self.kind(), ?cells, "locked piece overlaps the grid");
            debug_assert!(false, "locked piece overlaps the grid");
        }
        grid.clear_lines()
    }
}

fn offset((x, y): CellOffset, (dx, dy): CellOffset) -> Option<CellOffset> {
    Some((x.checked_add(dx)?, y.checked_add(dy)?))
}
