use crate::grid::Bounds;
use crate::piece::Piece;
use crate::shapes::PieceCells;
use crate::types::{Cell, CellOffset, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub position: CellOffset,
    pub rotation: i8,
    /// Absolute grid cells.
    pub cells: PieceCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            position: value.position(),
            rotation: value.rotation(),
            cells: value.absolute_cells(),
        }
    }
}

/// Everything a renderer needs after a tick.
///
/// `cells` holds only committed cells, row-major with the bottom row first;
/// the falling piece is in `active`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub bounds: Bounds,
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.bounds = Bounds::default();
        self.cells.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
    }

    /// Committed cell at `(x, y)`, `None` when empty or out of bounds.
    pub fn committed(&self, x: i8, y: i8) -> Cell {
        if !self.bounds.contains((x, y)) {
            return None;
        }
        let col = (i16::from(x) - i16::from(self.bounds.x_min())) as usize;
        let row = (i16::from(y) - i16::from(self.bounds.y_min())) as usize;
        self.cells
            .get(row * self.bounds.width() as usize + col)
            .copied()
            .flatten()
    }

    /// Cell as drawn: the falling piece on top of the committed cells.
    pub fn visible(&self, x: i8, y: i8) -> Cell {
        match self.active {
            Some(active) if active.cells.contains(&(x, y)) => Some(active.kind),
            _ => self.committed(x, y),
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}
