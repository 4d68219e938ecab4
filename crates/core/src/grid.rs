//! Grid module - the playfield cell matrix
//!
//! The grid is a rectangle of cells, each empty or holding the kind of the
//! piece that was committed there. Only locked pieces are ever stored; the
//! falling piece is tested against the grid but never written into it.
//!
//! Coordinates: `(x, y)` with y growing upward, `x` in `[x_min, x_max)` and
//! `y` in `[y_min, y_max)`. Storage is a flat row-major vector, bottom row
//! first.

use crate::error::ConfigError;
use crate::types::{Cell, CellOffset, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Rectangular bounds of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    x_min: i8,
    y_min: i8,
    width: u8,
    height: u8,
}

impl Bounds {
    /// Bounds with the given bottom-left origin and size.
    ///
    /// The exclusive maximum on both axes must still fit in an `i8`.
    pub fn new(x_min: i8, y_min: i8, width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::GridSize { width, height });
        }
        let fits = |min: i8, len: u8| i16::from(min) + i16::from(len) <= i16::from(i8::MAX);
        if !fits(x_min, width) || !fits(y_min, height) {
            return Err(ConfigError::GridOrigin {
                x: x_min,
                y: y_min,
                width,
                height,
            });
        }
        Ok(Self {
            x_min,
            y_min,
            width,
            height,
        })
    }

    /// Bounds centred on the origin, e.g. 10x20 spans x `-5..5`, y `-10..10`.
    pub fn centered(width: u8, height: u8) -> Result<Self, ConfigError> {
        let x_min = -i8::try_from(width / 2).map_err(|_| ConfigError::GridSize { width, height })?;
        let y_min = -i8::try_from(height / 2).map_err(|_| ConfigError::GridSize { width, height })?;
        Self::new(x_min, y_min, width, height)
    }

    pub fn x_min(&self) -> i8 {
        self.x_min
    }

    pub fn y_min(&self) -> i8 {
        self.y_min
    }

    /// Exclusive upper x bound.
    pub fn x_max(&self) -> i8 {
        (i16::from(self.x_min) + i16::from(self.width)) as i8
    }

    /// Exclusive upper y bound.
    pub fn y_max(&self) -> i8 {
        (i16::from(self.y_min) + i16::from(self.height)) as i8
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, (x, y): CellOffset) -> bool {
        x >= self.x_min && x < self.x_max() && y >= self.y_min && y < self.y_max()
    }

    fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: -(BOARD_WIDTH as i8) / 2,
            y_min: -(BOARD_HEIGHT as i8) / 2,
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

/// The playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: Bounds,
    /// Flat array of cells, row-major, bottom row first
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![None; bounds.area()],
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.bounds.contains((x, y)) {
            return None;
        }
        let col = (i16::from(x) - i16::from(self.bounds.x_min)) as usize;
        Some(self.row_start(y) + col)
    }

    /// Index of the first cell of row `y`, which must be in bounds.
    fn row_start(&self, y: i8) -> usize {
        (i16::from(y) - i16::from(self.bounds.y_min)) as usize * self.bounds.width as usize
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a single position is within bounds and empty
    pub fn is_cell_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// True if every candidate cell is inside the bounds and unoccupied.
    pub fn is_valid(&self, candidate: &[CellOffset]) -> bool {
        candidate.iter().all(|&(x, y)| self.is_cell_free(x, y))
    }

    /// Mark each cell as occupied by `kind`.
    ///
    /// The cells must already have passed [`Grid::is_valid`]. Returns false,
    /// without writing anything, if they have not.
    pub fn commit(&mut self, cells: &[CellOffset], kind: ShapeKind) -> bool {
        if !self.is_valid(cells) {
            return false;
        }
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
        true
    }

    /// Check if a row is completely filled
    pub fn is_line_full(&self, y: i8) -> bool {
        if y < self.bounds.y_min || y >= self.bounds.y_max() {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Clear row `y` and shift every row above it down by one.
    /// The top row becomes empty.
    pub fn clear_line(&mut self, y: i8) {
        if y < self.bounds.y_min || y >= self.bounds.y_max() {
            return;
        }
        let width = self.bounds.width as usize;
        let start = self.row_start(y);

        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + width.., start);

        let top = self.cells.len() - width;
        self.cells[top..].fill(None);
    }

    /// Clear all full rows, returning how many were cleared.
    ///
    /// Rows are scanned bottom to top. After a clear the same row index is
    /// examined again, since the row that dropped into it may also be full.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.bounds.y_min;

        while y < self.bounds.y_max() {
            if self.is_line_full(y) {
                self.clear_line(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }

        cleared
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Cells of row `y`, left to right. Panics if `y` is out of bounds.
    pub fn row(&self, y: i8) -> &[Cell] {
        let start = self.row_start(y);
        &self.cells[start..start + self.bounds.width as usize]
    }

    /// Get a reference to the internal cells array (bottom row first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupied cells and their visual identifiers.
    pub fn occupied(&self) -> impl Iterator<Item = (CellOffset, ShapeKind)> + '_ {
        let width = self.bounds.width as usize;
        let (x_min, y_min) = (self.bounds.x_min, self.bounds.y_min);
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|kind| {
                let x = (i16::from(x_min) + (i % width) as i16) as i8;
                let y = (i16::from(y_min) + (i / width) as i16) as i8;
                ((x, y), kind)
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> Grid {
        Grid::new(Bounds::new(0, 0, 4, 6).unwrap())
    }

    #[test]
    fn test_default_bounds_are_centered() {
        let b = Bounds::default();
        assert_eq!((b.x_min(), b.x_max()), (-5, 5));
        assert_eq!((b.y_min(), b.y_max()), (-10, 10));
        assert_eq!(Bounds::centered(10, 20).unwrap(), b);
    }

    #[test]
    fn test_bounds_rejects_bad_sizes() {
        assert!(matches!(
            Bounds::new(0, 0, 0, 5),
            Err(ConfigError::GridSize { .. })
        ));
        assert!(matches!(
            Bounds::new(100, 0, 40, 5),
            Err(ConfigError::GridOrigin { .. })
        ));
        assert!(Bounds::centered(255, 20).is_err());
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::default();
        assert_eq!(grid.index(-5, -10), Some(0));
        assert_eq!(grid.index(4, -10), Some(9));
        assert_eq!(grid.index(-5, -9), Some(10));
        assert_eq!(grid.index(4, 9), Some(199));
        assert_eq!(grid.index(-6, 0), None);
        assert_eq!(grid.index(5, 0), None);
        assert_eq!(grid.index(0, 10), None);
        assert_eq!(grid.index(0, -11), None);
    }

    #[test]
    fn test_clear_line_shifts_rows_down() {
        let mut grid = small_grid();
        for x in 0..4 {
            grid.set(x, 1, Some(ShapeKind::I));
        }
        grid.set(2, 2, Some(ShapeKind::T));
        grid.set(0, 5, Some(ShapeKind::Z));

        grid.clear_line(1);

        assert_eq!(grid.get(2, 1), Some(Some(ShapeKind::T)));
        assert_eq!(grid.get(2, 2), Some(None));
        assert_eq!(grid.get(0, 4), Some(Some(ShapeKind::Z)));
        assert!(grid.row(5).iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_top_row() {
        let mut grid = small_grid();
        for x in 0..4 {
            grid.set(x, 5, Some(ShapeKind::O));
        }
        assert_eq!(grid.clear_lines(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_occupied_reports_world_coordinates() {
        let mut grid = Grid::default();
        grid.set(-5, -10, Some(ShapeKind::J));
        grid.set(4, 9, Some(ShapeKind::L));
        let cells: Vec<_> = grid.occupied().collect();
        assert_eq!(
            cells,
            vec![((-5, -10), ShapeKind::J), ((4, 9), ShapeKind::L)]
        );
    }

    #[test]
    fn test_commit_refuses_invalid_cells() {
        let mut grid = small_grid();
        grid.set(1, 1, Some(ShapeKind::S));
        assert!(!grid.commit(&[(0, 0), (1, 1)], ShapeKind::T));
        assert_eq!(grid.get(0, 0), Some(None));
        assert!(!grid.commit(&[(0, 0), (4, 0)], ShapeKind::T));
        assert_eq!(grid.get(0, 0), Some(None));
    }
}
