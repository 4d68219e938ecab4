//! Configuration errors.
//!
//! These are the only fatal conditions in the core: they are raised while
//! building the shape catalog or validating a [`GameConfig`](crate::GameConfig),
//! before the first piece spawns. Gameplay failures (blocked moves, failed
//! rotations, spawn collisions) are ordinary results, not errors.

use crate::types::ShapeKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("shape {kind:?} has {count} cells, expected 4")]
    CellCount { kind: ShapeKind, count: usize },

    #[error("shape {kind:?} repeats cell {cell:?}")]
    DuplicateCell { kind: ShapeKind, cell: (i8, i8) },

    #[error("shape {kind:?} has {count} wall-kick rows, expected 8")]
    KickRowCount { kind: ShapeKind, count: usize },

    #[error("shape {kind:?} wall-kick row {row} is empty")]
    EmptyKickRow { kind: ShapeKind, row: usize },

    #[error("shape {0:?} is defined more than once")]
    DuplicateShape(ShapeKind),

    #[error("shape {0:?} is missing from the catalog")]
    MissingShape(ShapeKind),

    #[error("grid size {width}x{height} is not usable")]
    GridSize { width: u8, height: u8 },

    #[error("grid origin ({x}, {y}) with size {width}x{height} overflows cell coordinates")]
    GridOrigin { x: i8, y: i8, width: u8, height: u8 },

    #[error("spawn position {0:?} lies outside the grid")]
    SpawnOutOfBounds((i8, i8)),

    #[error("{name} must be greater than zero")]
    ZeroDelay { name: &'static str },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
