//! Shape catalog - the seven piece shapes and their wall-kick tables
//!
//! Shapes are configuration data. The standard set is supplied as static
//! tables below and validated once by [`ShapeCatalog::standard`]; a custom
//! set can be loaded from JSON with [`ShapeCatalog::from_json`]. After
//! construction the catalog is immutable and shapes are shared between all
//! pieces of a kind through `Arc`.
//!
//! Kick tables use y-up coordinates and are indexed by transition, see
//! [`wall_kick_index`](crate::rotation::wall_kick_index).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::types::{CellOffset, PivotMode, ShapeKind, KICK_TRANSITIONS, PIECE_CELLS};

/// Cell offsets of a piece, relative to its pivot.
pub type PieceCells = [CellOffset; PIECE_CELLS];

/// Static wall-kick table: 8 transitions x 5 candidates.
pub type StaticKickTable = [[CellOffset; 5]; KICK_TRANSITIONS];

/// Serializable description of one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    pub cells: Vec<CellOffset>,
    pub pivot: PivotMode,
    pub wall_kicks: Vec<Vec<CellOffset>>,
}

/// Validated, immutable shape data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    cells: PieceCells,
    pivot: PivotMode,
    wall_kicks: [Vec<CellOffset>; KICK_TRANSITIONS],
}

impl Shape {
    /// Validate a definition into a shape.
    pub fn from_def(def: ShapeDef) -> Result<Self, ConfigError> {
        let ShapeDef {
            kind,
            cells,
            pivot,
            wall_kicks,
        } = def;

        let cells: PieceCells = cells
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::CellCount {
                kind,
                count: cells.len(),
            })?;
        for (i, cell) in cells.iter().enumerate() {
            if cells[..i].contains(cell) {
                return Err(ConfigError::DuplicateCell { kind, cell: *cell });
            }
        }

        let rows = wall_kicks.len();
        let wall_kicks: [Vec<CellOffset>; KICK_TRANSITIONS] = wall_kicks
            .try_into()
            .map_err(|_| ConfigError::KickRowCount { kind, count: rows })?;
        if let Some(row) = wall_kicks.iter().position(|kicks| kicks.is_empty()) {
            return Err(ConfigError::EmptyKickRow { kind, row });
        }

        Ok(Self {
            kind,
            cells,
            pivot,
            wall_kicks,
        })
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Base cell offsets (rotation index 0).
    pub fn cells(&self) -> &PieceCells {
        &self.cells
    }

    pub fn pivot(&self) -> PivotMode {
        self.pivot
    }

    /// Kick candidates for one transition, tried in order.
    pub fn wall_kicks(&self, index: usize) -> &[CellOffset] {
        &self.wall_kicks[index]
    }
}

/// The seven shapes, one per [`ShapeKind`].
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    /// Indexed by `ShapeKind::index()`.
    shapes: Vec<Arc<Shape>>,
}

impl ShapeCatalog {
    /// Build the standard catalog from the static tables.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::from_definitions(standard_definitions())
    }

    /// Build a catalog from definitions. Every kind must appear exactly once.
    pub fn from_definitions(
        defs: impl IntoIterator<Item = ShapeDef>,
    ) -> Result<Self, ConfigError> {
        let mut slots: [Option<Arc<Shape>>; 7] = Default::default();

        for def in defs {
            let shape = Shape::from_def(def)?;
            let slot = &mut slots[shape.kind.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateShape(shape.kind));
            }
            *slot = Some(Arc::new(shape));
        }

        let mut shapes = Vec::with_capacity(ShapeKind::ALL.len());
        for (kind, slot) in ShapeKind::ALL.into_iter().zip(slots) {
            shapes.push(slot.ok_or(ConfigError::MissingShape(kind))?);
        }

        debug!(shapes = shapes.len(), "shape catalog ready");
        Ok(Self { shapes })
    }

    /// Parse a JSON array of [`ShapeDef`]s.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let defs: Vec<ShapeDef> = serde_json::from_str(json)?;
        Self::from_definitions(defs)
    }

    pub fn get(&self, kind: ShapeKind) -> &Arc<Shape> {
        &self.shapes[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Shape>> {
        self.shapes.iter()
    }
}

/// Base cells of each kind, with its pivot mode.
const STANDARD_CELLS: [(ShapeKind, PieceCells, PivotMode); 7] = [
    (
        ShapeKind::T,
        [(0, 1), (-1, 0), (0, 0), (1, 0)],
        PivotMode::Center,
    ),
    (
        ShapeKind::O,
        [(0, 1), (1, 1), (0, 0), (1, 0)],
        PivotMode::HalfCell,
    ),
    (
        ShapeKind::J,
        [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        PivotMode::Center,
    ),
    (
        ShapeKind::L,
        [(1, 1), (-1, 0), (0, 0), (1, 0)],
        PivotMode::Center,
    ),
    (
        ShapeKind::I,
        [(-1, 1), (0, 1), (1, 1), (2, 1)],
        PivotMode::HalfCell,
    ),
    (
        ShapeKind::S,
        [(0, 1), (1, 1), (-1, 0), (0, 0)],
        PivotMode::Center,
    ),
    (
        ShapeKind::Z,
        [(-1, 1), (0, 1), (0, 0), (1, 0)],
        PivotMode::Center,
    ),
];

/// Kick table shared by J, L, O, S, T and Z.
pub const JLOSTZ_KICKS: StaticKickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->2
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table.
pub const I_KICKS: StaticKickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Get the static kick table for a shape kind
pub fn standard_kick_table(kind: ShapeKind) -> &'static StaticKickTable {
    match kind {
        ShapeKind::I => &I_KICKS,
        _ => &JLOSTZ_KICKS,
    }
}

/// The standard shapes as definitions, in catalog order.
pub fn standard_definitions() -> Vec<ShapeDef> {
    STANDARD_CELLS
        .iter()
        .map(|&(kind, cells, pivot)| ShapeDef {
            kind,
            cells: cells.to_vec(),
            pivot,
            wall_kicks: standard_kick_table(kind)
                .iter()
                .map(|row| row.to_vec())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_builds() {
        let catalog = ShapeCatalog::standard().unwrap();
        for kind in ShapeKind::ALL {
            let shape = catalog.get(kind);
            assert_eq!(shape.kind(), kind);
            for row in 0..KICK_TRANSITIONS {
                assert_eq!(shape.wall_kicks(row)[0], (0, 0));
            }
        }
    }

    #[test]
    fn half_cell_pivot_only_for_i_and_o() {
        let catalog = ShapeCatalog::standard().unwrap();
        for shape in catalog.iter() {
            let expected = match shape.kind() {
                ShapeKind::I | ShapeKind::O => PivotMode::HalfCell,
                _ => PivotMode::Center,
            };
            assert_eq!(shape.pivot(), expected, "{:?}", shape.kind());
        }
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let mut defs = standard_definitions();
        defs[0].cells.pop();
        let err = ShapeCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CellCount {
                kind: ShapeKind::T,
                count: 3
            }
        ));
    }

    #[test]
    fn rejects_duplicate_cell() {
        let mut defs = standard_definitions();
        defs[1].cells[1] = defs[1].cells[0];
        let err = ShapeCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateCell { .. }));
    }

    #[test]
    fn rejects_short_kick_table() {
        let mut defs = standard_definitions();
        defs[4].wall_kicks.truncate(7);
        let err = ShapeCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KickRowCount {
                kind: ShapeKind::I,
                count: 7
            }
        ));
    }

    #[test]
    fn rejects_empty_kick_row() {
        let mut defs = standard_definitions();
        defs[2].wall_kicks[5].clear();
        let err = ShapeCatalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyKickRow { row: 5, .. }));
    }

    #[test]
    fn rejects_missing_and_duplicate_kinds() {
        let mut defs = standard_definitions();
        defs.pop();
        assert!(matches!(
            ShapeCatalog::from_definitions(defs).unwrap_err(),
            ConfigError::MissingShape(ShapeKind::Z)
        ));

        let mut defs = standard_definitions();
        defs.push(defs[0].clone());
        assert!(matches!(
            ShapeCatalog::from_definitions(defs).unwrap_err(),
            ConfigError::DuplicateShape(ShapeKind::T)
        ));
    }

    #[test]
    fn json_definitions_load() {
        let json = serde_json::to_string(&standard_definitions()).unwrap();
        let catalog = ShapeCatalog::from_json(&json).unwrap();
        assert_eq!(
            catalog.get(ShapeKind::I).cells(),
            &[(-1, 1), (0, 1), (1, 1), (2, 1)]
        );
        assert!(matches!(
            ShapeCatalog::from_json("{").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
