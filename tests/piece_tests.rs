//! Piece tests - rotation geometry and reversal

use std::sync::Arc;

use blockfall::core::{Grid, Piece, PieceTiming, ShapeCatalog};
use blockfall::types::{CellOffset, RotateDir, ShapeKind};

fn spawn(catalog: &ShapeCatalog, kind: ShapeKind) -> Piece {
    Piece::new(
        Arc::clone(catalog.get(kind)),
        (0, 0),
        PieceTiming::default(),
        0,
    )
}

fn sorted(cells: &[CellOffset]) -> Vec<CellOffset> {
    let mut v = cells.to_vec();
    v.sort();
    v
}

#[test]
fn test_rotation_then_opposite_restores_geometry() {
    let catalog = ShapeCatalog::standard().unwrap();
    let grid = Grid::default();

    for kind in ShapeKind::ALL {
        for dir in [RotateDir::Clockwise, RotateDir::CounterClockwise] {
            let mut piece = spawn(&catalog, kind);
            let base = *piece.cells();

            assert!(piece.rotate(&grid, dir), "{kind:?} {dir:?}");
            assert!(piece.rotate(&grid, dir.opposite()), "{kind:?} {dir:?}");

            assert_eq!(*piece.cells(), base, "{kind:?} {dir:?}");
            assert_eq!(piece.rotation(), 0);
            assert_eq!(piece.position(), (0, 0));
        }
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    let catalog = ShapeCatalog::standard().unwrap();
    let grid = Grid::default();

    for kind in ShapeKind::ALL {
        let mut piece = spawn(&catalog, kind);
        let base = *piece.cells();
        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(piece.rotate(&grid, RotateDir::Clockwise));
            seen.push(piece.rotation());
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
        assert_eq!(*piece.cells(), base, "{kind:?}");
    }
}

#[test]
fn test_o_occupies_same_cells_in_every_state() {
    let catalog = ShapeCatalog::standard().unwrap();
    let grid = Grid::default();
    let mut piece = spawn(&catalog, ShapeKind::O);
    let base = sorted(piece.cells());

    for _ in 0..4 {
        piece.rotate(&grid, RotateDir::CounterClockwise);
        assert_eq!(sorted(piece.cells()), base);
        assert_eq!(piece.position(), (0, 0));
    }
}

#[test]
fn test_i_states_use_half_cell_pivot() {
    let catalog = ShapeCatalog::standard().unwrap();
    let grid = Grid::default();
    let mut piece = spawn(&catalog, ShapeKind::I);

    piece.rotate(&grid, RotateDir::Clockwise);
    assert_eq!(sorted(piece.cells()), vec![(1, -1), (1, 0), (1, 1), (1, 2)]);

    piece.rotate(&grid, RotateDir::Clockwise);
    assert_eq!(sorted(piece.cells()), vec![(-1, 0), (0, 0), (1, 0), (2, 0)]);

    piece.rotate(&grid, RotateDir::Clockwise);
    assert_eq!(sorted(piece.cells()), vec![(0, -1), (0, 0), (0, 1), (0, 2)]);
}

#[test]
fn test_counter_clockwise_t() {
    let catalog = ShapeCatalog::standard().unwrap();
    let grid = Grid::default();
    let mut piece = spawn(&catalog, ShapeKind::T);

    assert!(piece.rotate(&grid, RotateDir::CounterClockwise));
    assert_eq!(piece.rotation(), 3);
    // Nose points left.
    assert_eq!(sorted(piece.cells()), vec![(-1, 0), (0, -1), (0, 0), (0, 1)]);
}

#[test]
fn test_blocked_rotation_without_kick_fails() {
    let catalog = ShapeCatalog::standard().unwrap();
    let mut grid = Grid::default();
    // Box in a horizontal I so no vertical placement fits.
    for x in -5..5 {
        for y in -10..10 {
            if y != 1 {
                grid.set(x, y, Some(ShapeKind::Z));
            }
        }
    }
    let mut piece = spawn(&catalog, ShapeKind::I);
    assert!(piece.is_valid(&grid));
    let before = piece.clone();

    assert!(!piece.rotate(&grid, RotateDir::Clockwise));
    assert!(!piece.rotate(&grid, RotateDir::CounterClockwise));
    assert_eq!(piece, before);
}
