//! Rotation geometry
//!
//! Cells rotate around the piece pivot with the 90° rotation matrix
//! `[cos, sin, -sin, cos]`, scaled by the rotation step (+1 clockwise,
//! -1 counter-clockwise). With y growing upward, a clockwise step maps
//! `(x, y)` to `(y, -x)`.
//!
//! Shapes with a [`PivotMode::HalfCell`] pivot (I and O) have no centre cell:
//! their cells are shifted by -0.5 on both axes first and the result is
//! rounded up. Other shapes are rotated directly and rounded to nearest.

use crate::shapes::PieceCells;
use crate::types::{PivotMode, RotateDir, ROTATION_STATES};

/// 90° rotation matrix, row-major `[cos, sin, -sin, cos]`.
pub const ROTATION_MATRIX: [f32; 4] = [0.0, 1.0, -1.0, 0.0];

/// Wrap `input` into `[min, max)`.
///
/// Defined for every integer, including values below `min`:
/// `wrap(-1, 0, 4) == 3` and `wrap(-4, 0, 4) == 0`.
pub fn wrap(input: i8, min: i8, max: i8) -> i8 {
    debug_assert!(max > min);
    min + (input - min).rem_euclid(max - min)
}

/// Rotation index reached from `from` by one step in `dir`.
pub fn next_rotation(from: i8, dir: RotateDir) -> i8 {
    wrap(from + dir.step(), 0, ROTATION_STATES)
}

/// Kick table row for a (from, to) rotation transition.
///
/// Clockwise transitions map to 0..=3, counter-clockwise to 4..=7.
/// Returns `None` for pairs that are not a single 90° step.
pub fn wall_kick_index(from: i8, to: i8) -> Option<usize> {
    match (from, to) {
        (0, 1) => Some(0),
        (1, 2) => Some(1),
        (2, 3) => Some(2),
        (3, 0) => Some(3),
        (1, 0) => Some(4),
        (2, 1) => Some(5),
        (3, 2) => Some(6),
        (0, 3) => Some(7),
        _ => None,
    }
}

/// Rotate every cell one step in `dir` around the pivot.
pub fn rotate_cells(cells: &mut PieceCells, pivot: PivotMode, dir: RotateDir) {
    let m = ROTATION_MATRIX;
    let d = f32::from(dir.step());

    for cell in cells.iter_mut() {
        let (mut x, mut y) = (f32::from(cell.0), f32::from(cell.1));

        let (nx, ny) = match pivot {
            PivotMode::HalfCell => {
                x -= 0.5;
                y -= 0.5;
                (
                    (x * m[0] * d + y * m[1] * d).ceil(),
                    (x * m[2] * d + y * m[3] * d).ceil(),
                )
            }
            PivotMode::Center => (
                (x * m[0] * d + y * m[1] * d).round(),
                (x * m[2] * d + y * m[3] * d).round(),
            ),
        };

        *cell = (nx as i8, ny as i8);
    }
}
