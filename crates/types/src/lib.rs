//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond small conversions
//! and display labels, so they can be shared by the simulation core, the
//! input mapping and the terminal renderer alike.
//!
//! # Coordinates
//!
//! The playfield uses integer cell coordinates with **y growing upward**.
//! The default board is centred on the origin:
//!
//! - **Width**: 10 columns, x in `-5..5`
//! - **Height**: 20 rows, y in `-10..10`
//! - **Spawn position**: `(-1, 8)`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `STEP_DELAY_MS` | 1000 | Automatic one-row drop interval |
//! | `LOCK_DELAY_MS` | 500 | Rest time before a piece is forced to lock |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, InputFrame, RotateDir, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::T.as_str(), "t");
//! assert_eq!(RotateDir::Clockwise.step(), 1);
//!
//! let frame = InputFrame::from(GameAction::HardDrop).with(GameAction::RotateCw);
//! assert!(frame.contains(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default spawn pivot for new pieces on the centred board.
pub const SPAWN_POSITION: CellOffset = (-1, 8);

/// Driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic step interval (one row per second).
pub const STEP_DELAY_MS: u32 = 1000;

/// Time a piece may rest before it locks.
pub const LOCK_DELAY_MS: u32 = 500;

/// Number of cells in every piece.
pub const PIECE_CELLS: usize = 4;

/// Number of rotation states.
pub const ROTATION_STATES: i8 = 4;

/// Number of (from, to) rotation transitions covered by a wall-kick table.
pub const KICK_TRANSITIONS: usize = 8;

/// Integer 2D cell coordinate or offset `(x, y)`.
pub type CellOffset = (i8, i8);

/// The seven piece shapes.
///
/// Declaration order is the catalog order: T, O, J, L, I, S, Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    T,
    O,
    J,
    L,
    I,
    S,
    Z,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::I,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Position of this kind in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShapeKind::T => 0,
            ShapeKind::O => 1,
            ShapeKind::J => 2,
            ShapeKind::L => 3,
            ShapeKind::I => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::T => "t",
            ShapeKind::O => "o",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::I => "i",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// How a shape's cells are rotated.
///
/// - **Center**: the pivot is a real cell; rotate and round to nearest.
/// - **HalfCell**: the pivot sits on a cell corner (I and O); shift by -0.5
///   on both axes, rotate, then round up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotMode {
    Center,
    HalfCell,
}

/// Translation directions available to a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDir {
    Left,
    Right,
    Down,
}

impl MoveDir {
    /// Pivot delta for one step in this direction (y grows upward).
    pub fn delta(self) -> CellOffset {
        match self {
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
            MoveDir::Down => (0, -1),
        }
    }
}

/// Rotation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    Clockwise,
    CounterClockwise,
}

impl RotateDir {
    /// Signed rotation step: +1 clockwise, -1 counter-clockwise.
    pub fn step(self) -> i8 {
        match self {
            RotateDir::Clockwise => 1,
            RotateDir::CounterClockwise => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            RotateDir::Clockwise => RotateDir::CounterClockwise,
            RotateDir::CounterClockwise => RotateDir::Clockwise,
        }
    }
}

/// Discrete player inputs, delivered at most once per tick each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    MoveDown,
    /// Drop the piece as far as it goes and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Start a new game after game over
    Restart,
}

impl GameAction {
    const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Restart,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of actions triggered during one tick.
///
/// Pressing the same action twice in a tick still triggers it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputFrame {
    bits: u8,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: GameAction) {
        self.bits |= action.bit();
    }

    /// Builder form of [`InputFrame::press`].
    pub fn with(mut self, action: GameAction) -> Self {
        self.press(action);
        self
    }

    pub fn contains(&self, action: GameAction) -> bool {
        self.bits & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = GameAction> + '_ {
        GameAction::ALL
            .into_iter()
            .filter(move |action| self.contains(*action))
    }
}

impl From<GameAction> for InputFrame {
    fn from(action: GameAction) -> Self {
        Self::new().with(action)
    }
}

impl FromIterator<GameAction> for InputFrame {
    fn from_iter<I: IntoIterator<Item = GameAction>>(iter: I) -> Self {
        let mut frame = Self::new();
        for action in iter {
            frame.press(action);
        }
        frame
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Cell committed by a piece; the kind doubles as the
///   visual identifier handed to the renderer.
pub type Cell = Option<ShapeKind>;

/// Points for clearing 1, 2, 3 or 4 rows at once (index = rows).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Per-row fallback for clears outside the 1..=4 table.
pub const ANOMALOUS_LINE_SCORE: u32 = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(STEP_DELAY_MS, 1000);
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(TICK_MS, 16);
    }

    #[test]
    fn shape_kind_index_matches_catalog_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn move_deltas_point_down_for_negative_y() {
        assert_eq!(MoveDir::Down.delta(), (0, -1));
        assert_eq!(MoveDir::Left.delta(), (-1, 0));
        assert_eq!(MoveDir::Right.delta(), (1, 0));
    }

    #[test]
    fn input_frame_deduplicates() {
        let mut frame = InputFrame::new();
        assert!(frame.is_empty());
        frame.press(GameAction::MoveLeft);
        frame.press(GameAction::MoveLeft);
        frame.press(GameAction::RotateCw);
        assert!(frame.contains(GameAction::MoveLeft));
        assert!(!frame.contains(GameAction::MoveRight));
        assert_eq!(
            frame.iter().collect::<Vec<_>>(),
            vec![GameAction::MoveLeft, GameAction::RotateCw]
        );

        let collected: InputFrame = [GameAction::HardDrop, GameAction::HardDrop]
            .into_iter()
            .collect();
        assert_eq!(collected, InputFrame::from(GameAction::HardDrop));

        frame.clear();
        assert!(frame.is_empty());
    }

    #[test]
    fn rotate_dir_opposite() {
        assert_eq!(RotateDir::Clockwise.opposite(), RotateDir::CounterClockwise);
        assert_eq!(RotateDir::CounterClockwise.step(), -1);
    }
}
