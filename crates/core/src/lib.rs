//! Core simulation - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game: the shape catalog,
//! rotation with wall kicks, the grid, the falling piece, scoring and the
//! session loop that ties them together. It has no dependency on terminals
//! or clocks; time and input are handed to [`Session::tick`] by the driver.
//!
//! # Module Structure
//!
//! - [`shapes`]: shape definitions, pivot modes and wall-kick tables
//! - [`rotation`]: rotation matrix, index wrapping and kick-index mapping
//! - [`grid`]: bounded cell storage, validity checks and line clearing
//! - [`piece`]: the falling piece with its step and lock timers
//! - [`session`]: spawn, fall, lock, clear and respawn; game over
//! - [`scoring`]: line-clear points and score events
//! - [`rng`]: pluggable shape selection
//! - [`config`]: board size, spawn point and timing
//!
//! # Coordinates
//!
//! `y` grows upward. The default 10x20 grid is centred on the origin, so
//! columns run `-5..5` and rows `-10..10`, and pieces spawn at `(-1, 8)`.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{ScoreTally, Session};
//! use blockfall_core::types::{GameAction, InputFrame, TICK_MS};
//!
//! let mut session = Session::standard(12345).unwrap();
//! session.start();
//!
//! let mut tally = ScoreTally::default();
//! session.tick(TICK_MS, InputFrame::from(GameAction::MoveRight), &mut tally);
//! let report = session.tick(TICK_MS, InputFrame::from(GameAction::HardDrop), &mut tally);
//!
//! assert!(report.locked);
//! assert!(!session.grid().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use error::ConfigError;
pub use grid::{Bounds, Grid};
pub use piece::{Piece, PieceTiming};
pub use rng::{BagSource, FixedSequence, ShapeSource, SimpleRng, UniformSource};
pub use scoring::{line_clear_points, ScoreEvent, ScoreSink, ScoreTally};
pub use session::{Session, SessionStatus, TickReport};
pub use shapes::{Shape, ShapeCatalog, ShapeDef};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
