//! Terminal renderer for the falling-block game.
//!
//! Draws a [`GameSnapshot`](crate::core::GameSnapshot) into a character
//! framebuffer ([`fb`]), then flushes only the cells that changed since the
//! previous frame ([`renderer`]). Nothing here reads game state other than
//! the snapshot.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
