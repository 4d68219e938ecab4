//! Per-tick input collection.
//!
//! Key events arrive whenever the terminal delivers them; the session wants
//! one set of triggered actions per tick. [`InputCollector`] sits between the
//! two: feed it every event, then [`take`](InputCollector::take) the frame
//! when the tick runs.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, should_quit};
use crate::types::{GameAction, InputFrame};

#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    frame: InputFrame,
    quit: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Releases are ignored; presses and repeats both
    /// count as one trigger for the current tick.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<GameAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if should_quit(key) {
            self.quit = true;
            return None;
        }
        let action = handle_key_event(key)?;
        self.frame.press(action);
        Some(action)
    }

    /// Record any terminal event; non-key events are ignored.
    pub fn handle_event(&mut self, event: &Event) -> Option<GameAction> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            _ => None,
        }
    }

    /// True once a quit key has been seen.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Actions collected so far, without clearing them.
    pub fn pending(&self) -> InputFrame {
        self.frame
    }

    /// Hand over the collected actions and start a new frame.
    pub fn take(&mut self) -> InputFrame {
        std::mem::take(&mut self.frame)
    }
}
