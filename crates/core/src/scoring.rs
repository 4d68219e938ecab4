//! Scoring module - line-clear points and score events
//!
//! Points come from a fixed table: 1 row 100, 2 rows 300, 3 rows 500,
//! 4 rows 800. Any other count is scored at 200 per row and logged as
//! anomalous.
//!
//! Score changes leave the core as [`ScoreEvent`]s delivered to a
//! [`ScoreSink`] at the end of the tick that produced them.

use tracing::warn;

use crate::types::{ANOMALOUS_LINE_SCORE, LINE_SCORES};

/// Points for clearing `lines` rows in one lock.
pub fn line_clear_points(lines: u32) -> u32 {
    match lines {
        0 => 0,
        1..=4 => LINE_SCORES[lines as usize],
        _ => {
            warn!(lines, "unusual number of lines cleared");
            lines.saturating_mul(ANOMALOUS_LINE_SCORE)
        }
    }
}

/// Events emitted to score-tracking collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreEvent {
    /// Points were added to the score.
    ScoreAdded(u32),
    /// Rows were cleared by a single lock.
    LinesCleared(u32),
    /// Game over: score and line counters went back to zero.
    Reset,
}

/// Receiver for score events.
pub trait ScoreSink {
    fn on_score_added(&mut self, points: u32);

    fn on_lines_cleared(&mut self, count: u32);

    /// Counters were reset on game over.
    fn on_reset(&mut self) {}

    fn dispatch(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::ScoreAdded(points) => self.on_score_added(points),
            ScoreEvent::LinesCleared(count) => self.on_lines_cleared(count),
            ScoreEvent::Reset => self.on_reset(),
        }
    }
}

/// Sink that ignores every event.
impl ScoreSink for () {
    fn on_score_added(&mut self, _points: u32) {}

    fn on_lines_cleared(&mut self, _count: u32) {}
}

/// Running score and line totals, as a score display would keep them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTally {
    pub score: u32,
    pub lines: u32,
}

impl ScoreSink for ScoreTally {
    fn on_score_added(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    fn on_lines_cleared(&mut self, count: u32) {
        self.lines = self.lines.saturating_add(count);
    }

    fn on_reset(&mut self) {
        *self = Self::default();
    }
}

/// Sink that records every event, in order.
impl ScoreSink for Vec<ScoreEvent> {
    fn on_score_added(&mut self, points: u32) {
        self.push(ScoreEvent::ScoreAdded(points));
    }

    fn on_lines_cleared(&mut self, count: u32) {
        self.push(ScoreEvent::LinesCleared(count));
    }

    fn on_reset(&mut self) {
        self.push(ScoreEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_table() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 500);
        assert_eq!(line_clear_points(4), 800);
    }

    #[test]
    fn test_anomalous_counts_fall_back() {
        assert_eq!(line_clear_points(5), 1000);
        assert_eq!(line_clear_points(20), 4000);
        assert_eq!(line_clear_points(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_tally_accumulates_and_resets() {
        let mut tally = ScoreTally::default();
        tally.dispatch(ScoreEvent::ScoreAdded(300));
        tally.dispatch(ScoreEvent::LinesCleared(2));
        tally.dispatch(ScoreEvent::ScoreAdded(100));
        assert_eq!(tally, ScoreTally { score: 400, lines: 2 });

        tally.dispatch(ScoreEvent::Reset);
        assert_eq!(tally, ScoreTally::default());
    }

    #[test]
    fn test_vec_sink_records_order() {
        let mut events: Vec<ScoreEvent> = Vec::new();
        events.on_lines_cleared(1);
        events.on_score_added(100);
        events.on_reset();
        assert_eq!(
            events,
            vec![
                ScoreEvent::LinesCleared(1),
                ScoreEvent::ScoreAdded(100),
                ScoreEvent::Reset
            ]
        );
    }
}
