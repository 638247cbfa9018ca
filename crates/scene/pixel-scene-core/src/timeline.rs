//! Time-ordered event list with a forward-only cursor.

use crate::data::TimelineEntry;
use crate::error::SceneError;

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    events: Vec<TimelineEntry>,
    cursor: usize,
    elapsed: f32,
}

impl Timeline {
    /// Sort `events` by time; ties keep their authored order.
    pub fn new(mut events: Vec<TimelineEntry>) -> Result<Self, SceneError> {
        if let Some(index) = events.iter().position(|e| !e.time.is_finite()) {
            return Err(SceneError::InvalidEvent {
                index,
                reason: format!("time must be finite, got {}", events[index].time),
            });
        }
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self {
            events,
            cursor: 0,
            elapsed: 0.0,
        })
    }

    /// Advance the clock and return the index range of events that became due.
    ///
    /// The cursor moves past every returned event, whatever applying it does.
    /// The clock never runs backwards: negative or non-finite `elapsed` counts
    /// as zero.
    pub fn advance(&mut self, elapsed: f32) -> std::ops::Range<usize> {
        self.elapsed += clamp_elapsed(elapsed);
        let start = self.cursor;
        while self
            .events
            .get(self.cursor)
            .is_some_and(|e| e.time <= self.elapsed)
        {
            self.cursor += 1;
        }
        start..self.cursor
    }

    pub fn events(&self) -> &[TimelineEntry] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.events.get(index)
    }

    /// Index of the next event not yet applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total scene time in milliseconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Rewind clock and cursor to the start.
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.elapsed = 0.0;
    }
}

/// Map an elapsed time the clock cannot use (negative, NaN, infinite) to zero.
pub fn clamp_elapsed(elapsed: f32) -> f32 {
    if elapsed.is_finite() && elapsed >= 0.0 {
        elapsed
    } else {
        log::warn!("ignoring invalid elapsed time {elapsed}");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SceneAction;

    fn entry(time: f32, sprite: &str) -> TimelineEntry {
        TimelineEntry {
            time,
            sprite: sprite.to_string(),
            action: SceneAction::Unplace,
        }
    }

    #[test]
    fn sorts_by_time_keeping_ties_in_order() {
        let tl = Timeline::new(vec![
            entry(100.0, "c"),
            entry(0.0, "a"),
            entry(50.0, "b1"),
            entry(50.0, "b2"),
        ])
        .unwrap();
        let order: Vec<&str> = tl.events().iter().map(|e| e.sprite.as_str()).collect();
        assert_eq!(order, vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn cursor_only_moves_forward() {
        let mut tl =
            Timeline::new(vec![entry(0.0, "a"), entry(20.0, "b"), entry(20.0, "c")]).unwrap();
        assert_eq!(tl.advance(0.0), 0..1);
        assert_eq!(tl.advance(10.0), 1..1);
        assert_eq!(tl.advance(10.0), 1..3);
        assert!(tl.is_finished());
        assert_eq!(tl.advance(1000.0), 3..3);
        assert_eq!(tl.elapsed(), 1020.0);

        tl.rewind();
        assert_eq!(tl.cursor(), 0);
        assert_eq!(tl.advance(25.0), 0..3);
    }

    #[test]
    fn rejects_non_finite_times() {
        let err = Timeline::new(vec![entry(0.0, "a"), entry(f32::NAN, "b")]).unwrap_err();
        assert!(matches!(err, SceneError::InvalidEvent { index: 1, .. }));
    }

    #[test]
    fn invalid_elapsed_never_moves_the_clock_back_or_stalls_it() {
        let mut tl = Timeline::new(vec![entry(10.0, "a"), entry(30.0, "b")]).unwrap();
        assert_eq!(tl.advance(20.0), 0..1);
        for bad in [-15.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(tl.advance(bad), 1..1);
            assert_eq!(tl.elapsed(), 20.0);
        }
        assert_eq!(tl.advance(10.0), 1..2);
        assert_eq!(tl.elapsed(), 30.0);
    }
}
