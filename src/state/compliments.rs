//! Footer message cycle.

use std::time::{Duration, Instant};

/// Default time each compliment stays on screen.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Cycles through a fixed list of messages on a timer, wrapping at the end.
#[derive(Debug, Clone)]
pub struct ComplimentRotator {
    messages: Vec<String>,
    index: usize,
    interval: Duration,
    next_due: Instant,
}

impl ComplimentRotator {
    /// Start on the first message; the first advance is due one interval
    /// after `now`. A zero interval is raised to one millisecond.
    pub fn new<I, S>(messages: I, interval: Duration, now: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            index: 0,
            interval,
            next_due: now + interval,
        }
    }

    /// Message currently shown. Empty when there are no messages.
    pub fn current(&self) -> &str {
        self.messages.get(self.index).map_or("", String::as_str)
    }

    /// Index of the current message.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of messages in the cycle.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Move to the next message, wrapping to the first.
    pub fn advance(&mut self) {
        if !self.messages.is_empty() {
            self.index = (self.index + 1) % self.messages.len();
        }
    }

    /// Skip ahead now and restart the timer from `now`.
    pub fn skip(&mut self, now: Instant) {
        self.advance();
        self.next_due = now + self.interval;
    }

    /// Fire every interval that elapsed up to `now`. Returns true if the
    /// message changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.index;
        let mut fired = false;
        while now >= self.next_due {
            self.advance();
            self.next_due += self.interval;
            fired = true;
        }
        fired && before != self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX: [&str; 6] = ["one", "two", "three", "four", "five", "six"];

    #[test]
    fn starts_on_first_message() {
        let rotator = ComplimentRotator::new(SIX, DEFAULT_INTERVAL, Instant::now());
        assert_eq!(rotator.current(), "one");
        assert_eq!(rotator.len(), 6);
    }

    #[test]
    fn six_ticks_wrap_back_to_first() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(SIX, DEFAULT_INTERVAL, start);
        for tick in 1..=6u32 {
            rotator.tick(start + DEFAULT_INTERVAL * tick);
        }
        assert_eq!(rotator.current(), "one");
    }

    #[test]
    fn does_not_advance_before_interval() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(SIX, DEFAULT_INTERVAL, start);
        assert!(!rotator.tick(start + Duration::from_millis(9_999)));
        assert_eq!(rotator.current(), "one");
        assert!(rotator.tick(start + DEFAULT_INTERVAL));
        assert_eq!(rotator.current(), "two");
    }

    #[test]
    fn late_tick_catches_up_on_missed_intervals() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(SIX, DEFAULT_INTERVAL, start);
        rotator.tick(start + Duration::from_secs(35));
        assert_eq!(rotator.current(), "four");
    }

    #[test]
    fn skip_restarts_timer() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(SIX, DEFAULT_INTERVAL, start);
        rotator.skip(start + Duration::from_secs(9));
        assert_eq!(rotator.current(), "two");
        rotator.tick(start + Duration::from_secs(10));
        assert_eq!(rotator.current(), "two");
        rotator.tick(start + Duration::from_secs(19));
        assert_eq!(rotator.current(), "three");
    }

    #[test]
    fn empty_rotator_shows_nothing() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(Vec::<String>::new(), DEFAULT_INTERVAL, start);
        assert!(rotator.is_empty());
        rotator.tick(start + DEFAULT_INTERVAL * 3);
        assert_eq!(rotator.current(), "");
    }

    #[test]
    fn single_message_never_reports_change() {
        let start = Instant::now();
        let mut rotator = ComplimentRotator::new(["only"], DEFAULT_INTERVAL, start);
        assert!(!rotator.tick(start + DEFAULT_INTERVAL));
        assert_eq!(rotator.current(), "only");
    }
}
