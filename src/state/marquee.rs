//! Scrolling text for song titles and artists.
//!
//! Long text scrolls left in a loop, resting at the start of every cycle.
//! Short text stays still. Frames are a pure function of elapsed time.

use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text longer than this many characters scrolls.
pub const SCROLL_THRESHOLD_CHARS: usize = 16;

/// Rest at the start of each cycle.
pub const CYCLE_PAUSE: Duration = Duration::from_secs(3);

/// Blank columns between the end of the text and its repeat.
pub const GAP_COLUMNS: usize = 1;

/// Looping horizontal text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marquee {
    text: String,
    columns_per_sec: f64,
}

impl Marquee {
    /// Scroll `text` at `columns_per_sec`.
    pub fn new(text: impl Into<String>, columns_per_sec: f64) -> Self {
        Self {
            text: text.into(),
            columns_per_sec: columns_per_sec.max(0.0),
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this text scrolls at all.
    pub fn scrolls(&self) -> bool {
        self.text.chars().count() > SCROLL_THRESHOLD_CHARS && self.columns_per_sec > 0.0
    }

    /// Display width of one loop (text plus gap).
    fn loop_width(&self) -> usize {
        self.text.width() + GAP_COLUMNS
    }

    /// Duration of one full cycle including the rest.
    pub fn cycle(&self) -> Duration {
        if !self.scrolls() {
            return Duration::ZERO;
        }
        CYCLE_PAUSE + Duration::from_secs_f64(self.loop_width() as f64 / self.columns_per_sec)
    }

    /// Scroll offset in columns at `elapsed`.
    pub fn offset_at(&self, elapsed: Duration) -> usize {
        if !self.scrolls() {
            return 0;
        }
        let cycle = self.cycle().as_secs_f64();
        let into_cycle = elapsed.as_secs_f64() % cycle;
        let moving = into_cycle - CYCLE_PAUSE.as_secs_f64();
        if moving <= 0.0 {
            return 0;
        }
        ((moving * self.columns_per_sec).floor() as usize).min(self.loop_width() - 1)
    }

    /// Visible text for a `width`-column window at `elapsed`.
    ///
    /// Wide characters cut by the left edge are dropped and the window is
    /// padded so the result never exceeds `width` columns.
    pub fn frame(&self, width: usize, elapsed: Duration) -> String {
        if width == 0 {
            return String::new();
        }

        let looped: String = if self.scrolls() {
            let gap = " ".repeat(GAP_COLUMNS);
            // Enough repeats to fill the window from any offset.
            let repeats = width / self.loop_width() + 2;
            std::iter::repeat(format!("{}{gap}", self.text))
                .take(repeats)
                .collect()
        } else {
            self.text.clone()
        };

        let mut skip = self.offset_at(elapsed);
        let mut used = 0;
        let mut out = String::new();
        for ch in looped.chars() {
            let w = ch.width().unwrap_or(0);
            if skip > 0 {
                if w > skip {
                    // Straddles the left edge.
                    out.push_str(&" ".repeat(w - skip));
                    used += w - skip;
                    skip = 0;
                } else {
                    skip -= w;
                }
                continue;
            }
            if used + w > width {
                break;
            }
            out.push(ch);
            used += w;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_static() {
        let marquee = Marquee::new("gulabo", 2.0);
        assert!(!marquee.scrolls());
        assert_eq!(marquee.frame(10, Duration::from_secs(30)), "gulabo");
    }

    #[test]
    fn exactly_sixteen_chars_is_static() {
        let marquee = Marquee::new("abcdefghijklmnop", 2.0);
        assert!(!marquee.scrolls());
    }

    #[test]
    fn short_text_is_truncated_to_window() {
        let marquee = Marquee::new("gulabo", 2.0);
        assert_eq!(marquee.frame(3, Duration::ZERO), "gul");
    }

    #[test]
    fn long_text_rests_at_start_of_cycle() {
        let marquee = Marquee::new("nothing's gonna hurt you baby", 2.0);
        assert!(marquee.scrolls());
        assert_eq!(marquee.offset_at(Duration::from_millis(2_900)), 0);
        assert_eq!(marquee.frame(7, Duration::from_secs(1)), "nothing");
    }

    #[test]
    fn long_text_scrolls_after_pause() {
        let marquee = Marquee::new("nothing's gonna hurt you baby", 2.0);
        // Two seconds of movement at two columns per second.
        assert_eq!(marquee.offset_at(Duration::from_secs(5)), 4);
        assert_eq!(marquee.frame(5, Duration::from_secs(5)), "ing's");
    }

    #[test]
    fn long_text_wraps_through_gap() {
        let text = "abcdefghijklmnopq"; // 17 chars, loop of 18 columns
        let marquee = Marquee::new(text, 2.0);
        // 3 s rest + 8 s moving = offset 16.
        assert_eq!(marquee.offset_at(Duration::from_secs(11)), 16);
        assert_eq!(marquee.frame(4, Duration::from_secs(11)), "q ab");
    }

    #[test]
    fn cycle_restarts_with_pause() {
        let marquee = Marquee::new("abcdefghijklmnopq", 2.0);
        let cycle = marquee.cycle();
        assert_eq!(cycle, Duration::from_secs(12));
        assert_eq!(marquee.offset_at(cycle + Duration::from_secs(1)), 0);
    }

    #[test]
    fn zero_speed_never_scrolls() {
        let marquee = Marquee::new("abcdefghijklmnopqrstuvwxyz", 0.0);
        assert!(!marquee.scrolls());
    }

    #[test]
    fn wide_characters_respect_width() {
        let marquee = Marquee::new("🎂🎂🎂", 2.0);
        assert_eq!(marquee.frame(3, Duration::ZERO), "🎂");
    }

    #[test]
    fn zero_width_window_is_empty() {
        let marquee = Marquee::new("anything", 2.0);
        assert_eq!(marquee.frame(0, Duration::ZERO), "");
    }
}
