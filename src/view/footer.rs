//! Footer: the current compliment and a credit line that reveals itself
//! one word group at a time.

use super::styles::CardStyles;
use crate::model::catalog::CREDIT_GROUPS;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Delay before the first credit group appears.
pub const CREDIT_DELAY: Duration = Duration::from_millis(500);

/// Delay between consecutive credit groups.
pub const CREDIT_STAGGER: Duration = Duration::from_millis(200);

/// Number of credit groups visible after `elapsed`.
pub fn visible_credit_groups(elapsed: Duration) -> usize {
    let Some(since_first) = elapsed.checked_sub(CREDIT_DELAY) else {
        return 0;
    };
    let stagger = CREDIT_STAGGER.as_millis().max(1);
    let shown = since_first.as_millis() / stagger + 1;
    usize::try_from(shown)
        .unwrap_or(usize::MAX)
        .min(CREDIT_GROUPS.len())
}

/// Credit line after `elapsed`.
pub fn credit_line(elapsed: Duration) -> String {
    CREDIT_GROUPS[..visible_credit_groups(elapsed)].join(" ")
}

/// Draw the footer.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    compliment: &str,
    elapsed: Duration,
    styles: &CardStyles,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let compliment = Paragraph::new(Line::styled(compliment, styles.compliment))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(compliment, chunks[0]);

    let credit =
        Paragraph::new(Line::styled(credit_line(elapsed), styles.credit)).alignment(Alignment::Center);
    frame.render_widget(credit, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_before_delay() {
        assert_eq!(visible_credit_groups(Duration::from_millis(499)), 0);
        assert_eq!(credit_line(Duration::ZERO), "");
    }

    #[test]
    fn groups_appear_one_by_one() {
        assert_eq!(credit_line(Duration::from_millis(500)), "Made");
        assert_eq!(
            credit_line(Duration::from_millis(700)),
            "Made with laziness!!"
        );
        assert_eq!(visible_credit_groups(Duration::from_millis(899)), 2);
    }

    #[test]
    fn full_credit_stays() {
        insta::assert_snapshot!(
            credit_line(Duration::from_secs(60)),
            @"Made with laziness!! by fake psychic"
        );
    }
}
