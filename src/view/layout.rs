//! Screen layout and hit regions.
//!
//! Layout is a pure function of the frame area. The same rectangles are
//! used for drawing and for routing mouse events.

use super::constants::{
    CARD_HEIGHT, CARD_WIDTH, COVER_HEIGHT, FOOTER_HEIGHT, HEADER_HEIGHT, PX_PER_COLUMN,
    STATUS_BAR_HEIGHT, VOLUME_GAP, VOLUME_TRACK_HEIGHT,
};
use super::styles::CardStyles;
use super::{card_stack, footer, volume_bar};
use crate::model::KeyAction;
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Header title.
const HEADER_TITLE: &str = "♪ crushplays ♪";

/// Header subtitle.
const HEADER_SUBTITLE: &str = "a little stack of songs, just for you";

/// Width of the waveform in columns (six bars with gaps).
pub const WAVEFORM_WIDTH: u16 = 11;

/// Width of the volume track and icon.
pub const VOLUME_WIDTH: u16 = 3;

/// Every region of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title lines.
    pub header: Rect,
    /// Region the cards move in.
    pub stage: Rect,
    /// Resting position of every card.
    pub card: Rect,
    /// Vertical volume track.
    pub volume_track: Rect,
    /// Mute toggle under the track.
    pub volume_icon: Rect,
    /// Compliment and credit.
    pub footer: Rect,
    /// Key hints.
    pub status: Rect,
}

impl ScreenLayout {
    /// Lay out `area`.
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);
        let (header, stage, footer, status) = (chunks[0], chunks[1], chunks[2], chunks[3]);

        let card_width = CARD_WIDTH.min(stage.width);
        let card_height = CARD_HEIGHT.min(stage.height);
        let card = Rect::new(
            stage.x + (stage.width - card_width) / 2,
            stage.y + (stage.height - card_height) / 2,
            card_width,
            card_height,
        );

        // Right of the stack, pulled back inside the stage on narrow screens.
        let volume_x = (card.right() + VOLUME_GAP)
            .min(stage.right().saturating_sub(VOLUME_WIDTH))
            .max(stage.x);
        let track_height = VOLUME_TRACK_HEIGHT.min(card_height.saturating_sub(2));
        let track_y = card.y + (card_height.saturating_sub(track_height + 2)) / 2;
        let volume_track = Rect::new(volume_x, track_y, VOLUME_WIDTH, track_height)
            .intersection(stage);
        let volume_icon = Rect::new(
            volume_x,
            volume_track.bottom().saturating_add(1),
            VOLUME_WIDTH,
            1,
        )
        .intersection(stage);

        Self {
            header,
            stage,
            card,
            volume_track,
            volume_icon,
            footer,
            status,
        }
    }

    /// Card rectangle shifted horizontally by `offset_px`, clipped to the
    /// stage. Rotation is ignored for hit testing.
    pub fn card_at(&self, offset_px: f64) -> Rect {
        shift(self.card, px_to_columns(offset_px)).intersection(self.stage)
    }

    /// Waveform rectangle of a card drawn at `offset_px`.
    pub fn waveform_at(&self, offset_px: f64) -> Rect {
        let inner = inner(self.card);
        let waveform = Rect::new(
            inner.x + 1,
            inner.y + waveform_row(inner),
            WAVEFORM_WIDTH.min(inner.width.saturating_sub(1)),
            1,
        );
        shift(waveform, px_to_columns(offset_px)).intersection(self.stage)
    }
}

/// Card area inside its border.
pub fn inner(card: Rect) -> Rect {
    Rect::new(
        card.x.saturating_add(1),
        card.y.saturating_add(1),
        card.width.saturating_sub(2),
        card.height.saturating_sub(2),
    )
}

/// Row of the title inside the card border.
pub fn title_row(inner: Rect) -> u16 {
    (COVER_HEIGHT + 1).min(inner.height.saturating_sub(4))
}

/// Row of the waveform inside the card border.
pub fn waveform_row(inner: Rect) -> u16 {
    (title_row(inner) + 3).min(inner.height.saturating_sub(1))
}

/// Whole terminal columns covered by `px`.
pub fn px_to_columns(px: f64) -> i32 {
    if px.is_finite() {
        (px / PX_PER_COLUMN).round() as i32
    } else {
        0
    }
}

/// Move `rect` horizontally, dropping whatever leaves the left edge.
fn shift(rect: Rect, dx: i32) -> Rect {
    let x = i32::from(rect.x) + dx;
    let right = x + i32::from(rect.width);
    if right <= 0 {
        return Rect::new(0, rect.y, 0, rect.height);
    }
    let left = x.max(0);
    let clamp = |v: i32| u16::try_from(v).unwrap_or(u16::MAX);
    Rect::new(
        clamp(left),
        rect.y,
        clamp(right - left),
        rect.height,
    )
}

/// Whether `(column, row)` falls inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(ratatui::layout::Position::new(column, row))
}

/// Render the whole card screen.
pub fn render_layout(
    frame: &mut Frame,
    layout: &ScreenLayout,
    state: &AppState,
    styles: &CardStyles,
    now: Instant,
) {
    render_header(frame, layout.header, styles);
    card_stack::render_card_stack(frame.buffer_mut(), layout, state, styles, now);
    volume_bar::render_volume_bar(
        frame.buffer_mut(),
        layout.volume_track,
        layout.volume_icon,
        state.volume(),
        styles,
    );
    footer::render_footer(
        frame,
        layout.footer,
        state.compliments().current(),
        state.elapsed(now),
        styles,
    );
    render_status_bar(frame, layout.status, styles);
}

fn render_header(frame: &mut Frame, area: Rect, styles: &CardStyles) {
    let lines = vec![
        Line::styled(HEADER_TITLE, styles.header),
        Line::styled(HEADER_SUBTITLE, styles.hint),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Key hint line, e.g. `←/h swipe left  ...  q quit`.
pub fn build_keyboard_hints() -> String {
    const HINTS: &[(&str, KeyAction)] = &[
        ("←", KeyAction::SwipeLeft),
        ("→", KeyAction::SwipeRight),
        ("↑", KeyAction::VolumeUp),
        ("↓", KeyAction::VolumeDown),
        ("m", KeyAction::ToggleMute),
        ("space", KeyAction::TogglePlayback),
        ("n", KeyAction::NextCompliment),
        ("q", KeyAction::Quit),
    ];
    HINTS
        .iter()
        .map(|(key, action)| format!("{key} {}", action.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_status_bar(frame: &mut Frame, area: Rect, styles: &CardStyles) {
    let hints = Paragraph::new(Line::styled(build_keyboard_hints(), styles.status))
        .alignment(Alignment::Center);
    frame.render_widget(hints, area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
