//! Card stack widget.
//!
//! Each card is drawn into its own buffer, then copied onto the frame with
//! its pose applied: a horizontal shift for the offset and a per-row shear
//! approximating the tilt. Cards are copied bottom to top so higher ranks
//! cover lower ones.

use super::constants::{PX_PER_COLUMN, PX_PER_ROW};
use super::layout::{self, px_to_columns, ScreenLayout};
use super::styles::CardStyles;
use crate::state::waveform::{BAR_COUNT, MAX_HEIGHT};
use crate::state::{AppState, CardPose, CardState, PlaybackStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;
use url::Url;

/// Bar glyphs from lowest to highest.
const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Glyph for a bar of `height` pixels, or a blank for a hidden bar.
pub fn bar_glyph(height: Option<f64>) -> char {
    let Some(height) = height else {
        return ' ';
    };
    let level = (height / f64::from(MAX_HEIGHT) * BAR_GLYPHS.len() as f64).ceil();
    let index = (level.max(1.0) as usize).min(BAR_GLYPHS.len()) - 1;
    BAR_GLYPHS[index]
}

/// Waveform as text: one glyph per bar, separated by spaces.
pub fn waveform_line(heights: &[Option<f64>; BAR_COUNT]) -> String {
    heights
        .iter()
        .map(|h| bar_glyph(*h).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short playback hint shown next to the waveform of the top card.
pub fn playback_hint(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Playing => "playing",
        PlaybackStatus::AwaitingInteraction => "tap to play",
        PlaybackStatus::Paused => "paused",
        PlaybackStatus::Silent => "no sound",
        PlaybackStatus::Stopped => "",
    }
}

/// Everything needed to draw one card.
struct CardFrame<'a> {
    card: &'a CardState,
    active: bool,
    heights: [Option<f64>; BAR_COUNT],
    elapsed: Duration,
}

/// Draw the stack into `buf`.
pub fn render_card_stack(
    buf: &mut Buffer,
    layout: &ScreenLayout,
    state: &AppState,
    styles: &CardStyles,
    now: Instant,
) {
    let size = Rect::new(0, 0, layout.card.width, layout.card.height);
    if size.is_empty() {
        return;
    }

    for card in state.cards_in_z_order() {
        let id = card.id();
        let frame = CardFrame {
            card,
            active: state.roles(id).active,
            heights: state.waveform_heights(id, now),
            elapsed: state.elapsed(now),
        };

        let mut card_buf = Buffer::empty(size);
        draw_card(&mut card_buf, &frame, styles);
        if !frame.active {
            card_buf.set_style(size, Style::default().add_modifier(Modifier::DIM));
        }

        let clip = layout.stage.intersection(buf.area);
        blit(&card_buf, buf, layout.card, clip, state.card_pose(id));
    }
}

fn draw_card(buf: &mut Buffer, frame: &CardFrame<'_>, styles: &CardStyles) {
    let area = buf.area;
    let border = if frame.active {
        styles.active_border
    } else {
        styles.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .render(area, buf);

    let inner = layout::inner(area);
    if inner.is_empty() {
        return;
    }
    let song = frame.card.song();

    // Cover placeholder with the image name in the middle.
    let cover_rows = layout::title_row(inner).saturating_sub(1);
    for row in 0..cover_rows {
        buf.set_string(
            inner.x,
            inner.y + row,
            "░".repeat(usize::from(inner.width)),
            styles.cover,
        );
    }
    if cover_rows > 0 {
        let name = cover_label(&song.image_ref);
        let name = truncate(&name, usize::from(inner.width.saturating_sub(2)));
        let x = inner.x + (inner.width.saturating_sub(name.width() as u16)) / 2;
        buf.set_string(x, inner.y + cover_rows / 2, &name, styles.cover);
    }

    let text_width = usize::from(inner.width.saturating_sub(2));
    let title_y = inner.y + layout::title_row(inner);
    buf.set_string(
        inner.x + 1,
        title_y,
        frame.card.title().frame(text_width, frame.elapsed),
        styles.title,
    );
    if title_y + 1 < inner.bottom() {
        buf.set_string(
            inner.x + 1,
            title_y + 1,
            frame.card.artist().frame(text_width, frame.elapsed),
            styles.artist,
        );
    }

    let wave_y = inner.y + layout::waveform_row(inner);
    if wave_y > title_y + 1 {
        let line = waveform_line(&frame.heights);
        buf.set_stringn(inner.x + 1, wave_y, &line, text_width, styles.waveform);
        if frame.active {
            let hint = playback_hint(frame.card.playback());
            let x = inner.right().saturating_sub(hint.width() as u16 + 1);
            if x > inner.x + 1 + line.width() as u16 {
                buf.set_string(x, wave_y, hint, styles.hint);
            }
        }
    }
}

/// Text shown on the cover placeholder: the image host for URLs, the last
/// path segment otherwise. Covers are never fetched.
pub fn cover_label(image_ref: &str) -> String {
    match Url::parse(image_ref) {
        Ok(url) => url.host_str().unwrap_or_default().to_string(),
        Err(_) => image_ref
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Cut `text` to at most `width` columns.
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += unicode_width::UnicodeWidthChar::width(*c).unwrap_or(0);
            used <= width
        })
        .collect()
}

/// Horizontal shift of `row` in columns for a tilt of `rotation` degrees.
///
/// Rows above the centre move with the tilt, rows below move against it.
pub fn shear_columns(row: u16, height: u16, rotation: f64) -> i32 {
    let centre = f64::from(height) / 2.0;
    let dy_px = (f64::from(row) + 0.5 - centre) * PX_PER_ROW;
    let shift = -dy_px * rotation.to_radians().sin() / PX_PER_COLUMN;
    if shift.is_finite() {
        shift.round() as i32
    } else {
        0
    }
}

/// Copy `src` onto `dst` at `origin`, posed, keeping to `clip`.
fn blit(src: &Buffer, dst: &mut Buffer, origin: Rect, clip: Rect, pose: CardPose) {
    let dx = px_to_columns(pose.x);
    for row in 0..src.area.height {
        let y = origin.y + row;
        if y < clip.y || y >= clip.bottom() {
            continue;
        }
        let shear = shear_columns(row, src.area.height, pose.rotation);
        for col in 0..src.area.width {
            let x = i32::from(origin.x) + i32::from(col) + dx + shear;
            if x < i32::from(clip.x) || x >= i32::from(clip.right()) {
                continue;
            }
            let (Some(from), Ok(x)) = (src.cell((col, row)), u16::try_from(x)) else {
                continue;
            };
            if let Some(to) = dst.cell_mut((x, y)) {
                *to = from.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::waveform::{PAUSE_HEIGHT, STATIC_HEIGHT};

    #[test]
    fn hidden_bar_is_blank() {
        assert_eq!(bar_glyph(None), ' ');
    }

    #[test]
    fn static_and_pause_heights_map_to_glyphs() {
        assert_eq!(bar_glyph(Some(STATIC_HEIGHT)), '▂');
        assert_eq!(bar_glyph(Some(PAUSE_HEIGHT)), '█');
        assert_eq!(bar_glyph(Some(0.0)), '▁');
        assert_eq!(bar_glyph(Some(40.0)), '█');
    }

    #[test]
    fn pause_glyph_line() {
        let heights = [None, None, Some(11.0), Some(11.0), None, None];
        insta::assert_snapshot!(format!("[{}]", waveform_line(&heights)), @"[    █ █    ]");
    }

    #[test]
    fn upright_card_has_no_shear() {
        for row in 0..15 {
            assert_eq!(shear_columns(row, 15, 0.0), 0);
        }
    }

    #[test]
    fn tilt_shears_top_and_bottom_opposite_ways() {
        let top = shear_columns(0, 15, 5.0);
        let bottom = shear_columns(14, 15, 5.0);
        assert!(top > 0);
        assert_eq!(top, -bottom);
        assert_eq!(shear_columns(7, 15, 5.0), 0);
    }

    #[test]
    fn cover_label_shows_host_for_urls() {
        assert_eq!(
            cover_label("https://i.pinimg.com/736x/10/d7/ac/10d7ac5531653720794a71d35bd40a13.jpg"),
            "i.pinimg.com"
        );
        assert_eq!(cover_label("/covers/gulabo.jpg"), "gulabo.jpg");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate("gulabo.jpg", 6), "gulabo");
        assert_eq!(truncate("🎂🎂", 3), "🎂");
    }

    #[test]
    fn blit_shifts_by_offset() {
        let mut src = Buffer::empty(Rect::new(0, 0, 2, 1));
        src.set_string(0, 0, "ab", Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 10, 1));
        let clip = dst.area;
        blit(
            &src,
            &mut dst,
            Rect::new(2, 0, 2, 1),
            clip,
            CardPose {
                x: 30.0,
                rotation: 0.0,
            },
        );
        assert_eq!(dst.cell((5, 0)).map(|c| c.symbol()), Some("a"));
        assert_eq!(dst.cell((6, 0)).map(|c| c.symbol()), Some("b"));
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 1));
        src.set_string(0, 0, "abc", Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 4, 1));
        let clip = dst.area;
        blit(
            &src,
            &mut dst,
            Rect::new(0, 0, 3, 1),
            clip,
            CardPose {
                x: -10.0,
                rotation: 0.0,
            },
        );
        assert_eq!(dst.cell((0, 0)).map(|c| c.symbol()), Some("b"));
    }
}
