//! Vertical volume bar with a mute icon underneath.

use super::styles::CardStyles;
use crate::state::{VolumeControl, VolumeIcon};
use ratatui::{buffer::Buffer, layout::Rect};

/// Glyph for the mute toggle.
pub fn icon_glyph(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Off => "🔇",
        VolumeIcon::Silent => "🔈",
        VolumeIcon::Low => "🔉",
        VolumeIcon::High => "🔊",
    }
}

/// Level the track shows: nothing while muted.
pub fn displayed_level(volume: &VolumeControl) -> f64 {
    if volume.is_muted() {
        0.0
    } else {
        volume.level()
    }
}

/// Number of filled rows on a track of `height` rows.
pub fn filled_rows(level: f64, height: u16) -> u16 {
    let rows = (level.clamp(0.0, 1.0) * f64::from(height)).round();
    (rows as u16).min(height)
}

/// Draw the track (filled from the bottom) and the icon.
pub fn render_volume_bar(
    buf: &mut Buffer,
    track: Rect,
    icon: Rect,
    volume: &VolumeControl,
    styles: &CardStyles,
) {
    let track = track.intersection(buf.area);
    if !track.is_empty() {
        let filled = filled_rows(displayed_level(volume), track.height);
        let centre = track.x + track.width / 2;
        for i in 0..track.height {
            let y = track.bottom() - 1 - i;
            let (glyph, style) = if i < filled {
                ("█", styles.volume_fill)
            } else {
                ("│", styles.volume_track)
            };
            buf.set_string(centre, y, glyph, style);
        }
    }

    let icon = icon.intersection(buf.area);
    if !icon.is_empty() {
        buf.set_stringn(
            icon.x,
            icon.y,
            icon_glyph(volume.icon()),
            usize::from(icon.width),
            styles.volume_fill,
        );
    }
}
