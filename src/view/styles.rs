//! Card styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== CardStyles =====

/// Styles for every part of the screen.
///
/// Without colors only modifiers remain, so the layout still reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyles {
    /// Header title.
    pub header: Style,
    /// Border of the top card.
    pub active_border: Style,
    /// Border of the cards underneath.
    pub border: Style,
    /// Cover placeholder.
    pub cover: Style,
    /// Song title.
    pub title: Style,
    /// Artist line.
    pub artist: Style,
    /// Waveform bars.
    pub waveform: Style,
    /// Playback hint next to the waveform.
    pub hint: Style,
    /// Filled part of the volume track.
    pub volume_fill: Style,
    /// Empty part of the volume track.
    pub volume_track: Style,
    /// Footer compliment.
    pub compliment: Style,
    /// Footer credit.
    pub credit: Style,
    /// Key hint line.
    pub status: Style,
}

impl CardStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        if config.colors_enabled() {
            Self {
                header: bold.fg(Color::LightMagenta),
                active_border: Style::default().fg(Color::LightMagenta),
                border: Style::default().fg(Color::DarkGray),
                cover: Style::default().fg(Color::Magenta),
                title: bold.fg(Color::White),
                artist: Style::default().fg(Color::Gray),
                waveform: Style::default().fg(Color::LightMagenta),
                hint: Style::default().fg(Color::DarkGray),
                volume_fill: Style::default().fg(Color::LightMagenta),
                volume_track: Style::default().fg(Color::DarkGray),
                compliment: Style::default().fg(Color::Gray),
                credit: Style::default().fg(Color::DarkGray),
                status: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                header: bold,
                active_border: bold,
                border: Style::default(),
                cover: dim,
                title: bold,
                artist: Style::default(),
                waveform: Style::default(),
                hint: dim,
                volume_fill: Style::default(),
                volume_track: dim,
                compliment: Style::default(),
                credit: dim,
                status: dim,
            }
        }
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
