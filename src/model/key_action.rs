//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Volume
    /// Raise the volume by one step. Default: ↑/k
    VolumeUp,
    /// Lower the volume by one step. Default: ↓/j
    VolumeDown,
    /// Mute, or restore the level cached before muting. Default: m
    ToggleMute,

    // Deck
    /// Swipe the top card left. Default: ←/h
    SwipeLeft,
    /// Swipe the top card right. Default: →/l
    SwipeRight,
    /// Pause or resume the top card (same as clicking its waveform). Default: Space/Enter
    TogglePlayback,

    // Footer
    /// Skip to the next compliment without waiting for the timer. Default: n
    NextCompliment,

    // Application
    /// Exit the application. Default: q/Esc/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Short label used in the key hint line.
    pub fn label(self) -> &'static str {
        match self {
            KeyAction::VolumeUp => "volume up",
            KeyAction::VolumeDown => "volume down",
            KeyAction::ToggleMute => "mute",
            KeyAction::SwipeLeft => "swipe left",
            KeyAction::SwipeRight => "swipe right",
            KeyAction::TogglePlayback => "play/pause",
            KeyAction::NextCompliment => "next note",
            KeyAction::Quit => "quit",
        }
    }
}
