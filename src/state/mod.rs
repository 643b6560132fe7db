//! Card state machine (pure).
//!
//! All state transitions are testable without a terminal. Audio side
//! effects go through [`crate::audio::AudioBackend`].

pub mod app_state;
pub mod card;
pub mod compliments;
pub mod deck;
pub mod gesture;
pub mod marquee;
pub mod playback;
pub mod spring;
pub mod volume;
pub mod waveform;

// Re-export for convenience
pub use app_state::{AppOptions, AppState, CardState};
pub use card::{CardPose, CardPresenter, CardRoles};
pub use compliments::ComplimentRotator;
pub use deck::{DeckError, RankedDeck, SwipeDirection};
pub use gesture::{GestureInterpreter, Lean};
pub use marquee::Marquee;
pub use playback::PlaybackStatus;
pub use volume::{VolumeControl, VolumeIcon};
pub use waveform::WaveformMode;
