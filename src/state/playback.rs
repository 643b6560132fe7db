//! Playback status of a card and the side effects of role changes.

use crate::audio::{AudioBackend, PlaybackError};
use crate::model::SongId;
use tracing::{error, info, warn};

/// Playback status of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Not the top card, rewound.
    #[default]
    Stopped,
    /// Top card, playing.
    Playing,
    /// Top card, refused by the autoplay policy. Resumes on click only.
    AwaitingInteraction,
    /// Top card, paused by the user.
    Paused,
    /// Top card, playback failed. Shown as active but silent.
    Silent,
}

impl PlaybackStatus {
    /// Whether the waveform should show the pause glyph.
    pub fn shows_paused(self) -> bool {
        matches!(
            self,
            PlaybackStatus::AwaitingInteraction | PlaybackStatus::Paused
        )
    }
}

/// Map a play attempt to a status, logging failures.
fn outcome(id: &SongId, result: Result<(), PlaybackError>) -> PlaybackStatus {
    match result {
        Ok(()) => PlaybackStatus::Playing,
        Err(PlaybackError::AutoplayBlocked) => {
            warn!(%id, "Audio autoplay blocked - waiting for user interaction");
            PlaybackStatus::AwaitingInteraction
        }
        Err(err) => {
            error!(%id, error = %err, "Audio playback error");
            PlaybackStatus::Silent
        }
    }
}

/// The card became active: play from the beginning.
pub fn start(audio: &mut dyn AudioBackend, id: &SongId) -> PlaybackStatus {
    info!(%id, "Card became active");
    audio.rewind(id);
    outcome(id, audio.play(id))
}

/// The card stopped being active (or is being torn down): pause and rewind.
pub fn stop(audio: &mut dyn AudioBackend, id: &SongId) -> PlaybackStatus {
    audio.pause(id);
    audio.rewind(id);
    PlaybackStatus::Stopped
}

/// Explicit click on the waveform of the active card.
///
/// Paused or blocked cards resume (the click counts as user activation);
/// playing cards pause. Silent and stopped cards retry from their position.
pub fn toggle(
    audio: &mut dyn AudioBackend,
    id: &SongId,
    status: PlaybackStatus,
) -> PlaybackStatus {
    match status {
        PlaybackStatus::Playing => {
            audio.pause(id);
            PlaybackStatus::Paused
        }
        PlaybackStatus::Paused
        | PlaybackStatus::AwaitingInteraction
        | PlaybackStatus::Silent
        | PlaybackStatus::Stopped => {
            audio.notify_user_activation();
            outcome(id, audio.play(id))
        }
    }
}
