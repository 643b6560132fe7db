//! Device-free audio backend.
//!
//! Keeps element state (position, playing, looping) per song and enforces
//! a browser-style autoplay policy: audible playback is refused until the
//! user has interacted, unless autoplay is allowed. Muted playback is
//! always allowed.

use super::{AudioBackend, PlaybackError};
use crate::model::SongId;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Simulated track length used for looping.
const TRACK_LENGTH: Duration = Duration::from_secs(180);

#[derive(Debug, Clone)]
struct Element {
    stream: Url,
    playing: bool,
    position: Duration,
}

/// Audio backend without an output device.
#[derive(Debug, Clone)]
pub struct HeadlessAudio {
    elements: HashMap<SongId, Element>,
    volume: f64,
    muted: bool,
    autoplay_allowed: bool,
    user_activated: bool,
}

impl HeadlessAudio {
    /// New backend. With `autoplay_allowed` false, audible playback waits
    /// for [`notify_user_activation`](AudioBackend::notify_user_activation).
    pub fn new(autoplay_allowed: bool) -> Self {
        Self {
            elements: HashMap::new(),
            volume: 1.0,
            muted: false,
            autoplay_allowed,
            user_activated: false,
        }
    }

    /// Whether `id` is currently playing.
    pub fn is_playing(&self, id: &SongId) -> bool {
        self.elements.get(id).is_some_and(|e| e.playing)
    }

    /// Playback position of `id`.
    pub fn position(&self, id: &SongId) -> Option<Duration> {
        self.elements.get(id).map(|e| e.position)
    }

    /// Stream address loaded for `id`.
    pub fn stream(&self, id: &SongId) -> Option<&Url> {
        self.elements.get(id).map(|e| &e.stream)
    }

    /// Current output volume.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Current mute state.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn playback_permitted(&self) -> bool {
        self.autoplay_allowed || self.user_activated || self.muted
    }
}

impl AudioBackend for HeadlessAudio {
    fn load(&mut self, id: &SongId, stream: Url) {
        debug!(%id, %stream, "Loading audio element");
        self.elements.insert(
            id.clone(),
            Element {
                stream,
                playing: false,
                position: Duration::ZERO,
            },
        );
    }

    fn play(&mut self, id: &SongId) -> Result<(), PlaybackError> {
        let permitted = self.playback_permitted();
        let Some(element) = self.elements.get_mut(id) else {
            return Err(PlaybackError::Failed {
                id: id.clone(),
                reason: "no audio element loaded".to_string(),
            });
        };
        if !permitted {
            return Err(PlaybackError::AutoplayBlocked);
        }
        element.playing = true;
        Ok(())
    }

    fn pause(&mut self, id: &SongId) {
        if let Some(element) = self.elements.get_mut(id) {
            element.playing = false;
        }
    }

    fn rewind(&mut self, id: &SongId) {
        if let Some(element) = self.elements.get_mut(id) {
            element.position = Duration::ZERO;
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn notify_user_activation(&mut self) {
        if !self.user_activated {
            debug!("User activation received, autoplay unlocked");
        }
        self.user_activated = true;
    }

    fn advance(&mut self, dt: Duration) {
        for (id, element) in self.elements.iter_mut().filter(|(_, e)| e.playing) {
            let nanos = (element.position + dt).as_nanos() % TRACK_LENGTH.as_nanos();
            element.position = Duration::from_nanos(nanos as u64);
            trace!(%id, position = ?element.position, "Advanced playback");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(autoplay: bool) -> (HeadlessAudio, SongId) {
        let mut audio = HeadlessAudio::new(autoplay);
        let id = SongId::new("gulabo").unwrap();
        let url = Url::parse("http://localhost:3000/api/audio?id=gulabo").unwrap();
        audio.load(&id, url);
        (audio, id)
    }

    #[test]
    fn audible_play_is_blocked_before_interaction() {
        let (mut audio, id) = loaded(false);
        assert_eq!(audio.play(&id), Err(PlaybackError::AutoplayBlocked));
        assert!(!audio.is_playing(&id));
    }

    #[test]
    fn muted_play_is_always_allowed() {
        let (mut audio, id) = loaded(false);
        audio.set_muted(true);
        assert_eq!(audio.play(&id), Ok(()));
        assert!(audio.is_playing(&id));
    }

    #[test]
    fn user_activation_unlocks_playback() {
        let (mut audio, id) = loaded(false);
        audio.notify_user_activation();
        assert_eq!(audio.play(&id), Ok(()));
    }

    #[test]
    fn autoplay_allowed_plays_immediately() {
        let (mut audio, id) = loaded(true);
        assert_eq!(audio.play(&id), Ok(()));
    }

    #[test]
    fn unknown_song_fails() {
        let mut audio = HeadlessAudio::new(true);
        let id = SongId::new("missing").unwrap();
        assert!(matches!(
            audio.play(&id),
            Err(PlaybackError::Failed { .. })
        ));
    }

    #[test]
    fn advance_moves_only_playing_elements_and_rewind_resets() {
        let (mut audio, id) = loaded(true);
        audio.advance(Duration::from_secs(1));
        assert_eq!(audio.position(&id), Some(Duration::ZERO));

        audio.play(&id).unwrap();
        audio.advance(Duration::from_secs(2));
        assert_eq!(audio.position(&id), Some(Duration::from_secs(2)));

        audio.pause(&id);
        audio.rewind(&id);
        assert_eq!(audio.position(&id), Some(Duration::ZERO));
        assert!(!audio.is_playing(&id));
    }

    #[test]
    fn playback_loops_at_track_end() {
        let (mut audio, id) = loaded(true);
        audio.play(&id).unwrap();
        audio.advance(TRACK_LENGTH + Duration::from_secs(5));
        assert_eq!(audio.position(&id), Some(Duration::from_secs(5)));
    }

    #[test]
    fn volume_is_clamped() {
        let mut audio = HeadlessAudio::new(true);
        audio.set_volume(4.0);
        assert_eq!(audio.volume(), 1.0);
    }
}
