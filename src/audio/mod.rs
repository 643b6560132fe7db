//! Audio playback seam.
//!
//! The card only needs a controllable play/pause/volume/mute black box per
//! song. [`AudioBackend`] is that box; [`HeadlessAudio`] implements it
//! without a sound device.

mod headless;

pub use headless::HeadlessAudio;

use crate::model::SongId;
use thiserror::Error;
use url::Url;

/// Why a play request did not start playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refuses unsolicited playback until the user interacts.
    ///
    /// Recoverable: the card waits for an explicit click to resume.
    #[error("Playback blocked until the user interacts with the card")]
    AutoplayBlocked,

    /// Any other failure. Logged; the card stays active but silent.
    #[error("Playback failed for {id}: {reason}")]
    Failed {
        /// Song that failed to play.
        id: SongId,
        /// Backend-specific reason.
        reason: String,
    },
}

/// Controllable audio output with one element per song.
///
/// Volume and mute apply to every element, like a shared output bus.
pub trait AudioBackend {
    /// Attach the stream for `id`. Elements loop until paused.
    fn load(&mut self, id: &SongId, stream: Url);

    /// Start or resume playback of `id` from its current position.
    fn play(&mut self, id: &SongId) -> Result<(), PlaybackError>;

    /// Pause `id`, keeping its position.
    fn pause(&mut self, id: &SongId);

    /// Move `id` back to the start.
    fn rewind(&mut self, id: &SongId);

    /// Output level in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);

    /// Silence output without changing the volume.
    fn set_muted(&mut self, muted: bool);

    /// The user interacted with the card; lifts autoplay restrictions.
    fn notify_user_activation(&mut self);

    /// Advance playback clocks by `dt`.
    fn advance(&mut self, _dt: std::time::Duration) {}
}

/// Resolves the stream address for a song.
///
/// Streams are addressed by id only: `{base}/api/audio?id=<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    endpoint: Url,
}

impl AudioSource {
    /// Parse the base address the audio endpoint hangs off.
    ///
    /// The endpoint is resolved under the base path, so a deployment below
    /// a prefix (`http://host/card`) keeps it.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("api/audio")?;
        Ok(Self { endpoint })
    }

    /// Stream address for `id`. The id is percent-encoded.
    pub fn stream_url(&self, id: &SongId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("id", id.as_str());
        url
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording backend for tests.

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// One call made against the backend.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Load(String),
        Play(String),
        Pause(String),
        Rewind(String),
        Volume(f64),
        Muted(bool),
        UserActivation,
    }

    /// Records every call; `play` answers from a scripted table.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingAudio {
        pub calls: Rc<RefCell<Vec<Call>>>,
        pub failures: Rc<RefCell<HashMap<String, PlaybackError>>>,
    }

    impl RecordingAudio {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the next `play` of `id` fail with `error`.
        pub fn fail_next_play(&self, id: &str, error: PlaybackError) {
            self.failures.borrow_mut().insert(id.to_string(), error);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl AudioBackend for RecordingAudio {
        fn load(&mut self, id: &SongId, _stream: Url) {
            self.calls.borrow_mut().push(Call::Load(id.to_string()));
        }

        fn play(&mut self, id: &SongId) -> Result<(), PlaybackError> {
            self.calls.borrow_mut().push(Call::Play(id.to_string()));
            match self.failures.borrow_mut().remove(id.as_str()) {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn pause(&mut self, id: &SongId) {
            self.calls.borrow_mut().push(Call::Pause(id.to_string()));
        }

        fn rewind(&mut self, id: &SongId) {
            self.calls.borrow_mut().push(Call::Rewind(id.to_string()));
        }

        fn set_volume(&mut self, volume: f64) {
            self.calls.borrow_mut().push(Call::Volume(volume));
        }

        fn set_muted(&mut self, muted: bool) {
            self.calls.borrow_mut().push(Call::Muted(muted));
        }

        fn notify_user_activation(&mut self) {
            self.calls.borrow_mut().push(Call::UserActivation);
        }
    }
}
