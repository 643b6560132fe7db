//! Song identifiers and song metadata.
//!
//! Identifiers validate non-empty strings at construction time.

use std::fmt;

/// Unique identifier for a song in the deck.
///
/// Also the only key used to resolve the song's audio stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongId(String);

impl SongId {
    /// Smart constructor: rejects empty and whitespace-only ids.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSongId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidSongId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a song id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSongId {
    /// The id was empty or only whitespace.
    #[error("Song ID cannot be empty")]
    Empty,
}

/// A single song card. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Unique id, also used to address the audio stream.
    pub id: SongId,
    /// Display title (may be longer than the card and scroll).
    pub title: String,
    /// Display artist line.
    pub artist: String,
    /// Opaque cover image reference. Never fetched or decoded here.
    pub image_ref: String,
}

impl Song {
    /// Build a song, validating its id.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Result<Self, InvalidSongId> {
        Ok(Self {
            id: SongId::new(id)?,
            title: title.into(),
            artist: artist.into(),
            image_ref: image_ref.into(),
        })
    }
}
