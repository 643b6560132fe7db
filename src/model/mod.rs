//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod catalog;
pub mod key_action;
pub mod song;

// Re-export for convenience
pub use key_action::KeyAction;
pub use song::{InvalidSongId, Song, SongId};
