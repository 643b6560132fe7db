//! Ranked card deck.
//!
//! The deck is the stack order of every song. The last index is the top
//! card. Rotations are the only mutation, and each one snapshots the order
//! it replaced so presenters can diff roles across the change.

use crate::model::{Song, SongId};
use std::collections::HashSet;
use thiserror::Error;

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Top card thrown left: bottom card rises to the top.
    Left,
    /// Top card thrown right: bottom card is cycled to the top.
    Right,
}

/// Deck construction failures. Rotations on a built deck cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// A deck needs at least one card for roles to be defined.
    #[error("Deck must contain at least one song")]
    Empty,

    /// Every id may appear only once.
    #[error("Duplicate song id in deck: {0}")]
    DuplicateId(SongId),
}

/// Stack order of all songs, bottom (index 0) to top (index N-1).
///
/// Invariant: `ordered` is always a permutation of the ids the deck was
/// built with, and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDeck {
    ordered: Vec<SongId>,
    previous: Vec<SongId>,
}

impl RankedDeck {
    /// Build a deck from ids in stack order.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] for no ids and [`DeckError::DuplicateId`]
    /// when an id repeats.
    pub fn new(ids: Vec<SongId>) -> Result<Self, DeckError> {
        if ids.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id) {
                return Err(DeckError::DuplicateId(id.clone()));
            }
        }

        Ok(Self {
            previous: ids.clone(),
            ordered: ids,
        })
    }

    /// Build a deck from songs in their loaded order.
    pub fn from_songs(songs: &[Song]) -> Result<Self, DeckError> {
        Self::new(songs.iter().map(|song| song.id.clone()).collect())
    }

    /// Number of cards. Always at least one.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Current stack order, bottom first.
    pub fn ordered_ids(&self) -> &[SongId] {
        &self.ordered
    }

    /// Order immediately before the last rotation.
    ///
    /// Equal to [`ordered_ids`](Self::ordered_ids) until the first rotation.
    pub fn previous_ordered_ids(&self) -> &[SongId] {
        &self.previous
    }

    /// Index of `id` in the current order, `None` for unknown ids.
    ///
    /// Linear scan; decks hold a handful of cards.
    pub fn rank(&self, id: &SongId) -> Option<usize> {
        self.ordered.iter().position(|candidate| candidate == id)
    }

    /// Index of `id` in the order before the last rotation.
    pub fn previous_rank(&self, id: &SongId) -> Option<usize> {
        self.previous.iter().position(|candidate| candidate == id)
    }

    /// The top card.
    pub fn active(&self) -> &SongId {
        // Non-empty by construction.
        &self.ordered[self.ordered.len() - 1]
    }

    /// Move the bottom card to the top: `[a,b,c] → [b,c,a]`.
    pub fn rotate_right(&mut self) {
        self.previous.clone_from(&self.ordered);
        self.ordered.rotate_left(1);
    }

    /// Move the top card to the bottom: `[a,b,c] → [c,a,b]`.
    pub fn rotate_left(&mut self) {
        self.previous.clone_from(&self.ordered);
        self.ordered.rotate_right(1);
    }

    /// Apply a committed swipe.
    pub fn apply(&mut self, direction: SwipeDirection) {
        match direction {
            SwipeDirection::Right => self.rotate_right(),
            SwipeDirection::Left => self.rotate_left(),
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "deck_tests.rs"]
mod tests;
