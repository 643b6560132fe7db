//! crushplays
//!
//! A terminal greeting card: a swipeable stack of song cards with a
//! volume bar and a rotating footer of compliments.
//!
//! State lives in [`state`] and is pure; [`view`] is the terminal shell;
//! [`audio`] is the playback seam.

pub mod audio;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
