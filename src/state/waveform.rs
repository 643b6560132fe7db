//! Animated waveform bars shown on each card.
//!
//! Each bar ping-pongs through a short list of random keyframe heights.
//! Heights are in the same abstract units as the bar glyphs (0..=12).

use rand::Rng;
use std::time::Duration;

/// Bars per waveform.
pub const BAR_COUNT: usize = 6;

/// Keyframes per bar.
pub const KEYFRAME_COUNT: usize = 6;

/// Keyframe height bounds.
pub const MIN_HEIGHT: u8 = 3;
/// Keyframe height bounds.
pub const MAX_HEIGHT: u8 = 12;

/// Height of every bar on an inactive card.
pub const STATIC_HEIGHT: f64 = 2.0;

/// Height of the two middle bars when forming the pause glyph.
pub const PAUSE_HEIGHT: f64 = 11.0;

/// Per-bar cycle duration bounds, in milliseconds.
const DURATION_MIN_MS: u64 = 1_800;
const DURATION_MAX_MS: u64 = 2_300;

/// Random values in `[min, max]` with no two neighbours equal.
fn varied_sequence<R, T>(rng: &mut R, len: usize, min: T, max: T) -> Vec<T>
where
    R: Rng + ?Sized,
    T: rand::distr::uniform::SampleUniform + PartialOrd + PartialEq + Copy,
{
    let mut values: Vec<T> = Vec::with_capacity(len);
    for _ in 0..len {
        let mut value = rng.random_range(min..=max);
        if min < max {
            while values.last() == Some(&value) {
                value = rng.random_range(min..=max);
            }
        }
        values.push(value);
    }
    values
}

/// Keyframes and cycle time of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarAnimation {
    keyframes: Vec<u8>,
    duration: Duration,
}

impl BarAnimation {
    /// Build from explicit keyframes. An empty list behaves as a flat bar.
    pub fn new(keyframes: Vec<u8>, duration: Duration) -> Self {
        Self {
            keyframes,
            duration,
        }
    }

    /// Keyframe heights.
    pub fn keyframes(&self) -> &[u8] {
        &self.keyframes
    }

    /// Time to sweep the keyframes once in one direction.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Height at `elapsed` since the animation started.
    ///
    /// Plays forward, then backward, forever, easing in and out of every
    /// keyframe.
    pub fn height_at(&self, elapsed: Duration) -> f64 {
        match self.keyframes.as_slice() {
            [] => STATIC_HEIGHT,
            [only] => f64::from(*only),
            frames => {
                let period = self.duration.as_secs_f64();
                if period <= 0.0 {
                    return f64::from(frames[0]);
                }
                let cycles = elapsed.as_secs_f64() / period;
                let sweep = cycles.floor() as u64;
                let mut t = cycles.fract();
                if sweep % 2 == 1 {
                    t = 1.0 - t;
                }

                let segments = (frames.len() - 1) as f64;
                let position = t * segments;
                let index = (position.floor() as usize).min(frames.len() - 2);
                let local = ease_in_out(position - index as f64);
                let from = f64::from(frames[index]);
                let to = f64::from(frames[index + 1]);
                from + (to - from) * local
            }
        }
    }
}

/// Smoothstep approximation of the CSS ease-in-out curve.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Generate `count` bar animations with distinct neighbouring cycle times.
pub fn generate_animations<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<BarAnimation> {
    let durations = varied_sequence(rng, count, DURATION_MIN_MS, DURATION_MAX_MS);
    durations
        .into_iter()
        .map(|ms| {
            BarAnimation::new(
                varied_sequence(rng, KEYFRAME_COUNT, MIN_HEIGHT, MAX_HEIGHT),
                Duration::from_millis(ms),
            )
        })
        .collect()
}

/// What the waveform button currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformMode {
    /// Card is not on top: flat bars.
    Static,
    /// Hovered or paused: a two-bar pause glyph.
    PauseGlyph,
    /// Playing: bars follow their animations.
    Animated,
}

/// Pick the mode for a card.
pub fn waveform_mode(active: bool, paused: bool, hovering: bool) -> WaveformMode {
    if !active {
        WaveformMode::Static
    } else if paused || hovering {
        WaveformMode::PauseGlyph
    } else {
        WaveformMode::Animated
    }
}

/// Bar heights for a frame. `None` hides a bar.
pub fn bar_heights(
    mode: WaveformMode,
    animations: &[BarAnimation],
    elapsed: Duration,
) -> [Option<f64>; BAR_COUNT] {
    match mode {
        WaveformMode::Static => [Some(STATIC_HEIGHT); BAR_COUNT],
        WaveformMode::PauseGlyph => [
            None,
            None,
            Some(PAUSE_HEIGHT),
            Some(PAUSE_HEIGHT),
            None,
            None,
        ],
        WaveformMode::Animated => std::array::from_fn(|i| {
            Some(
                animations
                    .get(i)
                    .map_or(STATIC_HEIGHT, |animation| animation.height_at(elapsed)),
            )
        }),
    }
}
