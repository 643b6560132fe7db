//! Volume level and mute state.
//!
//! The level is always inside `[0, 1]`. Out-of-range input is clamped,
//! never rejected.

/// Level change per arrow key press.
pub const KEY_STEP: f64 = 0.05;

/// Icon shown under the volume track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    /// Muted.
    Off,
    /// Unmuted at level zero.
    Silent,
    /// Below half.
    Low,
    /// Half or above.
    High,
}

/// Clamp to `[0, 1]`. `None` for NaN.
fn clamp_unit(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(0.0, 1.0))
    }
}

/// Round to two decimals.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Anchor recorded when a vertical drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    start_y: f64,
    level_at_start: f64,
}

/// Volume level with a mute toggle that remembers the level it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeControl {
    level: f64,
    muted: bool,
    previous_level: f64,
    drag: Option<DragAnchor>,
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(0.5, true)
    }
}

impl VolumeControl {
    /// Start at `level` (clamped) with the given mute state.
    pub fn new(level: f64, muted: bool) -> Self {
        let level = clamp_unit(level).unwrap_or(0.0);
        Self {
            level,
            muted,
            previous_level: level,
            drag: None,
        }
    }

    /// Current level in `[0, 1]`.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Whether output is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Last level seen while unmuted. Restored by unmuting.
    pub fn previous_level(&self) -> f64 {
        self.previous_level
    }

    /// Whether a vertical drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Set the level, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_level(&mut self, value: f64) {
        if let Some(level) = clamp_unit(value) {
            self.level = level;
            self.track_previous();
        }
    }

    /// Arrow up.
    pub fn step_up(&mut self) {
        self.set_level((self.level + KEY_STEP).min(1.0));
    }

    /// Arrow down.
    pub fn step_down(&mut self) {
        self.set_level((self.level - KEY_STEP).max(0.0));
    }

    /// Click on the volume icon.
    ///
    /// Muting caches the level and drops it to zero; unmuting restores the
    /// cached level.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.level = self.previous_level;
            self.muted = false;
        } else {
            self.previous_level = self.level;
            self.level = 0.0;
            self.muted = true;
        }
        self.track_previous();
    }

    /// Record the pointer row and level at the start of a vertical drag.
    pub fn begin_drag(&mut self, pointer_y: f64) {
        self.drag = Some(DragAnchor {
            start_y: pointer_y,
            level_at_start: self.level,
        });
    }

    /// One vertical drag sample. Dragging up raises the level.
    ///
    /// Any movement unmutes. Ignored without a prior
    /// [`begin_drag`](Self::begin_drag) or with a non-positive track height.
    pub fn drag_to(&mut self, pointer_y: f64, track_height: f64) {
        let Some(anchor) = self.drag else {
            return;
        };
        if track_height <= 0.0 || track_height.is_nan() {
            return;
        }

        self.muted = false;
        let delta = (pointer_y - anchor.start_y) / track_height;
        let raw = anchor.level_at_start - delta;
        if let Some(level) = clamp_unit(raw) {
            self.set_level(round_hundredths(level));
        }
    }

    /// Finish a vertical drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Icon for the current state.
    pub fn icon(&self) -> VolumeIcon {
        if self.muted {
            VolumeIcon::Off
        } else if self.level == 0.0 {
            VolumeIcon::Silent
        } else if self.level < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }

    fn track_previous(&mut self) {
        if !self.muted {
            self.previous_level = self.level;
        }
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
