//! Horizontal drag interpretation for the top card.
//!
//! Offsets are in pixel-equivalent units. The view converts terminal
//! columns before calling in, so the thresholds here match a pointer UI.

use super::deck::SwipeDirection;
use super::spring::{Spring, SpringParams};
use std::time::{Duration, Instant};
use tracing::debug;

/// Offset beyond which a drag leans, and a release commits a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 100.0;

/// How long the dragging flag outlives the release, so the snap-back
/// animation finishes before the card's layout is recomputed.
pub const DRAG_RELEASE_GRACE: Duration = Duration::from_millis(500);

/// Offset at which the dragged card reaches its maximum tilt.
pub const DRAG_ROTATION_RANGE_PX: f64 = 200.0;

/// Maximum tilt of the dragged card in degrees.
pub const MAX_DRAG_ROTATION_DEG: f64 = 5.0;

/// Provisional direction of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lean {
    /// Within the threshold (or not dragging).
    #[default]
    None,
    /// Past the threshold to the left.
    Left,
    /// Past the threshold to the right.
    Right,
}

/// Classify a horizontal offset. Exactly ±100 is still `None`.
pub fn classify_lean(offset: f64) -> Lean {
    if offset > SWIPE_THRESHOLD_PX {
        Lean::Right
    } else if offset < -SWIPE_THRESHOLD_PX {
        Lean::Left
    } else {
        Lean::None
    }
}

/// Decide whether a release at `offset` commits a swipe.
pub fn classify_release(offset: f64) -> Option<SwipeDirection> {
    match classify_lean(offset) {
        Lean::Right => Some(SwipeDirection::Right),
        Lean::Left => Some(SwipeDirection::Left),
        Lean::None => None,
    }
}

/// Tilt of the dragged card: linear over ±200, clamped to ±5 degrees.
pub fn drag_rotation(offset: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    (offset / DRAG_ROTATION_RANGE_PX * MAX_DRAG_ROTATION_DEG)
        .clamp(-MAX_DRAG_ROTATION_DEG, MAX_DRAG_ROTATION_DEG)
}

/// Pointer phase.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { origin_x: f64, moved: bool },
}

/// Drag state machine: `Idle → Pressed → Idle`.
///
/// Owns the live lean, the visual offset of the dragged card, and the
/// dragging flag (which lags the pointer by [`DRAG_RELEASE_GRACE`]).
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    phase: Phase,
    lean: Lean,
    dragging: bool,
    release_deadline: Option<Instant>,
    offset: Spring,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureInterpreter {
    /// An idle interpreter with no offset.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            lean: Lean::None,
            dragging: false,
            release_deadline: None,
            offset: Spring::new(0.0, SpringParams::SNAP_BACK),
        }
    }

    /// Current lean.
    pub fn lean(&self) -> Lean {
        self.lean
    }

    /// True while the pointer is down and for the grace period after release.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True only while the pointer is held.
    pub fn is_pointer_held(&self) -> bool {
        matches!(self.phase, Phase::Pressed { .. })
    }

    /// Visual offset of the dragged card.
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    /// Tilt of the dragged card for the current offset.
    pub fn rotation(&self) -> f64 {
        drag_rotation(self.offset.value())
    }

    /// Pointer pressed on the card at `pointer_x`.
    pub fn press(&mut self, pointer_x: f64) {
        self.phase = Phase::Pressed {
            origin_x: pointer_x,
            moved: false,
        };
    }

    /// Pointer moved to `pointer_x`. Ignored unless pressed first.
    pub fn pointer_move(&mut self, pointer_x: f64) -> Option<Lean> {
        match self.phase {
            Phase::Pressed { origin_x, .. } => {
                self.phase = Phase::Pressed {
                    origin_x,
                    moved: true,
                };
                Some(self.drag_move(pointer_x - origin_x))
            }
            Phase::Idle => None,
        }
    }

    /// Pointer released at `pointer_x`. Ignored unless pressed first.
    ///
    /// A press without movement is a click: it leaves the offset, the
    /// spring and any pending grace timer from an earlier release alone.
    pub fn pointer_release(&mut self, pointer_x: f64, now: Instant) -> Option<SwipeDirection> {
        match self.phase {
            Phase::Pressed {
                origin_x,
                moved: true,
            } => self.drag_end(pointer_x - origin_x, now),
            Phase::Pressed { moved: false, .. } => {
                self.phase = Phase::Idle;
                None
            }
            Phase::Idle => None,
        }
    }

    /// One drag sample at horizontal `offset` from the press point.
    pub fn drag_move(&mut self, offset: f64) -> Lean {
        self.dragging = true;
        self.release_deadline = None;
        self.offset.snap(offset);

        let lean = classify_lean(offset);
        if lean != self.lean {
            debug!(offset, ?lean, "Drag lean changed");
        }
        self.lean = lean;
        lean
    }

    /// Drag released at `offset`. Returns the committed swipe, if any.
    ///
    /// Lean resets immediately, the offset starts springing back to zero,
    /// and the dragging flag clears once the grace delay has passed.
    pub fn drag_end(&mut self, offset: f64, now: Instant) -> Option<SwipeDirection> {
        self.phase = Phase::Idle;
        self.release_deadline = Some(now + DRAG_RELEASE_GRACE);
        self.offset.snap(offset);
        self.offset.animate_to(0.0);
        self.lean = Lean::None;

        let swipe = classify_release(offset);
        debug!(offset, ?swipe, "Drag released");
        swipe
    }

    /// Advance the snap-back animation and expire the grace timer.
    pub fn tick(&mut self, now: Instant, dt: Duration) {
        self.offset.step(dt);
        if let Some(deadline) = self.release_deadline {
            if now >= deadline {
                self.dragging = false;
                self.release_deadline = None;
            }
        }
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
