//! Per-card presentation derived from rank.
//!
//! Roles are never stored. They are recomputed from `(rank, total)` so they
//! cannot drift from the deck order.

use super::gesture::Lean;
use super::spring::{Spring, SpringParams};
use std::time::Duration;

/// Horizontal nudge applied to the card that anticipates the lean.
pub const NUDGE_OFFSET_PX: f64 = 50.0;

/// Tilt applied together with the nudge, in degrees.
pub const NUDGE_ROTATION_DEG: f64 = 5.0;

/// Roles of one card, all derived from its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardRoles {
    /// Top of the stack (`rank == N-1`). Plays audio.
    pub active: bool,
    /// Directly under the top (`rank == N-2`).
    pub next: bool,
    /// Bottom of the stack (`rank == 0`).
    pub last: bool,
}

/// Derive roles for `rank` in a deck of `total` cards.
///
/// With one card, that card is both active and last.
pub fn roles(rank: usize, total: usize) -> CardRoles {
    if total == 0 || rank >= total {
        return CardRoles::default();
    }
    CardRoles {
        active: rank == total - 1,
        next: total >= 2 && rank == total - 2,
        last: rank == 0,
    }
}

/// Stacking order. Higher ranks draw above lower ones.
pub fn z_index(rank: usize) -> usize {
    rank
}

/// Change in the active role between two orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTransition {
    /// Became the top card: start playback from the beginning.
    Activated,
    /// Stopped being the top card: pause and rewind.
    Deactivated,
    /// Role unchanged.
    Unchanged,
}

/// Compare the active role at `previous_rank` and `rank`.
pub fn active_transition(
    previous_rank: Option<usize>,
    rank: Option<usize>,
    total: usize,
) -> ActiveTransition {
    let was = previous_rank.is_some_and(|r| roles(r, total).active);
    let is = rank.is_some_and(|r| roles(r, total).active);
    match (was, is) {
        (false, true) => ActiveTransition::Activated,
        (true, false) => ActiveTransition::Deactivated,
        _ => ActiveTransition::Unchanged,
    }
}

/// Horizontal offset and tilt of a card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardPose {
    /// Horizontal offset in pixel units.
    pub x: f64,
    /// Tilt in degrees, positive clockwise.
    pub rotation: f64,
}

impl CardPose {
    /// Resting pose.
    pub const NEUTRAL: Self = Self {
        x: 0.0,
        rotation: 0.0,
    };
}

/// Pose a card should move toward, or `None` to hold where it is.
///
/// `dragging` refers to this card being under the pointer (or inside its
/// release grace period), not to any drag anywhere.
pub fn target_pose(roles: CardRoles, lean: Lean, dragging: bool) -> Option<CardPose> {
    if roles.last && lean == Lean::Right {
        return Some(CardPose {
            x: -NUDGE_OFFSET_PX,
            rotation: -NUDGE_ROTATION_DEG,
        });
    }
    if roles.next && lean == Lean::Left {
        return Some(CardPose {
            x: NUDGE_OFFSET_PX,
            rotation: NUDGE_ROTATION_DEG,
        });
    }
    if !dragging && lean == Lean::None {
        return Some(CardPose::NEUTRAL);
    }
    None
}

/// Animated pose of one card.
#[derive(Debug, Clone)]
pub struct CardPresenter {
    x: Spring,
    rotation: Spring,
}

impl Default for CardPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl CardPresenter {
    /// A presenter resting at the neutral pose.
    pub fn new() -> Self {
        Self {
            x: Spring::new(0.0, SpringParams::GENTLE),
            rotation: Spring::new(0.0, SpringParams::GENTLE),
        }
    }

    /// Re-derive the pose target after a rank, lean or drag change.
    pub fn update(&mut self, roles: CardRoles, lean: Lean, dragging: bool) {
        if let Some(pose) = target_pose(roles, lean, dragging) {
            self.x.animate_to(pose.x);
            self.rotation.animate_to(pose.rotation);
        }
    }

    /// Advance the pose animation.
    pub fn tick(&mut self, dt: Duration) {
        self.x.step(dt);
        self.rotation.step(dt);
    }

    /// Current animated pose.
    pub fn pose(&self) -> CardPose {
        CardPose {
            x: self.x.value(),
            rotation: self.rotation.value(),
        }
    }

    /// Pose the card is easing toward.
    pub fn target(&self) -> CardPose {
        CardPose {
            x: self.x.target(),
            rotation: self.rotation.target(),
        }
    }
}
