//! Damped spring used for every eased value on screen.
//!
//! Integrates `x'' = -k(x - target) - c·x'` with unit mass using fixed
//! semi-implicit Euler substeps, so results do not depend on frame rate.

use std::time::Duration;

/// Largest integration step in seconds.
const MAX_SUBSTEP_SECS: f64 = 1.0 / 240.0;

/// Below both thresholds the spring snaps onto its target.
const REST_DISTANCE: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

/// Spring constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Restoring force per unit of displacement.
    pub stiffness: f64,
    /// Velocity damping coefficient.
    pub damping: f64,
}

impl SpringParams {
    /// Stiff, nearly critically damped. Used to return a released card.
    pub const SNAP_BACK: Self = Self {
        stiffness: 300.0,
        damping: 30.0,
    };

    /// Softer spring with a visible overshoot. Used for card nudges.
    pub const GENTLE: Self = Self {
        stiffness: 100.0,
        damping: 10.0,
    };
}

/// A scalar animated toward a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
}

impl Spring {
    /// A spring at rest on `value`.
    pub fn new(value: f64, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value the spring is heading toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// True once the value sits on the target with no velocity.
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Jump to `value` immediately and stop there (direct manipulation).
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Start easing toward `target`, keeping the current velocity.
    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance the simulation by `dt`.
    pub fn step(&mut self, dt: Duration) {
        if self.is_settled() {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP_SECS);
            let force = -self.params.stiffness * (self.value - self.target)
                - self.params.damping * self.velocity;
            self.velocity += force * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_SPEED {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}
