//! Scalar tweens
//!
//! A `Tween` carries one float (here: a container's top inset, or an arrow
//! angle) from a start value to a target over a fixed duration with an
//! easing curve. Stepped with a frame delta by whoever owns the render loop.

use std::time::Duration;

use crate::easing::Easing;

/// How a requested transition should run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl Default for TransitionSpec {
    /// The standard inset transition: 250 ms, ease-in-out
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(250),
            easing: Easing::EaseInOut,
        }
    }
}

/// A float interpolation in flight
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    spec: TransitionSpec,
    elapsed: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, spec: TransitionSpec) -> Self {
        Self {
            from,
            to,
            spec,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by a frame delta and return the new value
    pub fn step(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.value()
    }

    /// Current value at the elapsed time
    pub fn value(&self) -> f32 {
        if self.is_settled() {
            return self.to;
        }
        let progress = self.elapsed.as_secs_f32() / self.spec.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.spec.easing.apply(progress)
    }

    /// Final value this tween is heading toward
    pub fn target(&self) -> f32 {
        self.to
    }

    /// True once the full duration has elapsed (or the duration was zero)
    pub fn is_settled(&self) -> bool {
        self.elapsed >= self.spec.duration
    }
}
