//! Transitions between two primitive states.
//!
//! Timing is driven by the caller (`advance`) so the same code runs under the egui
//! frame clock and in tests.

use crate::charts::primitive::Interpolate;
use std::time::Duration;

/// Default transition length for updated primitives.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = 2.0 - 2.0 * t;
        1.0 - u * u * u / 2.0
    }
}

/// An in-flight tween from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
}

impl<T: Interpolate> Transition<T> {
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// The value to draw right now.
    pub fn current(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        self.from
            .interpolate(&self.to, ease_cubic_in_out(self.progress()))
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    /// Redirect to a new target, starting from wherever the tween is now.
    pub fn retarget(&mut self, to: T, duration: Duration) {
        self.from = self.current();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Apply an immediate change to both endpoints, so it survives the rest of the tween.
    pub fn pin(&mut self, mut change: impl FnMut(&mut T)) {
        change(&mut self.from);
        change(&mut self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Scalar(f32);

    impl Interpolate for Scalar {
        fn interpolate(&self, to: &Self, t: f32) -> Self {
            Scalar(self.0 + (to.0 - self.0) * t)
        }
    }

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        let (a, b) = (ease_cubic_in_out(0.25), ease_cubic_in_out(0.75));
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!(a < 0.25);
    }

    #[test]
    fn reaches_target_exactly() {
        let mut tween = Transition::new(Scalar(0.0), Scalar(10.0), DEFAULT_DURATION);
        tween.advance(Duration::from_millis(250));
        assert_eq!(tween.current(), Scalar(5.0));
        assert!(!tween.is_finished());

        tween.advance(Duration::from_secs(5));
        assert!(tween.is_finished());
        assert_eq!(tween.current(), Scalar(10.0));
    }

    #[test]
    fn zero_duration_jumps() {
        let tween = Transition::new(Scalar(1.0), Scalar(2.0), Duration::ZERO);
        assert!(tween.is_finished());
        assert_eq!(tween.current(), Scalar(2.0));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut tween = Transition::new(Scalar(0.0), Scalar(10.0), DEFAULT_DURATION);
        tween.advance(Duration::from_millis(250));
        tween.retarget(Scalar(0.0), DEFAULT_DURATION);
        assert_eq!(tween.current(), Scalar(5.0));
        assert_eq!(tween.target(), &Scalar(0.0));
        tween.advance(DEFAULT_DURATION);
        assert_eq!(tween.current(), Scalar(0.0));
    }

    #[test]
    fn pinned_change_holds_for_whole_tween() {
        let mut tween = Transition::new(Scalar(0.0), Scalar(10.0), DEFAULT_DURATION);
        tween.pin(|value| value.0 = 3.0);
        tween.advance(Duration::from_millis(100));
        assert_eq!(tween.current(), Scalar(3.0));
    }
}
