// animation/tween.rs - Single-value tweens sampled by elapsed frame time

use std::time::Duration;

use super::{lerp, Vec3};

// ============================================================================
// EASING FUNCTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic ease in/out: `2p²` below the midpoint, `1 − 2(1−p)²` above
    QuadInOut,
}

impl Easing {
    /// Apply easing function to normalized time value
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let rest = 1.0 - t;
                    1.0 - 2.0 * rest * rest
                }
            }
        }
    }
}

// ============================================================================
// INTERPOLATABLE TRAIT
// ============================================================================

/// Trait for types that can be interpolated
pub trait Interpolate: Clone {
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        lerp(*self, *other, t as f32)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(*other, t as f32)
    }
}

// ============================================================================
// TWEEN IMPLEMENTATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    Playing,
    Finished,
}

/// Generic tween for any interpolatable type
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    start: T,
    end: T,
    current: T,
    duration: Duration,
    elapsed: Duration,
    overflow: Duration,
    easing: Easing,
    state: TweenState,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(start: T, end: T, duration: Duration) -> Self {
        Self {
            start: start.clone(),
            end,
            current: start,
            duration,
            elapsed: Duration::ZERO,
            overflow: Duration::ZERO,
            easing: Easing::Linear,
            state: TweenState::Playing,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Linear time progress in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Time that the last update ran past the end of the tween
    pub fn overflow(&self) -> Duration {
        self.overflow
    }

    /// Jump straight to the end value
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
        self.current = self.end.clone();
        self.state = TweenState::Finished;
    }

    /// Update tween and return true if still active
    pub fn update(&mut self, dt: Duration) -> bool {
        if self.state == TweenState::Finished {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.overflow = self.elapsed - self.duration;
            self.finish();
            return false;
        }

        let t = self.easing.apply(self.progress());
        self.current = self.start.interpolate(&self.end, t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_functions() {
        for easing in [Easing::Linear, Easing::QuadInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(0.5), 0.5);
        }
        assert_eq!(Easing::QuadInOut.apply(0.25), 0.125);
        assert_eq!(Easing::QuadInOut.apply(0.75), 0.875);
    }

    #[test]
    fn test_tween_update() {
        let mut tween = Tween::new(0.0f32, 100.0, Duration::from_millis(100));

        assert!(tween.update(Duration::from_millis(50)));
        assert!((tween.current() - 50.0).abs() < 1e-4);

        assert!(!tween.update(Duration::from_millis(50)));
        assert_eq!(tween.state(), TweenState::Finished);
        assert_eq!(*tween.current(), 100.0);
        assert_eq!(tween.overflow(), Duration::ZERO);
    }

    #[test]
    fn test_tween_overflow_and_exact_end() {
        let mut tween = Tween::new(1.5f32, 3.0, Duration::from_millis(250));
        assert!(!tween.update(Duration::from_millis(300)));
        assert_eq!(*tween.current(), 3.0);
        assert_eq!(tween.overflow(), Duration::from_millis(50));
        assert!(!tween.update(Duration::from_millis(10)));
    }

    #[test]
    fn test_vec3_interpolation() {
        let end = Vec3::new(10.0, 20.0, 30.0);
        let mut tween = Tween::new(Vec3::zero(), end, Duration::from_millis(100));

        tween.update(Duration::from_millis(50));
        let current = *tween.current();
        assert!((current.x - 5.0).abs() < 0.1);
        assert!((current.y - 10.0).abs() < 0.1);
        assert!((current.z - 15.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_update() {
        let mut tween = Tween::new(0.0f32, 1.0, Duration::ZERO);
        assert_eq!(tween.progress(), 1.0);
        assert!(!tween.update(Duration::ZERO));
        assert_eq!(*tween.current(), 1.0);
    }
}
