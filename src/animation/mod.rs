//! Time-based animations with easing curves.
//!
//! An [`Animation`] moves an `f64` value from `from` to `to` over a fixed
//! duration, sampling the current time from a shared [`Clock`]. There is no
//! internal timer: hosts advance the clock and poll [`Animation::value`] and
//! [`Animation::is_done`] each frame. Starting a new animation for the same
//! value replaces the old one, so transitions cancel rather than queue.

use std::time::Duration;

use keyframe::functions::{EaseInOutCubic, EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;
use serde::{Deserialize, Serialize};

mod clock;
pub use clock::Clock;

/// Easing curve of an animation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    #[default]
    EaseInOutCubic,
}

impl Curve {
    /// Applies the curve to progress `x` in `[0, 1]`.
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseInOutCubic => EaseInOutCubic.y(x),
        }
    }
}

/// Duration and easing of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    pub duration_ms: u32,
    pub curve: Curve,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            duration_ms: 500,
            curve: Curve::default(),
        }
    }
}

/// An eased transition of a value over time.
#[derive(Debug, Clone)]
pub struct Animation {
    clock: Clock,
    from: f64,
    to: f64,
    duration: Duration,
    start_time: Duration,
    curve: Curve,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, params: AnimationParams) -> Self {
        let start_time = clock.now();
        Self {
            clock,
            from,
            to,
            duration: Duration::from_millis(u64::from(params.duration_ms)),
            start_time,
            curve: params.curve,
        }
    }

    /// Returns the current value.
    pub fn value(&self) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);
        if passed >= self.duration {
            return self.to;
        }

        let x = passed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.curve.y(x)
    }

    /// Returns the final value.
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Returns whether the animation has reached its full duration.
    pub fn is_done(&self) -> bool {
        self.clock.now() >= self.start_time.saturating_add(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn params(duration_ms: u32, curve: Curve) -> AnimationParams {
        AnimationParams { duration_ms, curve }
    }

    #[test]
    fn linear_progress() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 0., 100., params(500, Curve::Linear));

        assert_relative_eq!(anim.value(), 0.);
        assert!(!anim.is_done());

        clock.set_time(Duration::from_millis(250));
        assert_relative_eq!(anim.value(), 50.);

        clock.set_time(Duration::from_millis(500));
        assert_relative_eq!(anim.value(), 100.);
        assert!(anim.is_done());
    }

    #[test]
    fn value_clamps_past_the_end() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 200., 0., params(500, Curve::EaseInOutCubic));

        clock.set_time(Duration::from_secs(10));
        assert_relative_eq!(anim.value(), 0.);
    }

    #[test]
    fn ease_in_out_is_slow_at_the_edges() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 0., 100., params(1000, Curve::EaseInOutCubic));

        clock.set_time(Duration::from_millis(100));
        let early = anim.value();
        clock.set_time(Duration::from_millis(500));
        let middle = anim.value();

        assert!(early < 10., "early progress should lag behind linear");
        assert_relative_eq!(middle, 50., epsilon = 1.);
    }

    #[test]
    fn zero_duration_is_done_immediately() {
        let clock = Clock::with_time(Duration::from_secs(3));
        let anim = Animation::new(
            clock,
            800.,
            42.,
            AnimationParams {
                duration_ms: 0,
                curve: Curve::Linear,
            },
        );
        assert!(anim.is_done());
        assert_relative_eq!(anim.value(), 42.);
    }

    #[test]
    fn curves_map_the_unit_interval() {
        for curve in [
            Curve::Linear,
            Curve::EaseOutQuad,
            Curve::EaseOutCubic,
            Curve::EaseInOutCubic,
        ] {
            assert_relative_eq!(curve.y(0.), 0., epsilon = 1e-6);
            assert_relative_eq!(curve.y(1.), 1., epsilon = 1e-6);
        }
    }
}
