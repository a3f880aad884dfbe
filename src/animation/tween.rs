//! A single scalar interpolation scheduled on the animation clock.

use web_time::Duration;

use super::easing::EasingFunction;

/// Interpolates one value from `from` to `to`, starting at an absolute
/// clock time and lasting `duration`.
///
/// Before `start` the tween holds `from`; after `start + duration` it holds
/// `to`. Nothing here depends on wall-clock time, so tests drive it with
/// synthetic timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    easing: EasingFunction,
}

impl Tween {
    /// Tween scheduled to begin at `start`.
    #[must_use]
    pub fn new(
        from: f64,
        to: f64,
        start: Duration,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Normalized progress (0.0 to 1.0) at clock time `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if now <= self.start {
            return if self.duration.is_zero() && now == self.start {
                1.0
            } else {
                0.0
            };
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now - self.start;
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at clock time `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.evaluate(t)
    }

    /// Whether the tween has reached its target at `now`.
    #[must_use]
    pub fn is_done(&self, now: Duration) -> bool {
        now >= self.end()
    }

    /// Clock time at which the tween reaches its target.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }

    /// Final value.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }
}
