//! Keyed animation timeline driven by a single tick function.
//!
//! Every animated property (a track's vertical offset, its opacity, the
//! panel height, a PTM bar's count) is a key in the timeline. Callers set a
//! *target* synchronously; the timeline only interpolates the displayed
//! value toward it. Scheduling a new target for a key that is mid-flight
//! restarts from the currently displayed value, so the resting state always
//! equals the most recent target regardless of how calls interleave.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use web_time::Duration;

use super::easing::EasingFunction;
use super::tween::Tween;

/// Timeline of scalar tweens keyed by `K`.
pub struct AnimationTimeline<K> {
    /// Clock time of the last tick.
    now: Duration,
    /// Displayed value per key.
    values: FxHashMap<K, f64>,
    /// In-flight tweens per key.
    tweens: FxHashMap<K, Tween>,
    easing: EasingFunction,
    enabled: bool,
}

impl<K: Copy + Eq + Hash + fmt::Debug> AnimationTimeline<K> {
    /// Empty timeline at clock time zero.
    #[must_use]
    pub fn new(easing: EasingFunction, enabled: bool) -> Self {
        Self {
            now: Duration::ZERO,
            values: FxHashMap::default(),
            tweens: FxHashMap::default(),
            easing,
            enabled,
        }
    }

    /// Clock time of the last tick.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Currently displayed value of a key.
    #[must_use]
    pub fn value(&self, key: K) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Value the key will rest at once its tween (if any) completes.
    #[must_use]
    pub fn target(&self, key: K) -> Option<f64> {
        self.tweens
            .get(&key)
            .map(Tween::target)
            .or_else(|| self.value(key))
    }

    /// Jump a key to `value`, cancelling any in-flight tween.
    pub fn set(&mut self, key: K, value: f64) {
        let _ = self.tweens.remove(&key);
        let _ = self.values.insert(key, value);
    }

    /// Tween a key from its displayed value to `target`.
    ///
    /// The tween starts `delay` after the current clock time. A key with no
    /// displayed value yet, or a disabled timeline, jumps straight to the
    /// target. Any tween already running for the key is replaced.
    pub fn animate(
        &mut self,
        key: K,
        target: f64,
        delay: Duration,
        duration: Duration,
    ) {
        let Some(current) = self.value(key) else {
            self.set(key, target);
            return;
        };
        if !self.enabled {
            self.set(key, target);
            return;
        }
        let tween =
            Tween::new(current, target, self.now + delay, duration, self.easing);
        if tween.is_done(self.now) {
            self.set(key, target);
            return;
        }
        log::trace!("animate {key:?}: {current} -> {target}");
        let _ = self.tweens.insert(key, tween);
    }

    /// Advance the clock to `now` and update every displayed value.
    ///
    /// The clock never runs backwards; an earlier `now` is ignored.
    /// Returns `true` while any tween is still running.
    pub fn tick(&mut self, now: Duration) -> bool {
        if now > self.now {
            self.now = now;
        }
        let now = self.now;
        let mut finished = Vec::new();
        for (key, tween) in &self.tweens {
            let _ = self.values.insert(*key, tween.value_at(now));
            if tween.is_done(now) {
                finished.push(*key);
            }
        }
        for key in finished {
            let _ = self.tweens.remove(&key);
        }
        !self.tweens.is_empty()
    }

    /// Whether no tween is running.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Clock time at which every scheduled tween will have completed.
    #[must_use]
    pub fn settle_time(&self) -> Duration {
        self.tweens
            .values()
            .map(Tween::end)
            .fold(self.now, Duration::max)
    }

    /// Run the clock forward until all tweens are complete.
    pub fn finish(&mut self) {
        let end = self.settle_time();
        let _ = self.tick(end);
    }
}

impl<K> fmt::Debug for AnimationTimeline<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationTimeline")
            .field("now", &self.now)
            .field("keys", &self.values.len())
            .field("active", &self.tweens.len())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn timeline() -> AnimationTimeline<u8> {
        AnimationTimeline::new(EasingFunction::Linear, true)
    }

    #[test]
    fn first_animate_jumps_to_target() {
        let mut tl = timeline();
        tl.animate(1, 40.0, ms(0), ms(250));
        assert_eq!(tl.value(1), Some(40.0));
        assert!(tl.is_idle());
    }

    #[test]
    fn delayed_tween_interpolates_after_delay() {
        let mut tl = timeline();
        tl.set(1, 0.0);
        tl.animate(1, 100.0, ms(250), ms(250));
        assert!(tl.tick(ms(200)));
        assert_eq!(tl.value(1), Some(0.0));
        assert!(tl.tick(ms(375)));
        assert!((tl.value(1).unwrap_or_default() - 50.0).abs() < 1e-9);
        assert!(!tl.tick(ms(500)));
        assert_eq!(tl.value(1), Some(100.0));
    }

    #[test]
    fn retarget_mid_flight_restarts_from_displayed_value() {
        let mut tl = timeline();
        tl.set(1, 0.0);
        tl.animate(1, 100.0, ms(0), ms(100));
        let _ = tl.tick(ms(50));
        tl.animate(1, 0.0, ms(0), ms(100));
        assert_eq!(tl.target(1), Some(0.0));
        let _ = tl.tick(ms(100));
        assert!((tl.value(1).unwrap_or_default() - 25.0).abs() < 1e-9);
        tl.finish();
        assert_eq!(tl.value(1), Some(0.0));
        assert!(tl.is_idle());
    }

    #[test]
    fn disabled_timeline_snaps() {
        let mut tl = AnimationTimeline::new(EasingFunction::Linear, false);
        tl.set(7u8, 1.0);
        tl.animate(7, 9.0, ms(500), ms(250));
        assert_eq!(tl.value(7), Some(9.0));
        assert!(tl.is_idle());
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut tl = timeline();
        let _ = tl.tick(ms(300));
        let _ = tl.tick(ms(100));
        assert_eq!(tl.now(), ms(300));
        tl.set(2, 0.0);
        tl.animate(2, 1.0, ms(0), ms(100));
        assert_eq!(tl.settle_time(), ms(400));
        let _ = tl.tick(ms(400));
        assert_eq!(tl.value(2), Some(1.0));
    }
}
