use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::animation::{AnimationTimeline, EasingFunction};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Transition timing for track and panel choreography.
pub struct AnimationOptions {
    /// When false every layout change snaps to its final state.
    #[schemars(title = "Animate")]
    pub enabled: bool,
    /// Length of one choreography phase in milliseconds.
    #[schemars(title = "Transition (ms)", range(min = 0, max = 2000), extend("step" = 10))]
    pub transition_ms: u64,
    /// Easing curve applied to every tween.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            transition_ms: 250,
            easing: EasingFunction::DEFAULT,
        }
    }
}

impl AnimationOptions {
    /// One choreography phase.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// `n` consecutive phases.
    #[must_use]
    pub fn phases(&self, n: u32) -> Duration {
        self.transition() * n
    }

    /// Empty timeline configured with these settings.
    #[must_use]
    pub fn timeline<K>(&self) -> AnimationTimeline<K>
    where
        K: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    {
        AnimationTimeline::new(self.easing, self.enabled)
    }
}
