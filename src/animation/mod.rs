//! Animation system for smooth layout transitions.
//!
//! Layout targets are always computed synchronously; this module only
//! interpolates what is *displayed* toward those targets. A
//! [`AnimationTimeline`] owns every animated scalar and is advanced by a
//! single `tick(now)` call, so tests can step through choreography without
//! real delays.

pub mod easing;
pub mod timeline;
pub mod tween;

pub use easing::EasingFunction;
pub use timeline::AnimationTimeline;
pub use tween::Tween;
