//! Spacer track.

use super::TrackRenderer;
use crate::axis::Axis;
use crate::error::TrackError;
use crate::renderer::{ItemRef, Primitive};

/// Track that draws nothing and only reserves vertical space.
#[derive(Debug, Clone)]
pub struct EmptyTrack {
    height: f64,
}

impl EmptyTrack {
    /// Spacer of the given height. Zero is allowed.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            height: height.max(0.0),
        }
    }
}

impl TrackRenderer for EmptyTrack {
    fn height(&self) -> f64 {
        self.height
    }

    fn update_display(&mut self, _: &Axis, _: f64) -> Result<(), TrackError> {
        Ok(())
    }

    fn primitives(&self, _: Option<&ItemRef>) -> Vec<Primitive> {
        Vec::new()
    }
}
