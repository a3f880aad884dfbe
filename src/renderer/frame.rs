//! A composed frame: translated, faded layers of primitives.

use super::primitive::{ItemRef, Primitive};

/// Primitives sharing one translation and opacity, typically one track.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Name used as the SVG group id.
    pub name: String,
    /// Horizontal translation in pixels.
    pub dx: f64,
    /// Vertical translation in pixels.
    pub dy: f64,
    /// Opacity applied to every primitive in the layer.
    pub opacity: f64,
    /// Primitives in local coordinates.
    pub primitives: Vec<Primitive>,
}

impl Layer {
    /// Untranslated, fully opaque layer.
    #[must_use]
    pub fn new(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            dx: 0.0,
            dy: 0.0,
            opacity: 1.0,
            primitives,
        }
    }

    /// Translate the layer.
    #[must_use]
    pub fn at(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Set the layer's opacity.
    #[must_use]
    pub fn faded(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Topmost interactive primitive under frame point `(x, y)`.
    #[must_use]
    pub fn item_at(&self, x: f64, y: f64) -> Option<&ItemRef> {
        if self.opacity <= 0.0 {
            return None;
        }
        let (lx, ly) = (x - self.dx, y - self.dy);
        self.primitives
            .iter()
            .rev()
            .filter(|p| p.contains(lx, ly))
            .find_map(|p| p.item.as_ref())
    }
}

/// Everything visible at one instant, back to front.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels.
    pub height: f64,
    /// Layers, drawn in order.
    pub layers: Vec<Layer>,
}

impl Frame {
    /// Empty frame of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Append a layer on top.
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Append every layer of `other`, shifted down by `dy`.
    pub fn extend_shifted(&mut self, other: Frame, dy: f64) {
        self.layers.extend(other.layers.into_iter().map(|mut layer| {
            layer.dy += dy;
            layer
        }));
    }

    /// Topmost interactive primitive under `(x, y)`.
    #[must_use]
    pub fn item_at(&self, x: f64, y: f64) -> Option<&ItemRef> {
        self.layers.iter().rev().find_map(|layer| layer.item_at(x, y))
    }

    /// Total primitive count.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(|l| l.primitives.len()).sum()
    }
}
