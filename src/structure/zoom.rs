//! Zoom range clamping and the zoom window overlay.

use crate::axis::Axis;
use crate::renderer::primitive::rect;
use crate::renderer::{Paint, Primitive, Shape, Style};

/// Residue range shown by the zoom viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    /// First residue coordinate.
    pub start: f64,
    /// Width in residues.
    pub width: f64,
}

impl ZoomRange {
    /// Range exactly as given.
    #[must_use]
    pub fn new(start: f64, width: f64) -> Self {
        Self { start, width }
    }

    /// Request `[start, start + width]` corrected to a valid zoom.
    ///
    /// A range narrower than `min_width` is widened about its midpoint.
    /// The result is then shifted, never shrunk, to lie inside
    /// `[0, len]`. A sequence shorter than `min_width` is shown whole, and an
    /// empty one yields an empty range.
    #[must_use]
    pub fn clamped(start: f64, width: f64, len: f64, min_width: f64) -> Self {
        let (mut start, mut width) = if width < 0.0 {
            (start + width, -width)
        } else {
            (start, width)
        };
        if !start.is_finite() {
            start = 0.0;
        }
        if !width.is_finite() {
            width = min_width;
        }
        if width < min_width {
            start -= (min_width - width) / 2.0;
            width = min_width;
        }
        if width > len {
            width = len;
        }
        if start < 0.0 {
            start = 0.0;
        }
        if start + width > len {
            start = (len - width).max(0.0);
        }
        Self { start, width }
    }

    /// Last residue coordinate.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }
}

/// Highlight of the zoomed range on the macro viewer, with a funnel
/// widening down into the zoom viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomWindow {
    range: ZoomRange,
}

impl ZoomWindow {
    /// Window over `range`.
    #[must_use]
    pub fn new(range: ZoomRange) -> Self {
        Self { range }
    }

    /// Highlighted range.
    #[must_use]
    pub fn range(&self) -> ZoomRange {
        self.range
    }

    /// Move the window.
    pub fn update_window(&mut self, range: ZoomRange) {
        self.range = range;
    }

    /// Highlight rectangle and funnel for a macro viewer `macro_height`
    /// tall, drawn through the base `axis`.
    #[must_use]
    pub fn primitives(
        &self,
        axis: &Axis,
        macro_height: f64,
        viewport_width: f64,
        color: &str,
    ) -> Vec<Primitive> {
        let x0 = axis.map(self.range.start);
        let x1 = axis.map(self.range.end());
        let top = macro_height - 50.0;
        let bottom = macro_height + 50.0;
        let window = Primitive::new(
            rect(x0, 0.0, x1 - x0, top),
            Style::filled(color).with_opacity(0.3),
        );
        let funnel = Primitive::new(
            Shape::Polygon {
                points: vec![(x0, top), (x1, top), (viewport_width, bottom), (0.0, bottom)],
            },
            Style {
                fill: Paint::VerticalFade {
                    color: color.to_owned(),
                    top_opacity: 1.0,
                    bottom_opacity: 0.0,
                },
                ..Style::default()
            }
            .with_opacity(0.3),
        );
        vec![funnel, window]
    }
}
