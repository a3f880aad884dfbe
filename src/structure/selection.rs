//! In-progress drag selection over the macro viewer.

use glam::DVec2;

use crate::axis::Axis;
use crate::renderer::primitive::rect;
use crate::renderer::{Primitive, Style};

/// Horizontal selection between the pointer-down position and the current
/// pointer position. Either may be on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSelection {
    anchor: DVec2,
    current: DVec2,
}

impl DragSelection {
    /// Selection anchored at `anchor`, initially empty.
    #[must_use]
    pub fn new(anchor: DVec2) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    /// Move the free end of the selection.
    pub fn update(&mut self, current: DVec2) {
        self.current = current;
    }

    /// Where the drag started.
    #[must_use]
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Normalised pixel extent `(left, right)` with `left <= right`.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let (a, b) = (self.anchor.x, self.current.x);
        (a.min(b), a.max(b))
    }

    /// Pixel width, never negative.
    #[must_use]
    pub fn width(&self) -> f64 {
        let (lo, hi) = self.bounds();
        hi - lo
    }

    /// Residue range `(start, end)` covered on `axis`, before any clamping.
    #[must_use]
    pub fn residue_range(&self, axis: &Axis) -> (f64, f64) {
        let (lo, hi) = self.bounds();
        (axis.invert(lo), axis.invert(hi))
    }

    /// Translucent rectangle covering the selection, `height` tall.
    #[must_use]
    pub fn primitive(&self, height: f64, color: &str) -> Primitive {
        let (lo, _) = self.bounds();
        let width = self.width().max(1.0);
        Primitive::new(rect(lo, 0.0, width, height), Style::filled(color).with_opacity(0.3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Shape;

    #[test]
    fn reversed_drag_normalises() {
        let axis = Axis::new((0.0, 200.0), (0.0, 900.0));
        let mut sel = DragSelection::new(DVec2::new(100.0, 10.0));
        sel.update(DVec2::new(40.0, 12.0));
        assert_eq!(sel.bounds(), (40.0, 100.0));
        assert_eq!(sel.width(), 60.0);
        let (start, end) = sel.residue_range(&axis);
        assert!((start - axis.invert(40.0)).abs() < 1e-9);
        assert!((end - axis.invert(100.0)).abs() < 1e-9);
        assert!(end > start);
    }

    #[test]
    fn rectangle_spans_selection() {
        let mut sel = DragSelection::new(DVec2::new(300.0, 0.0));
        sel.update(DVec2::new(250.0, 0.0));
        let prim = sel.primitive(130.0, "#00ff00");
        assert_eq!(
            prim.shape,
            Shape::Rect {
                x: 250.0,
                y: 0.0,
                width: 50.0,
                height: 130.0
            }
        );
        assert_eq!(prim.style.opacity, 0.3);
    }

    #[test]
    fn empty_selection_still_draws_a_sliver() {
        let sel = DragSelection::new(DVec2::new(10.0, 0.0));
        assert_eq!(sel.width(), 0.0);
        let Shape::Rect { width, .. } = sel.primitive(50.0, "#00ff00").shape else {
            panic!("expected a rectangle");
        };
        assert_eq!(width, 1.0);
    }
}
