//! Linear residue ↔ pixel mapping shared by every track in a viewer.
//!
//! An [`Axis`] is an affine map from a logical domain (sequence position)
//! onto a visual range (pixel offset). Zooming is expressed only as a new
//! domain; the range never changes after construction.

use crate::error::TrackError;

/// Invertible affine mapping between residue coordinates and pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Axis {
    /// Axis mapping `domain` onto `range`. Either may be descending.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a residue coordinate to a pixel offset.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    #[must_use]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) * 0.5;
        }
        r0 + (v - d0) * (r1 - r0) / span
    }

    /// Map a pixel offset back to a residue coordinate.
    ///
    /// A degenerate range maps everything to the middle of the domain.
    #[must_use]
    pub fn invert(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return (d0 + d1) * 0.5;
        }
        d0 + (x - r0) * (d1 - d0) / span
    }

    /// Retarget the logical domain. The visual range is left untouched.
    pub fn set_domain(&mut self, lo: f64, hi: f64) {
        self.domain = (lo, hi);
    }

    /// Copy of this axis with a different domain.
    #[must_use]
    pub fn with_domain(&self, lo: f64, hi: f64) -> Self {
        Self {
            domain: (lo, hi),
            range: self.range,
        }
    }

    /// Copy of this axis with a different visual range.
    #[must_use]
    pub fn with_range(&self, r0: f64, r1: f64) -> Self {
        Self {
            domain: self.domain,
            range: (r0, r1),
        }
    }

    /// Current logical domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Visual range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixel extent of one residue, always non-negative.
    #[must_use]
    pub fn unit_width(&self) -> f64 {
        (self.map(1.0) - self.map(0.0)).abs()
    }

    /// Pixel extent between two residue coordinates.
    #[must_use]
    pub fn span(&self, lo: f64, hi: f64) -> f64 {
        self.map(hi) - self.map(lo)
    }
}

/// Integer residue window currently visible through an axis.
///
/// `start` is `floor(invert(0))` and `end` is `ceil(invert(width))`,
/// normalised so that `start <= end` for descending ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueWindow {
    /// First visible residue coordinate (inclusive).
    pub start: i64,
    /// Last visible residue coordinate (inclusive).
    pub end: i64,
}

impl ResidueWindow {
    /// Window visible through `axis` on a viewport `viewport_width` wide.
    pub fn from_axis(
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<Self, TrackError> {
        let a = axis.invert(0.0);
        let b = axis.invert(viewport_width);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if !lo.is_finite() || !hi.is_finite() {
            return Err(TrackError::InvalidWindow { lo, hi });
        }
        Ok(Self {
            start: lo.floor() as i64,
            end: hi.ceil() as i64,
        })
    }

    /// Whether a single residue index lies inside the window.
    #[must_use]
    pub fn contains(&self, index: i64) -> bool {
        self.start <= index && index <= self.end
    }

    /// Closed-interval overlap test.
    ///
    /// `[start, stop]` is visible iff it covers the window start, covers the
    /// window end, or lies entirely inside the window. Edges are inclusive.
    #[must_use]
    pub fn overlaps(&self, start: i64, stop: i64) -> bool {
        let (a, b) = (self.start, self.end);
        (start <= a && a <= stop)
            || (start <= b && b <= stop)
            || (start >= a && stop <= b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_undoes_map_ascending() {
        let axis = Axis::new((0.0, 200.0), (0.0, 900.0));
        for i in 0..=200 {
            let v = f64::from(i);
            assert!((axis.invert(axis.map(v)) - v).abs() < 1e-6);
        }
    }

    #[test]
    fn invert_undoes_map_descending() {
        let axis = Axis::new((10.0, 73.5), (400.0, 25.0));
        for i in 0..=127 {
            let v = 10.0 + f64::from(i) * 0.5;
            assert!((axis.invert(axis.map(v)) - v).abs() < 1e-6);
        }
        assert!(axis.map(10.0) > axis.map(73.5));
    }

    #[test]
    fn set_domain_keeps_range() {
        let mut axis = Axis::new((0.0, 200.0), (0.0, 900.0));
        axis.set_domain(50.0, 100.0);
        assert_eq!(axis.range(), (0.0, 900.0));
        assert_eq!(axis.domain(), (50.0, 100.0));
        assert!((axis.map(50.0)).abs() < 1e-9);
        assert!((axis.map(100.0) - 900.0).abs() < 1e-9);
        assert!((axis.unit_width() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_range_middle() {
        let axis = Axis::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(axis.map(5.0), 50.0);
        assert_eq!(axis.map(123.0), 50.0);
    }

    #[test]
    fn window_rounds_outward() {
        let axis = Axis::new((10.5, 60.2), (0.0, 900.0));
        let w = ResidueWindow::from_axis(&axis, 900.0).unwrap();
        assert_eq!(w, ResidueWindow { start: 10, end: 61 });
    }

    #[test]
    fn window_normalises_descending_range() {
        let axis = Axis::new((0.0, 100.0), (900.0, 0.0));
        let w = ResidueWindow::from_axis(&axis, 900.0).unwrap();
        assert_eq!(w, ResidueWindow { start: 0, end: 100 });
    }

    #[test]
    fn degenerate_range_window_is_single_point() {
        let axis = Axis::new((0.0, 100.0), (0.0, 0.0));
        let w = ResidueWindow::from_axis(&axis, 900.0).unwrap();
        assert_eq!(w, ResidueWindow { start: 50, end: 50 });
    }

    #[test]
    fn non_finite_window_is_rejected() {
        let axis = Axis::new((0.0, f64::INFINITY), (0.0, 900.0));
        assert!(matches!(
            ResidueWindow::from_axis(&axis, 900.0),
            Err(TrackError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn overlap_matches_brute_force() {
        let window = ResidueWindow { start: 20, end: 40 };
        for s in 0..60 {
            for e in s..60 {
                let brute = (s..=e).any(|i| window.contains(i));
                assert_eq!(window.overlaps(s, e), brute, "[{s}, {e}]");
            }
        }
    }

    #[test]
    fn overlap_edges_are_inclusive() {
        let window = ResidueWindow { start: 20, end: 40 };
        assert!(window.overlaps(10, 20));
        assert!(window.overlaps(40, 55));
        assert!(window.overlaps(5, 90));
        assert!(!window.overlaps(41, 55));
        assert!(!window.overlaps(0, 19));
    }
}
