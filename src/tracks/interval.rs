//! Domain and region tracks: labelled interval rectangles.

use std::sync::Arc;

use super::{strand, track_label, ClickAction, TrackContext, TrackRenderer, Tooltip};
use crate::axis::{Axis, ResidueWindow};
use crate::error::TrackError;
use crate::options::{ColorOptions, GeometryOptions};
use crate::protein_data::{Interval, ProteinData};
use crate::renderer::primitive::{rect, text};
use crate::renderer::{
    ItemRef, OrdinalScale, Paint, Primitive, Style, TextAnchor,
};

/// Which interval source a track draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    /// Pfam domains; clicking opens the family page.
    Domain,
    /// One region category.
    Region,
}

impl IntervalKind {
    /// Gap between the rectangle bottom and the label baseline.
    fn label_gap(self) -> f64 {
        match self {
            Self::Domain => 12.0,
            Self::Region => 14.0,
        }
    }
}

/// Interval track.
#[derive(Debug)]
pub struct IntervalTrack {
    name: String,
    kind: IntervalKind,
    data: Arc<ProteinData>,
    intervals: Vec<Interval>,
    palette: OrdinalScale,
    geometry: GeometryOptions,
    colors: ColorOptions,
    /// Indices into `intervals` inside the last window.
    visible: Vec<usize>,
    axis: Option<Axis>,
    viewport_width: f64,
}

impl IntervalTrack {
    /// Track drawing `intervals`.
    #[must_use]
    pub fn new(
        name: &str,
        kind: IntervalKind,
        intervals: Vec<Interval>,
        ctx: &TrackContext<'_>,
    ) -> Self {
        let palette = match kind {
            IntervalKind::Domain => ctx.domain_colors.clone(),
            IntervalKind::Region => ctx.region_colors.clone(),
        };
        Self {
            name: name.to_owned(),
            kind,
            data: Arc::clone(ctx.data),
            intervals,
            palette,
            geometry: ctx.options.geometry.clone(),
            colors: ctx.options.colors.clone(),
            visible: Vec::new(),
            axis: None,
            viewport_width: ctx.options.display.viewport_width,
        }
    }

    /// Intervals inside the window of the last update.
    pub fn visible(&self) -> impl Iterator<Item = &Interval> {
        self.visible.iter().filter_map(|&i| self.intervals.get(i))
    }

    /// Whether an interval's label fits inside its rectangle on `axis`.
    #[must_use]
    pub fn label_fits(&self, interval: &Interval, axis: &Axis) -> bool {
        let width = extent(interval, axis).1;
        width > interval.label.chars().count() as f64 * self.geometry.label_char_width
    }

    fn item(&self, interval: &Interval) -> ItemRef {
        let label = interval.label.clone();
        let start = interval.start;
        match self.kind {
            IntervalKind::Domain => ItemRef::Domain { label, start },
            IntervalKind::Region => ItemRef::Region { label, start },
        }
    }

    fn find(&self, item: &ItemRef) -> Option<&Interval> {
        let (label, start) = match (self.kind, item) {
            (IntervalKind::Domain, ItemRef::Domain { label, start })
            | (IntervalKind::Region, ItemRef::Region { label, start }) => {
                (label, *start)
            }
            _ => return None,
        };
        self.intervals
            .iter()
            .find(|i| i.start == start && &i.label == label)
    }
}

/// Left edge and width of an interval's rectangle.
fn extent(interval: &Interval, axis: &Axis) -> (f64, f64) {
    let left = axis.map(interval.start as f64 - 1.0);
    (left, axis.map(interval.stop as f64) - left)
}

impl TrackRenderer for IntervalTrack {
    fn height(&self) -> f64 {
        match self.kind {
            IntervalKind::Domain => self.geometry.domain_height,
            IntervalKind::Region => self.geometry.region_height,
        }
    }

    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError> {
        let window = ResidueWindow::from_axis(axis, viewport_width)?;
        self.visible = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| window.overlaps(i.start, i.stop))
            .map(|(idx, _)| idx)
            .collect();
        self.axis = Some(*axis);
        self.viewport_width = viewport_width;
        Ok(())
    }

    fn primitives(&self, hovered: Option<&ItemRef>) -> Vec<Primitive> {
        let mut out = vec![
            track_label(&self.name, -4.0, &self.colors.track_label),
            strand(0.0, self.viewport_width, &self.colors.strand),
        ];
        let Some(axis) = self.axis else {
            return out;
        };
        let h = self.geometry.feature_height;
        let mut labels = Vec::new();
        for interval in self.visible() {
            let (x, width) = extent(interval, &axis);
            let item = self.item(interval);
            let opacity = if hovered == Some(&item) { 0.8 } else { 1.0 };
            let style = Style {
                stroke: Paint::solid("black"),
                ..Style::filled(self.palette.color(&interval.label))
            }
            .with_opacity(opacity);
            out.push(Primitive::new(rect(x, 0.0, width, h), style).with_item(item));
            if self.label_fits(interval, &axis) {
                labels.push(Primitive::new(
                    text(
                        x + width / 2.0,
                        h + self.kind.label_gap(),
                        interval.label.as_str(),
                        12.0,
                        TextAnchor::Middle,
                    ),
                    Style::filled("black"),
                ));
            }
        }
        out.extend(labels);
        out
    }

    fn tooltip(&self, item: &ItemRef) -> Option<Tooltip> {
        self.find(item)
            .map(|i| Tooltip::new(vec![i.label.clone()]))
    }

    fn click(&self, item: &ItemRef) -> Option<ClickAction> {
        match self.kind {
            IntervalKind::Domain => self.find(item).map(|i| {
                ClickAction::OpenUrl(format!("{}{}", self.data.pfam_url, i.label))
            }),
            IntervalKind::Region => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Shape;
    use crate::tracks::test_support::{full_axis, Harness};

    fn domain_track(h: &Harness) -> IntervalTrack {
        IntervalTrack::new(
            "PFam Domains",
            IntervalKind::Domain,
            h.data.domains.clone(),
            &h.ctx(false),
        )
    }

    #[test]
    fn visible_set_matches_closed_overlap_rule() {
        let h = Harness::new();
        let intervals: Vec<Interval> = [(1, 9), (5, 20), (20, 30), (25, 28), (30, 45), (46, 60), (10, 100)]
            .into_iter()
            .map(|(s, e)| Interval::new(s, e, format!("i{s}")))
            .collect();
        let mut track = IntervalTrack::new(
            "Regions",
            IntervalKind::Region,
            intervals.clone(),
            &h.ctx(false),
        );
        let axis = full_axis(200.0).with_domain(20.0, 30.0);
        track.update_display(&axis, 900.0).unwrap();
        let window = ResidueWindow::from_axis(&axis, 900.0).unwrap();
        let (a, b) = (window.start, window.end);
        let expected: Vec<&Interval> = intervals
            .iter()
            .filter(|i| {
                (i.start <= a && a <= i.stop)
                    || (i.start <= b && b <= i.stop)
                    || (i.start >= a && i.stop <= b)
            })
            .collect();
        let got: Vec<&Interval> = track.visible().collect();
        assert_eq!(got, expected);
        let labels: Vec<&str> = got.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["i5", "i20", "i25", "i30", "i10"]);
    }

    #[test]
    fn narrow_labels_are_suppressed() {
        let h = Harness::new();
        let mut track = domain_track(&h);
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let texts: Vec<String> = track
            .primitives(None)
            .into_iter()
            .filter_map(|p| match p.shape {
                Shape::Text { content, .. } => Some(content),
                _ => None,
            })
            .collect();
        // Pkinase spans 51 residues (229.5px); Tiny spans 3 (13.5px)
        assert_eq!(texts, ["PFam Domains", "Pkinase"]);
    }

    #[test]
    fn rectangle_spans_start_minus_one_to_stop() {
        let h = Harness::new();
        let mut track = domain_track(&h);
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let first = track
            .primitives(None)
            .into_iter()
            .find(|p| p.item.is_some())
            .unwrap();
        assert_eq!(
            first.shape,
            Shape::Rect {
                x: 9.0 * 4.5,
                y: 0.0,
                width: 51.0 * 4.5,
                height: 20.0
            }
        );
    }

    #[test]
    fn zero_width_interval_does_not_abort_update() {
        let h = Harness::new();
        let mut track = IntervalTrack::new(
            "Odd",
            IntervalKind::Region,
            vec![Interval::new(40, 39, "backwards"), Interval::new(41, 41, "x")],
            &h.ctx(false),
        );
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let rects = track
            .primitives(None)
            .into_iter()
            .filter(|p| p.item.is_some())
            .count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn domain_click_opens_pfam() {
        let h = Harness::new();
        let track = domain_track(&h);
        let item = ItemRef::Domain {
            label: "Pkinase".to_owned(),
            start: 10,
        };
        assert_eq!(
            track.click(&item),
            Some(ClickAction::OpenUrl(
                "https://pfam.example/family/Pkinase".to_owned()
            ))
        );
        assert_eq!(track.tooltip(&item).unwrap().text(), "Pkinase");
        let region = ItemRef::Region {
            label: "Pkinase".to_owned(),
            start: 10,
        };
        assert_eq!(track.click(&region), None);
    }
}
