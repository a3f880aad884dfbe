//! Mutation and scansite tracks: per-residue circles sized by entry count.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{strand, track_label, TrackContext, TrackRenderer, Tooltip};
use crate::axis::{Axis, ResidueWindow};
use crate::error::TrackError;
use crate::options::{ColorOptions, GeometryOptions};
use crate::protein_data::ProteinData;
use crate::renderer::primitive::text;
use crate::renderer::{ItemRef, Primitive, Shape, Style, TextAnchor};

/// Which per-residue list a marker track draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Natural variants.
    Mutation,
    /// Predicted motif hits.
    Scansite,
}

/// Circle markers along a strand.
#[derive(Debug)]
pub struct MarkerTrack {
    name: String,
    kind: MarkerKind,
    data: Arc<ProteinData>,
    geometry: GeometryOptions,
    colors: ColorOptions,
    show_residues: bool,
    /// Entries per residue.
    counts: BTreeMap<usize, usize>,
    /// Maps an entry count to a radius; range adapts to zoom.
    radius: Axis,
    visible: Vec<usize>,
    axis: Option<Axis>,
    viewport_width: f64,
}

impl MarkerTrack {
    /// Marker track over the mutation or scansite lists of `ctx.data`.
    #[must_use]
    pub fn new(name: &str, kind: MarkerKind, ctx: &TrackContext<'_>) -> Self {
        let data = Arc::clone(ctx.data);
        let counts: BTreeMap<usize, usize> = match kind {
            MarkerKind::Mutation => {
                data.mutations.iter().map(|(&k, v)| (k, v.len())).collect()
            }
            MarkerKind::Scansite => {
                data.scansite.iter().map(|(&k, v)| (k, v.len())).collect()
            }
        };
        let max_count = counts.values().copied().max().unwrap_or(0);
        let min = ctx.options.geometry.min_marker_size;
        Self {
            name: name.to_owned(),
            kind,
            data,
            geometry: ctx.options.geometry.clone(),
            colors: ctx.options.colors.clone(),
            show_residues: ctx.show_residues,
            counts,
            radius: Axis::new((0.0, max_count as f64), (min, min * 2.0)),
            visible: Vec::new(),
            axis: None,
            viewport_width: ctx.options.display.viewport_width,
        }
    }

    /// Residues with a marker inside the last window.
    #[must_use]
    pub fn visible_residues(&self) -> &[usize] {
        &self.visible
    }

    /// Radius of the marker at a residue under the current zoom.
    #[must_use]
    pub fn radius_at(&self, residue: usize) -> Option<f64> {
        self.counts
            .get(&residue)
            .map(|&n| self.radius.map(n as f64))
    }

    fn item(&self, residue: usize) -> ItemRef {
        match self.kind {
            MarkerKind::Mutation => ItemRef::Mutation(residue),
            MarkerKind::Scansite => ItemRef::Scansite(residue),
        }
    }

    fn fill(&self) -> &str {
        match self.kind {
            MarkerKind::Mutation => &self.colors.mutation,
            MarkerKind::Scansite => &self.colors.scansite,
        }
    }

    fn mutation_tooltip(&self, residue: usize) -> Option<Tooltip> {
        let entries = self.data.mutations.get(&residue)?;
        let original = entries.first().map_or("", |m| m.original.as_str());
        let mut lines = vec![format!("Mutated Residue {original}{residue}:")];
        lines.extend(entries.iter().map(|m| {
            if m.clinical.is_empty() {
                format!("-> {} | Annotation: {}", m.mutant, m.annotation)
            } else {
                format!(
                    "-> {} | Clinical Significance: {} | Annotation: {}",
                    m.mutant, m.clinical, m.annotation
                )
            }
        }));
        Some(Tooltip::new(lines))
    }

    fn scansite_tooltip(&self, residue: usize) -> Option<Tooltip> {
        let entries = self.data.scansite.get(&residue)?;
        let letter = self.data.residue_letter(residue).unwrap_or('?');
        let mut lines = vec![format!("Residue: {letter}{residue}")];
        lines.extend(
            entries
                .iter()
                .map(|s| format!("{}: {} ({})", s.source, s.value, s.score)),
        );
        Some(Tooltip::new(lines))
    }
}

impl TrackRenderer for MarkerTrack {
    fn height(&self) -> f64 {
        match self.kind {
            MarkerKind::Mutation => self.geometry.mutation_height,
            MarkerKind::Scansite => self.geometry.scansite_height,
        }
    }

    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError> {
        let window = ResidueWindow::from_axis(axis, viewport_width)?;
        let max_width = (axis.unit_width() * self.geometry.marker_width_fraction)
            .max(self.geometry.min_marker_size);
        self.radius = self.radius.with_range(max_width / 2.0, max_width);
        self.visible = self
            .counts
            .keys()
            .copied()
            .filter(|&k| window.contains(k as i64))
            .collect();
        self.axis = Some(*axis);
        self.viewport_width = viewport_width;
        Ok(())
    }

    fn primitives(&self, hovered: Option<&ItemRef>) -> Vec<Primitive> {
        let label_y = match self.kind {
            MarkerKind::Mutation => -5.0,
            MarkerKind::Scansite => 6.0,
        };
        let cy = self.height() / 2.0;
        let mut out = vec![
            track_label(&self.name, label_y, &self.colors.track_label),
            strand(cy, self.viewport_width, &self.colors.strand),
        ];
        let Some(axis) = self.axis else {
            return out;
        };
        for &k in &self.visible {
            let Some(r) = self.radius_at(k) else {
                continue;
            };
            let item = self.item(k);
            let fill = if hovered == Some(&item) {
                self.colors.hover.as_str()
            } else {
                self.fill()
            };
            out.push(
                Primitive::new(
                    Shape::Circle {
                        cx: axis.map(k as f64 - 0.5),
                        cy,
                        r,
                    },
                    Style::filled(fill),
                )
                .with_item(item),
            );
        }
        let px = axis.unit_width();
        if self.show_residues && px >= self.geometry.residue_letter_min_px {
            let font = px.min(self.geometry.residue_letter_max_font);
            for &k in &self.visible {
                let Some(letter) = self.data.residue_letter(k) else {
                    continue;
                };
                out.push(Primitive::new(
                    text(
                        axis.map(k as f64 - 0.5),
                        cy + font * 0.35,
                        letter.to_string(),
                        font,
                        TextAnchor::Middle,
                    ),
                    Style::filled(&self.colors.marker_letter),
                ));
            }
        }
        out
    }

    fn tooltip(&self, item: &ItemRef) -> Option<Tooltip> {
        match (self.kind, item) {
            (MarkerKind::Mutation, ItemRef::Mutation(k)) => self.mutation_tooltip(*k),
            (MarkerKind::Scansite, ItemRef::Scansite(k)) => self.scansite_tooltip(*k),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::test_support::{full_axis, Harness};

    #[test]
    fn radius_tracks_count_and_zoom() {
        let h = Harness::new();
        let mut track = MarkerTrack::new("Mutations", MarkerKind::Mutation, &h.ctx(false));
        // 4.5px per residue: 0.75 * 4.5 < 5, so the minimum wins
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        assert_eq!(track.visible_residues(), &[50, 77]);
        assert!((track.radius_at(50).unwrap_or_default() - 5.0).abs() < 1e-9);
        assert!((track.radius_at(77).unwrap_or_default() - 3.75).abs() < 1e-9);

        // 18px per residue: max width 13.5
        let zoomed = full_axis(200.0).with_domain(40.0, 90.0);
        track.update_display(&zoomed, 900.0).unwrap();
        assert!((track.radius_at(50).unwrap_or_default() - 13.5).abs() < 1e-9);
        assert!(track.radius_at(77).unwrap_or_default() <= 0.75 * 18.0);
    }

    #[test]
    fn letters_only_when_zoomed_and_allowed() {
        let h = Harness::new();
        let zoomed = full_axis(200.0).with_domain(40.0, 90.0);
        let count_text = |track: &MarkerTrack| {
            track
                .primitives(None)
                .into_iter()
                .filter(|p| matches!(&p.shape, Shape::Text { content, .. } if content.len() == 1))
                .count()
        };
        let mut shown = MarkerTrack::new("Mutations", MarkerKind::Mutation, &h.ctx(true));
        shown.update_display(&zoomed, 900.0).unwrap();
        assert_eq!(count_text(&shown), 2);
        let mut hidden = MarkerTrack::new("Mutations", MarkerKind::Mutation, &h.ctx(false));
        hidden.update_display(&zoomed, 900.0).unwrap();
        assert_eq!(count_text(&hidden), 0);
    }

    #[test]
    fn hover_switches_fill() {
        let h = Harness::new();
        let mut track = MarkerTrack::new("Scansite", MarkerKind::Scansite, &h.ctx(false));
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let item = ItemRef::Scansite(120);
        let fill = |hovered| {
            track
                .primitives(hovered)
                .into_iter()
                .find(|p| p.item.as_ref() == Some(&item))
                .map(|p| p.style.fill)
        };
        assert_eq!(fill(None), Some(crate::renderer::Paint::solid("#6495ED")));
        assert_eq!(fill(Some(&item)), Some(crate::renderer::Paint::solid("black")));
    }

    #[test]
    fn tooltips() {
        let h = Harness::new();
        let mutations = MarkerTrack::new("Mutations", MarkerKind::Mutation, &h.ctx(false));
        let tip = mutations.tooltip(&ItemRef::Mutation(50)).unwrap();
        assert_eq!(tip.lines.len(), 3);
        assert!(tip.lines[0].starts_with("Mutated Residue "));
        assert!(tip.lines[0].ends_with("50:"));
        assert!(tip.lines.iter().any(|l| l.contains("Clinical Significance: Pathogenic")));
        assert!(tip.lines.iter().any(|l| !l.contains("Clinical") && l.starts_with("-> ")));
        assert_eq!(mutations.tooltip(&ItemRef::Scansite(120)), None);

        let scansite = MarkerTrack::new("Scansite", MarkerKind::Scansite, &h.ctx(false));
        let tip = scansite.tooltip(&ItemRef::Scansite(120)).unwrap();
        assert_eq!(tip.lines[0], "Residue: R120");
    }
}
