//! Track layers: one feature layer rendered along a shared axis.
//!
//! Every layer implements [`TrackRenderer`]. The closed [`TrackLayer`] enum
//! holds one of the variants, and [`TrackLayer::create`] acts as the
//! factory, selecting the variant from a [`TrackKind`] discriminant.
//! Layers compute which items fall inside the current residue window in
//! `update_display` and emit primitives for exactly that subset.

pub mod empty;
pub mod interval;
pub mod marker;
pub mod ptm;
pub mod residue;

use std::sync::Arc;

pub use empty::EmptyTrack;
pub use interval::{IntervalKind, IntervalTrack};
pub use marker::{MarkerKind, MarkerTrack};
pub use ptm::{AnnotationBadge, EvidenceRow, PtmFilter, PtmTrack};
pub use residue::{ResidueTrack, TickLevel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::axis::Axis;
use crate::error::TrackError;
use crate::options::ViewerOptions;
use crate::protein_data::ProteinData;
use crate::renderer::primitive::text;
use crate::renderer::{
    ItemRef, OrdinalScale, Primitive, Shape, Style, TextAnchor,
};

/// Identifier of a track, unique within its owning viewer.
pub type TrackId = usize;

/// Discriminant selecting which layer a track renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackKind {
    /// Spacer with no content.
    Empty,
    /// Modification count bars.
    Ptm,
    /// Ruler with ticks and residue letters.
    Residue,
    /// Natural variant markers.
    Mutation,
    /// Predicted motif markers.
    Scansite,
    /// Pfam domain intervals.
    Domain,
    /// Intervals of one region category.
    Region {
        /// Region category name in the payload.
        category: String,
    },
}

/// Hover text for a feature item, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Lines of text.
    pub lines: Vec<String>,
}

impl Tooltip {
    /// Tooltip from its lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Lines joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of clicking a feature item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Show the evidence table for a PTM site.
    PtmDetails(Vec<EvidenceRow>),
    /// Open an external reference.
    OpenUrl(String),
}

/// Inputs shared by every layer at construction.
#[derive(Debug, Clone, Copy)]
pub struct TrackContext<'a> {
    /// Protein payload.
    pub data: &'a Arc<ProteinData>,
    /// Viewer options.
    pub options: &'a ViewerOptions,
    /// Whether letter glyphs may be drawn on this viewer.
    pub show_residues: bool,
    /// Palette for domain labels.
    pub domain_colors: &'a OrdinalScale,
    /// Palette for region labels.
    pub region_colors: &'a OrdinalScale,
}

/// Capability set shared by every track layer.
pub trait TrackRenderer {
    /// Vertical extent reserved in the stack. Fixed after construction.
    fn height(&self) -> f64;

    /// Recompute the visible item subset for the window seen through
    /// `axis` on a viewport `viewport_width` wide. Idempotent.
    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError>;

    /// Primitives for the current visible subset, in track-local
    /// coordinates. `hovered` is drawn highlighted.
    fn primitives(&self, hovered: Option<&ItemRef>) -> Vec<Primitive>;

    /// Hover text for an item this layer drew.
    fn tooltip(&self, _item: &ItemRef) -> Option<Tooltip> {
        None
    }

    /// Action for a click on an item this layer drew.
    fn click(&self, _item: &ItemRef) -> Option<ClickAction> {
        None
    }

    /// Advance layer-internal animations. Returns `true` while animating.
    fn tick(&mut self, _now: Duration) -> bool {
        false
    }

    /// Clock time at which layer-internal animations come to rest.
    fn settle_time(&self) -> Option<Duration> {
        None
    }
}

/// One of the track layer variants.
#[derive(Debug)]
pub enum TrackLayer {
    /// Spacer.
    Empty(EmptyTrack),
    /// Ruler.
    Residue(ResidueTrack),
    /// Modification bars.
    Ptm(PtmTrack),
    /// Domain intervals.
    Domain(IntervalTrack),
    /// Region intervals.
    Region(IntervalTrack),
    /// Mutation markers.
    Mutation(MarkerTrack),
    /// Scansite markers.
    Scansite(MarkerTrack),
}

impl TrackLayer {
    /// Build the layer selected by `kind`.
    #[must_use]
    pub fn create(name: &str, kind: &TrackKind, ctx: &TrackContext<'_>) -> Self {
        match kind {
            TrackKind::Empty => Self::Empty(EmptyTrack::new(
                ctx.options.geometry.spacer_height,
            )),
            TrackKind::Residue => Self::Residue(ResidueTrack::new(ctx)),
            TrackKind::Ptm => Self::Ptm(PtmTrack::new(name, ctx)),
            TrackKind::Domain => Self::Domain(IntervalTrack::new(
                name,
                IntervalKind::Domain,
                ctx.data.domains.clone(),
                ctx,
            )),
            TrackKind::Region { category } => Self::Region(IntervalTrack::new(
                name,
                IntervalKind::Region,
                ctx.data.region(category).to_vec(),
                ctx,
            )),
            TrackKind::Mutation => {
                Self::Mutation(MarkerTrack::new(name, MarkerKind::Mutation, ctx))
            }
            TrackKind::Scansite => {
                Self::Scansite(MarkerTrack::new(name, MarkerKind::Scansite, ctx))
            }
        }
    }

    fn renderer(&self) -> &dyn TrackRenderer {
        match self {
            Self::Empty(t) => t,
            Self::Residue(t) => t,
            Self::Ptm(t) => t,
            Self::Domain(t) | Self::Region(t) => t,
            Self::Mutation(t) | Self::Scansite(t) => t,
        }
    }

    fn renderer_mut(&mut self) -> &mut dyn TrackRenderer {
        match self {
            Self::Empty(t) => t,
            Self::Residue(t) => t,
            Self::Ptm(t) => t,
            Self::Domain(t) | Self::Region(t) => t,
            Self::Mutation(t) | Self::Scansite(t) => t,
        }
    }

    /// The PTM layer, if this is one.
    #[must_use]
    pub fn as_ptm(&self) -> Option<&PtmTrack> {
        match self {
            Self::Ptm(t) => Some(t),
            _ => None,
        }
    }

    /// Mutable PTM layer, if this is one.
    pub fn as_ptm_mut(&mut self) -> Option<&mut PtmTrack> {
        match self {
            Self::Ptm(t) => Some(t),
            _ => None,
        }
    }
}

impl TrackRenderer for TrackLayer {
    fn height(&self) -> f64 {
        self.renderer().height()
    }

    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError> {
        self.renderer_mut().update_display(axis, viewport_width)
    }

    fn primitives(&self, hovered: Option<&ItemRef>) -> Vec<Primitive> {
        self.renderer().primitives(hovered)
    }

    fn tooltip(&self, item: &ItemRef) -> Option<Tooltip> {
        self.renderer().tooltip(item)
    }

    fn click(&self, item: &ItemRef) -> Option<ClickAction> {
        self.renderer().click(item)
    }

    fn tick(&mut self, now: Duration) -> bool {
        self.renderer_mut().tick(now)
    }

    fn settle_time(&self) -> Option<Duration> {
        self.renderer().settle_time()
    }
}

/// A named layer with runtime visibility, as held by a viewer.
#[derive(Debug)]
pub struct Track {
    id: TrackId,
    name: String,
    visible: bool,
    layer: TrackLayer,
}

impl Track {
    /// Visible track wrapping `layer`.
    #[must_use]
    pub fn new(id: TrackId, name: impl Into<String>, layer: TrackLayer) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            layer,
        }
    }

    /// Viewer-scoped id.
    #[must_use]
    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reserved height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.layer.height()
    }

    /// Whether the track currently takes space in the stack.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Rendered layer.
    #[must_use]
    pub fn layer(&self) -> &TrackLayer {
        &self.layer
    }

    /// Mutable rendered layer.
    pub fn layer_mut(&mut self) -> &mut TrackLayer {
        &mut self.layer
    }
}

/// Label drawn at the top-left corner of a track.
pub(crate) fn track_label(name: &str, y: f64, color: &str) -> Primitive {
    Primitive::new(
        text(0.0, y, name, 12.0, TextAnchor::Start),
        Style::filled(color),
    )
}

/// Horizontal strand line across the viewport.
pub(crate) fn strand(y: f64, viewport_width: f64, color: &str) -> Primitive {
    Primitive::new(
        Shape::Line {
            x1: 0.0,
            y1: y,
            x2: viewport_width,
            y2: y,
        },
        Style::stroked(color, 2.0),
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::{full_axis, Harness};
    use super::*;

    #[test]
    fn factory_selects_variant_and_height() {
        let h = Harness::new();
        let ctx = h.ctx(false);
        let cases = [
            (TrackKind::Empty, 50.0),
            (TrackKind::Ptm, 100.0),
            (TrackKind::Residue, 30.0),
            (TrackKind::Mutation, 45.0),
            (TrackKind::Scansite, 45.0),
            (TrackKind::Domain, 60.0),
            (
                TrackKind::Region {
                    category: "uniprot_structure".to_owned(),
                },
                60.0,
            ),
        ];
        for (kind, height) in cases {
            let layer = TrackLayer::create("t", &kind, &ctx);
            assert_eq!(layer.height(), height, "{kind:?}");
        }
        let ptm = TrackLayer::create("PTMs", &TrackKind::Ptm, &ctx);
        assert!(ptm.as_ptm().is_some());
    }

    #[test]
    fn every_layer_survives_repeated_updates() {
        let h = Harness::new();
        let ctx = h.ctx(true);
        let axis = full_axis(200.0);
        for spec in crate::options::default_tracks() {
            let mut layer = TrackLayer::create(&spec.name, &spec.kind, &ctx);
            layer.update_display(&axis, 900.0).unwrap();
            let first = layer.primitives(None);
            layer.update_display(&axis, 900.0).unwrap();
            assert_eq!(first, layer.primitives(None), "{}", spec.name);
        }
    }

    #[test]
    fn unknown_region_category_is_empty() {
        let h = Harness::new();
        let mut layer = TrackLayer::create(
            "Nothing",
            &TrackKind::Region {
                category: "no_such_category".to_owned(),
            },
            &h.ctx(false),
        );
        layer.update_display(&full_axis(200.0), 900.0).unwrap();
        assert!(layer.primitives(None).iter().all(|p| p.item.is_none()));
    }

    #[test]
    fn tooltip_text_joins_lines() {
        let tip = Tooltip::new(vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(tip.text(), "a\nb");
    }
}
