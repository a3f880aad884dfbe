//! Builder and initial layout for [`StructureViewer`].

use std::sync::Arc;

use web_time::Duration;

use super::{PanelProperty, StructureViewer, ZoomRange};
use crate::axis::Axis;
use crate::input::PointerTracker;
use crate::options::ViewerOptions;
use crate::protein_data::ProteinData;
use crate::renderer::OrdinalScale;
use crate::tracks::{TrackContext, TrackKind, TrackLayer};
use crate::viewer::TrackViewer;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`StructureViewer`].
#[derive(Debug)]
pub struct StructureViewerBuilder {
    data: Arc<ProteinData>,
    options: Option<ViewerOptions>,
}

impl StructureViewerBuilder {
    pub(super) fn new(data: Arc<ProteinData>) -> Self {
        Self {
            data,
            options: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: ViewerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Build both viewers from the configured track stack.
    #[must_use]
    pub fn build(self) -> StructureViewer {
        StructureViewer::new(self.data, self.options.unwrap_or_default())
    }
}

// ── Construction ─────────────────────────────────────────────────────────

/// Palettes shared by the macro and zoom viewers so a label keeps its
/// color in both.
struct Palettes {
    domains: OrdinalScale,
    regions: OrdinalScale,
}

impl Palettes {
    fn new(data: &ProteinData, options: &ViewerOptions) -> Self {
        let domains = OrdinalScale::new(
            &options.colors.domain_palette,
            data.domains.iter().map(|d| d.label.as_str()),
        );
        let regions = OrdinalScale::new(
            &options.colors.region_palette,
            options
                .tracks
                .iter()
                .filter_map(|spec| match &spec.kind {
                    TrackKind::Region { category } => Some(data.region(category)),
                    _ => None,
                })
                .flatten()
                .map(|r| r.label.as_str()),
        );
        Self { domains, regions }
    }
}

/// Track viewer holding one layer per configured track.
fn populate(
    name: &str,
    axis: Axis,
    ctx: &TrackContext<'_>,
) -> TrackViewer {
    let options = ctx.options;
    let mut viewer = TrackViewer::new(
        name,
        axis,
        options.display.viewport_width,
        &options.animation,
    );
    for spec in &options.tracks {
        let layer = TrackLayer::create(&spec.name, &spec.kind, ctx);
        let _ = viewer.add_track(&spec.name, layer);
    }
    for spec in options.tracks.iter().filter(|s| !s.visible) {
        if let Err(e) = viewer.set_track_visible(&spec.name, false) {
            log::warn!("{name}: {e}");
        }
    }
    viewer
}

impl StructureViewer {
    fn new(data: Arc<ProteinData>, options: ViewerOptions) -> Self {
        let len = data.len();
        let display = &options.display;
        let macro_len = display
            .macro_max_residues
            .map_or(len, |cap| len.min(cap)) as f64;
        let axis = Axis::new((0.0, macro_len), (0.0, display.viewport_width));
        let palettes = Palettes::new(&data, &options);

        let macro_ctx = TrackContext {
            data: &data,
            options: &options,
            show_residues: len <= display.show_residues_size_limit,
            domain_colors: &palettes.domains,
            region_colors: &palettes.regions,
        };
        let macro_viewer = populate("macro", axis, &macro_ctx);

        let last_zoom = ZoomRange::clamped(
            display.initial_zoom_start,
            display.initial_zoom_width,
            macro_len,
            display.min_zoom_width,
        );
        let zoom_ctx = TrackContext {
            show_residues: true,
            ..macro_ctx
        };
        let zoom_viewer = populate(
            "zoom",
            axis.with_domain(last_zoom.start, last_zoom.end()),
            &zoom_ctx,
        );

        let mut panel = options.animation.timeline();
        let macro_height = macro_viewer.height();
        panel.set(PanelProperty::Height, macro_height);
        panel.set(PanelProperty::ZoomBaseline, macro_height);
        panel.set(PanelProperty::WindowBase, macro_height);

        log::info!(
            "structure viewer: {len} residues, {} tracks, macro window 0..{macro_len}",
            options.tracks.len()
        );
        let mut viewer = Self {
            data,
            options,
            axis,
            macro_viewer,
            zoom_viewer,
            panel,
            zoom_enabled: false,
            zoom_window: None,
            last_zoom,
            pointer: PointerTracker::new(),
            hovered: None,
        };
        viewer.apply_focus_experiment();
        viewer
    }

    /// Disable every experiment except the payload's focus experiment.
    fn apply_focus_experiment(&mut self) {
        let Some(focus) = self.data.focus_experiment.clone() else {
            return;
        };
        log::info!("focusing on experiment {focus}");
        for track in self.ptm_tracks_mut() {
            track.filter_mut().set_all_experiments(false);
            track.toggle_experiment(&focus, true);
            track.update_values(Duration::ZERO);
        }
    }
}
