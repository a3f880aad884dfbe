//! The orchestrating structure viewer.
//!
//! [`StructureViewer`] holds the base axis over the whole sequence and two
//! [`TrackViewer`]s built from the same track stack: the *macro* viewer
//! showing the whole sequence and the *zoom* viewer showing a sub-window,
//! stacked below it while zoom is enabled. It routes every
//! [`ViewerCommand`] to both viewers and keeps the panel height, the zoom
//! viewer's baseline and the zoom window animated toward
//! `macro height + zoom height (if zoomed)`.
//!
//! The implementation is split across submodules:
//! - `construction` : builder and initial layout
//! - `queries` : frames, hit testing, tooltips, export
//! - [`selection`] : drag selection rectangle
//! - [`zoom`] : zoom range clamping and the zoom window overlay

mod construction;
mod queries;
pub mod selection;
pub mod zoom;

use std::sync::Arc;

pub use construction::StructureViewerBuilder;
pub use selection::DragSelection;
use web_time::Duration;
pub use zoom::{ZoomRange, ZoomWindow};

use crate::animation::AnimationTimeline;
use crate::axis::Axis;
use crate::command::ViewerCommand;
use crate::error::TrackError;
use crate::input::{PointerOutcome, PointerTracker};
use crate::options::ViewerOptions;
use crate::protein_data::ProteinData;
use crate::renderer::ItemRef;
use crate::tracks::{ClickAction, PtmTrack, TrackId};
use crate::viewer::TrackViewer;

/// Animated panel-level property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelProperty {
    /// Total drawing height.
    Height,
    /// Vertical offset of the zoom viewer.
    ZoomBaseline,
    /// Macro height the zoom window is drawn against.
    WindowBase,
}

/// Which of the two viewers a point or item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Whole-sequence viewer.
    Macro,
    /// Zoomed viewer.
    Zoom,
}

/// Feature item located by hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Viewer holding the item.
    pub surface: Surface,
    /// Track within that viewer.
    pub track: TrackId,
    /// The item itself.
    pub item: ItemRef,
}

/// Macro and zoom track viewers over one protein.
#[derive(Debug)]
pub struct StructureViewer {
    data: Arc<ProteinData>,
    options: ViewerOptions,
    /// Base axis over the macro window; drag selections invert through it.
    axis: Axis,
    macro_viewer: TrackViewer,
    zoom_viewer: TrackViewer,
    panel: AnimationTimeline<PanelProperty>,
    zoom_enabled: bool,
    /// Kept after zoom-off until the panel has collapsed.
    zoom_window: Option<ZoomWindow>,
    last_zoom: ZoomRange,
    pointer: PointerTracker,
    hovered: Option<Hit>,
}

impl StructureViewer {
    /// Start a builder over `data`.
    #[must_use]
    pub fn builder(data: impl Into<Arc<ProteinData>>) -> StructureViewerBuilder {
        StructureViewerBuilder::new(data.into())
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Protein payload.
    #[must_use]
    pub fn data(&self) -> &Arc<ProteinData> {
        &self.data
    }

    /// Options the viewer was built with.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Base axis over the macro window.
    #[must_use]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Whole-sequence viewer.
    #[must_use]
    pub fn macro_viewer(&self) -> &TrackViewer {
        &self.macro_viewer
    }

    /// Zoomed viewer.
    #[must_use]
    pub fn zoom_viewer(&self) -> &TrackViewer {
        &self.zoom_viewer
    }

    /// Whether the zoom viewer is enabled.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoom_enabled
    }

    /// Range the zoom viewer shows, while zoomed.
    #[must_use]
    pub fn zoom_range(&self) -> Option<ZoomRange> {
        self.zoom_enabled
            .then(|| self.zoom_window.as_ref().map(ZoomWindow::range))
            .flatten()
    }

    /// Range the next zoom-on reuses.
    #[must_use]
    pub fn last_zoom(&self) -> ZoomRange {
        self.last_zoom
    }

    /// Selection currently being dragged.
    #[must_use]
    pub fn drag_selection(&self) -> Option<&DragSelection> {
        self.pointer.selection()
    }

    /// Item under the pointer after the last move.
    #[must_use]
    pub fn hovered(&self) -> Option<&Hit> {
        self.hovered.as_ref()
    }

    /// Resting panel height: macro height plus zoom height while zoomed.
    #[must_use]
    pub fn height(&self) -> f64 {
        let mut height = self.macro_viewer.height();
        if self.zoom_enabled {
            height += self.zoom_viewer.height();
        }
        height
    }

    /// Panel height as currently displayed.
    #[must_use]
    pub fn displayed_height(&self) -> f64 {
        self.panel_value(PanelProperty::Height)
    }

    /// Residues covered by the macro viewer; zoom ranges stay inside it.
    fn macro_len(&self) -> f64 {
        self.axis.domain().1
    }

    fn panel_value(&self, key: PanelProperty) -> f64 {
        self.panel.value(key).unwrap_or_default()
    }

    fn ptm_tracks_mut(&mut self) -> impl Iterator<Item = &mut PtmTrack> {
        self.macro_viewer
            .ptm_tracks_mut()
            .chain(self.zoom_viewer.ptm_tracks_mut())
    }

    // ── Tracks ──────────────────────────────────────────────────────

    /// Animate the panel toward the current layout. Growing starts at
    /// once; shrinking waits for the tracks to collapse.
    fn animate_panel(&mut self, delay: Duration) {
        let phase = self.options.animation.transition();
        let macro_height = self.macro_viewer.height();
        let height = self.height();
        self.panel
            .animate(PanelProperty::ZoomBaseline, macro_height, delay, phase);
        self.panel
            .animate(PanelProperty::WindowBase, macro_height, delay, phase);
        self.panel.animate(PanelProperty::Height, height, delay, phase);
    }

    /// Show or hide a track in both viewers.
    ///
    /// Returns `Ok(false)` when the track already had that visibility.
    pub fn toggle_track(
        &mut self,
        name: &str,
        visible: bool,
    ) -> Result<bool, TrackError> {
        let changed = self.macro_viewer.toggle_track(name, visible)?;
        let _ = self.zoom_viewer.toggle_track(name, visible)?;
        if !changed {
            return Ok(false);
        }
        let delay = if visible {
            Duration::ZERO
        } else {
            self.options.animation.phases(2)
        };
        self.animate_panel(delay);
        Ok(true)
    }

    /// Show or hide every track.
    pub fn set_all_tracks(&mut self, visible: bool) {
        let names: Vec<String> = self
            .macro_viewer
            .tracks()
            .iter()
            .map(|t| t.name().to_owned())
            .collect();
        for name in names {
            if let Err(e) = self.toggle_track(&name, visible) {
                log::warn!("set all tracks: {e}");
            }
        }
    }

    // ── PTM filter ──────────────────────────────────────────────────

    fn refilter(&mut self, apply: impl Fn(&mut PtmTrack)) {
        let transition = self.options.animation.transition();
        for track in self.ptm_tracks_mut() {
            apply(track);
            track.update_values(transition);
        }
    }

    /// Switch a modification type in every PTM track.
    pub fn toggle_ptm(&mut self, mod_type: &str, enabled: bool) {
        self.refilter(|t| t.toggle_ptm(mod_type, enabled));
    }

    /// Switch an experiment in every PTM track.
    pub fn toggle_experiment(&mut self, experiment: &str, enabled: bool) {
        self.refilter(|t| t.toggle_experiment(experiment, enabled));
    }

    /// Switch every modification type.
    pub fn set_all_ptms(&mut self, enabled: bool) {
        self.refilter(|t| t.filter_mut().set_all_types(enabled));
    }

    /// Switch every experiment.
    pub fn set_all_experiments(&mut self, enabled: bool) {
        self.refilter(|t| t.filter_mut().set_all_experiments(enabled));
    }

    // ── Zoom ────────────────────────────────────────────────────────

    /// Zoom to `[start, start + width]`, padded and clamped to the
    /// residues the macro viewer shows. The first zoom reveals the zoom
    /// viewer.
    pub fn zoom_to(&mut self, start: f64, width: f64) -> ZoomRange {
        let range = ZoomRange::clamped(
            start,
            width,
            self.macro_len(),
            self.options.display.min_zoom_width,
        );
        self.last_zoom = range;
        if self.zoom_enabled {
            self.zoom_viewer.view_residues(range.start, range.width);
            if let Some(window) = self.zoom_window.as_mut() {
                window.update_window(range);
            }
        } else {
            self.zoom_on();
        }
        log::info!("zoomed to residues {}..{}", range.start, range.end());
        range
    }

    /// Reveal the zoom viewer over the last zoom range.
    pub fn zoom_on(&mut self) {
        if self.zoom_enabled {
            return;
        }
        let range = self.last_zoom;
        self.zoom_viewer.view_residues(range.start, range.width);
        self.zoom_enabled = true;
        let macro_height = self.macro_viewer.height();
        self.zoom_window = Some(ZoomWindow::new(self.last_zoom));
        self.panel.set(PanelProperty::ZoomBaseline, macro_height);
        self.panel.set(PanelProperty::WindowBase, macro_height);
        self.animate_panel(Duration::ZERO);
    }

    /// Collapse the zoom viewer, remembering its range for the next zoom.
    pub fn zoom_off(&mut self) {
        if !self.zoom_enabled {
            return;
        }
        self.zoom_enabled = false;
        if let Some(window) = &self.zoom_window {
            self.last_zoom = window.range();
        }
        if self.hovered.as_ref().is_some_and(|h| h.surface == Surface::Zoom) {
            self.hovered = None;
        }
        self.animate_panel(Duration::ZERO);
        if self.panel.is_idle() {
            self.zoom_window = None;
        }
        log::info!("zoom off");
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Execute one command. A click on a feature yields its action.
    pub fn execute(
        &mut self,
        command: ViewerCommand,
    ) -> Result<Option<ClickAction>, TrackError> {
        match command {
            ViewerCommand::ToggleTrack { name, visible } => {
                let _ = self.toggle_track(&name, visible)?;
            }
            ViewerCommand::SetAllTracks { visible } => self.set_all_tracks(visible),
            ViewerCommand::TogglePtm { mod_type, enabled } => {
                self.toggle_ptm(&mod_type, enabled);
            }
            ViewerCommand::ToggleExperiment {
                experiment,
                enabled,
            } => self.toggle_experiment(&experiment, enabled),
            ViewerCommand::SetAllPtms { enabled } => self.set_all_ptms(enabled),
            ViewerCommand::SetAllExperiments { enabled } => {
                self.set_all_experiments(enabled);
            }
            ViewerCommand::ZoomTo { start, width } => {
                let _ = self.zoom_to(start, width);
            }
            ViewerCommand::ZoomOff => self.zoom_off(),
            ViewerCommand::Pointer(event) => {
                let outcome = self
                    .pointer
                    .handle_event(event, self.macro_viewer.height());
                return Ok(self.handle_pointer(outcome));
            }
        }
        Ok(None)
    }

    fn handle_pointer(&mut self, outcome: PointerOutcome) -> Option<ClickAction> {
        match outcome {
            PointerOutcome::None | PointerOutcome::SelectionChanged => None,
            PointerOutcome::Hover(at) => {
                self.hovered = self.item_at(at.x, at.y);
                None
            }
            PointerOutcome::Selected(selection) => {
                let (start, end) = selection.residue_range(&self.axis);
                let _ = self.zoom_to(start, end - start);
                None
            }
            PointerOutcome::Click(at) => self.click(at.x, at.y),
        }
    }

    // ── Animation ───────────────────────────────────────────────────

    /// Advance every animation to clock time `now`. Returns `true` while
    /// anything is still moving.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut animating = self.panel.tick(now);
        animating |= self.macro_viewer.tick(now);
        animating |= self.zoom_viewer.tick(now);
        if !self.zoom_enabled && self.panel.is_idle() {
            self.zoom_window = None;
        }
        animating
    }

    /// Clock time at which every animation is at rest.
    #[must_use]
    pub fn settle_time(&self) -> Duration {
        self.panel
            .settle_time()
            .max(self.macro_viewer.settle_time())
            .max(self.zoom_viewer.settle_time())
    }

    /// Run every animation to rest.
    pub fn finish(&mut self) {
        let end = self.settle_time();
        let _ = self.tick(end);
    }
}
