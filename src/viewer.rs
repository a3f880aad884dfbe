//! Ordered stack of tracks sharing one axis.
//!
//! A [`TrackViewer`] owns its [`Axis`], its tracks in stack order, and a
//! timeline holding each track's displayed vertical offset, horizontal shift
//! and opacity. Layout targets are derived synchronously from the visible
//! set; toggles only schedule tweens toward those targets.
//!
//! Toggle choreography, each phase one transition long:
//!
//! | phase | hide                         | show                                     |
//! |-------|------------------------------|------------------------------------------|
//! | 1     | fade out                     | others reposition, track moves to its slot offscreen |
//! | 2     | slide offscreen              | slide in                                 |
//! | 3     | remaining tracks close up    | fade in                                  |

use web_time::Duration;

use crate::animation::AnimationTimeline;
use crate::axis::Axis;
use crate::error::TrackError;
use crate::options::AnimationOptions;
use crate::renderer::{Frame, ItemRef, Layer};
use crate::tracks::{
    ClickAction, PtmTrack, Tooltip, Track, TrackId, TrackLayer, TrackRenderer,
};

/// Animated per-track display property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackProperty {
    /// Vertical offset from the viewer baseline.
    OffsetY(TrackId),
    /// Horizontal shift; non-zero while sliding in or out.
    ShiftX(TrackId),
    /// Opacity.
    Opacity(TrackId),
}

/// Stack of tracks along one axis.
#[derive(Debug)]
pub struct TrackViewer {
    name: String,
    axis: Axis,
    viewport_width: f64,
    tracks: Vec<Track>,
    next_id: TrackId,
    timeline: AnimationTimeline<TrackProperty>,
    transition: Duration,
}

impl TrackViewer {
    /// Empty viewer named `name` (used in layer ids and log lines).
    #[must_use]
    pub fn new(
        name: &str,
        axis: Axis,
        viewport_width: f64,
        animation: &AnimationOptions,
    ) -> Self {
        Self {
            name: name.to_owned(),
            axis,
            viewport_width,
            tracks: Vec::new(),
            next_id: 0,
            timeline: animation.timeline(),
            transition: animation.transition(),
        }
    }

    /// Viewer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current axis.
    #[must_use]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Tracks in stack order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by name.
    #[must_use]
    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name() == name)
    }

    /// Look up a track by name, mutably.
    pub fn track_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name() == name)
    }

    /// Every PTM layer in the stack.
    pub fn ptm_tracks_mut(&mut self) -> impl Iterator<Item = &mut PtmTrack> {
        self.tracks
            .iter_mut()
            .filter_map(|t| t.layer_mut().as_ptm_mut())
    }

    /// Append a visible track and place it below the current stack.
    pub fn add_track(&mut self, name: &str, mut layer: TrackLayer) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        if let Err(e) = layer.update_display(&self.axis, self.viewport_width) {
            log::warn!("{}: track {name:?} failed initial update: {e}", self.name);
        }
        let offset = self.height();
        self.tracks.push(Track::new(id, name, layer));
        self.timeline.set(TrackProperty::OffsetY(id), offset);
        self.timeline.set(TrackProperty::ShiftX(id), 0.0);
        self.timeline.set(TrackProperty::Opacity(id), 1.0);
        log::debug!("{}: added track {name:?} (id {id}) at {offset}", self.name);
        id
    }

    /// Sum of heights of the visible tracks above `name`.
    pub fn track_position(&self, name: &str) -> Result<f64, TrackError> {
        let mut pos = 0.0;
        for track in &self.tracks {
            if track.name() == name {
                return Ok(pos);
            }
            if track.is_visible() {
                pos += track.height();
            }
        }
        Err(TrackError::UnknownTrack(name.to_owned()))
    }

    /// Sum of heights of every visible track.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.tracks
            .iter()
            .filter(|t| t.is_visible())
            .map(Track::height)
            .sum()
    }

    /// Resting offset of every track, in stack order.
    fn slots(&self) -> Vec<f64> {
        let mut pos = 0.0;
        self.tracks
            .iter()
            .map(|t| {
                let slot = pos;
                if t.is_visible() {
                    pos += t.height();
                }
                slot
            })
            .collect()
    }

    fn offscreen_x(&self) -> f64 {
        self.viewport_width
    }

    /// Retarget the axis to `[start, start + width]` and refresh every
    /// track in stack order. A failing track is logged and skipped.
    pub fn view_residues(&mut self, start: f64, width: f64) {
        self.axis.set_domain(start, start + width);
        for track in &mut self.tracks {
            if let Err(e) = track
                .layer_mut()
                .update_display(&self.axis, self.viewport_width)
            {
                log::warn!(
                    "{}: track {:?} failed to update: {e}",
                    self.name,
                    track.name()
                );
            }
        }
        log::debug!("{}: viewing residues {start}..{}", self.name, start + width);
    }

    /// Change a track's visibility without animation.
    pub fn set_track_visible(
        &mut self,
        name: &str,
        visible: bool,
    ) -> Result<(), TrackError> {
        self.track_mut(name)
            .ok_or_else(|| TrackError::UnknownTrack(name.to_owned()))?
            .set_visible(visible);
        let offscreen = self.offscreen_x();
        for (track, slot) in self.tracks.iter().zip(self.slots()) {
            let id = track.id();
            let shown = track.is_visible();
            self.timeline.set(TrackProperty::OffsetY(id), slot);
            self.timeline
                .set(TrackProperty::ShiftX(id), if shown { 0.0 } else { offscreen });
            self.timeline
                .set(TrackProperty::Opacity(id), if shown { 1.0 } else { 0.0 });
        }
        Ok(())
    }

    /// Show or hide a track with the three-phase choreography.
    ///
    /// Returns `Ok(false)` when the track already has the requested
    /// visibility.
    pub fn toggle_track(
        &mut self,
        name: &str,
        visible: bool,
    ) -> Result<bool, TrackError> {
        let track = self
            .track_mut(name)
            .ok_or_else(|| TrackError::UnknownTrack(name.to_owned()))?;
        if track.is_visible() == visible {
            return Ok(false);
        }
        track.set_visible(visible);
        let id = track.id();
        let phase = self.transition;
        let slots = self.slots();

        if visible {
            for (track, &slot) in self.tracks.iter().zip(&slots) {
                if track.is_visible() {
                    self.timeline.animate(
                        TrackProperty::OffsetY(track.id()),
                        slot,
                        Duration::ZERO,
                        phase,
                    );
                }
            }
            // a hidden track already rests offscreen; hold there for phase 1
            self.timeline
                .animate(TrackProperty::ShiftX(id), 0.0, phase, phase);
            self.timeline
                .animate(TrackProperty::Opacity(id), 1.0, phase * 2, phase);
        } else {
            let offscreen = self.offscreen_x();
            self.timeline
                .animate(TrackProperty::Opacity(id), 0.0, Duration::ZERO, phase);
            self.timeline
                .animate(TrackProperty::ShiftX(id), offscreen, phase, phase);
            for (track, &slot) in self.tracks.iter().zip(&slots) {
                self.timeline.animate(
                    TrackProperty::OffsetY(track.id()),
                    slot,
                    phase * 2,
                    phase,
                );
            }
        }
        log::info!(
            "{}: {} track {name:?}, stack height now {}",
            self.name,
            if visible { "showing" } else { "hiding" },
            self.height()
        );
        Ok(true)
    }

    /// Advance every animation to clock time `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut animating = self.timeline.tick(now);
        for track in &mut self.tracks {
            animating |= track.layer_mut().tick(now);
        }
        animating
    }

    /// Clock time at which every animation in the viewer is at rest.
    #[must_use]
    pub fn settle_time(&self) -> Duration {
        self.tracks
            .iter()
            .filter_map(|t| t.layer().settle_time())
            .fold(self.timeline.settle_time(), Duration::max)
    }

    /// Displayed vertical offset of a track.
    #[must_use]
    pub fn displayed_offset(&self, id: TrackId) -> f64 {
        self.timeline.value(TrackProperty::OffsetY(id)).unwrap_or(0.0)
    }

    /// Displayed horizontal shift of a track.
    #[must_use]
    pub fn displayed_shift(&self, id: TrackId) -> f64 {
        self.timeline.value(TrackProperty::ShiftX(id)).unwrap_or(0.0)
    }

    /// Displayed opacity of a track.
    #[must_use]
    pub fn displayed_opacity(&self, id: TrackId) -> f64 {
        self.timeline.value(TrackProperty::Opacity(id)).unwrap_or(1.0)
    }

    fn layer_for(&self, track: &Track, hovered: Option<&ItemRef>) -> Layer {
        let id = track.id();
        Layer::new(
            format!("{}-track{id}", self.name),
            track.layer().primitives(hovered),
        )
        .at(self.displayed_shift(id), self.displayed_offset(id))
        .faded(self.displayed_opacity(id))
    }

    /// Layers of every track that is at least partly opaque.
    ///
    /// `hovered` highlights one item of one track.
    #[must_use]
    pub fn frame(&self, hovered: Option<(TrackId, &ItemRef)>) -> Frame {
        let mut frame = Frame::new(self.viewport_width, self.height());
        for track in &self.tracks {
            if self.displayed_opacity(track.id()) <= 0.0 {
                continue;
            }
            let highlight = hovered
                .filter(|(id, _)| *id == track.id())
                .map(|(_, item)| item);
            frame.push(self.layer_for(track, highlight));
        }
        frame
    }

    /// Topmost interactive item under viewer-local point `(x, y)`.
    #[must_use]
    pub fn item_at(&self, x: f64, y: f64) -> Option<(TrackId, ItemRef)> {
        self.tracks.iter().rev().find_map(|track| {
            self.layer_for(track, None)
                .item_at(x, y)
                .map(|item| (track.id(), item.clone()))
        })
    }

    fn by_id(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Hover text for an item of track `id`.
    #[must_use]
    pub fn tooltip(&self, id: TrackId, item: &ItemRef) -> Option<Tooltip> {
        self.by_id(id)?.layer().tooltip(item)
    }

    /// Click action for an item of track `id`.
    #[must_use]
    pub fn click(&self, id: TrackId, item: &ItemRef) -> Option<ClickAction> {
        self.by_id(id)?.layer().click(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;
    use crate::tracks::test_support::Harness;
    use crate::tracks::{EmptyTrack, TrackKind};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn linear() -> AnimationOptions {
        AnimationOptions {
            easing: EasingFunction::Linear,
            ..AnimationOptions::default()
        }
    }

    /// Viewer with spacer tracks "a", "b", "c" of heights 30, 60, 20.
    fn stack() -> TrackViewer {
        let mut viewer = TrackViewer::new(
            "macro",
            Axis::new((0.0, 200.0), (0.0, 900.0)),
            900.0,
            &linear(),
        );
        for (name, h) in [("a", 30.0), ("b", 60.0), ("c", 20.0)] {
            let _ = viewer.add_track(name, TrackLayer::Empty(EmptyTrack::new(h)));
        }
        viewer
    }

    fn offsets(viewer: &TrackViewer) -> Vec<f64> {
        viewer
            .tracks()
            .iter()
            .map(|t| viewer.displayed_offset(t.id()))
            .collect()
    }

    fn settle(viewer: &mut TrackViewer) {
        let end = viewer.settle_time();
        let _ = viewer.tick(end);
    }

    #[test]
    fn add_track_stacks_offsets() {
        let viewer = stack();
        assert_eq!(offsets(&viewer), vec![0.0, 30.0, 90.0]);
        assert_eq!(viewer.height(), 110.0);
        assert_eq!(viewer.track_position("c").unwrap(), 90.0);
        assert!(matches!(
            viewer.track_position("zzz"),
            Err(TrackError::UnknownTrack(_))
        ));
    }

    #[test]
    fn hiding_middle_track_closes_the_gap() {
        let mut viewer = stack();
        assert!(viewer.toggle_track("b", false).unwrap());
        assert_eq!(viewer.height(), 50.0);
        assert_eq!(viewer.track_position("c").unwrap(), 30.0);
        settle(&mut viewer);
        let c = viewer.track("c").map(Track::id).unwrap_or_default();
        assert_eq!(viewer.displayed_offset(c), 30.0);
        assert!(viewer.frame(None).layers.iter().all(|l| !l.name.ends_with("track1")));
    }

    #[test]
    fn hide_choreography_runs_in_three_phases() {
        let mut viewer = stack();
        let _ = viewer.toggle_track("b", false);
        let _ = viewer.tick(ms(125));
        assert!((viewer.displayed_opacity(1) - 0.5).abs() < 1e-9);
        assert_eq!(viewer.displayed_shift(1), 0.0);
        assert_eq!(viewer.displayed_offset(2), 90.0);

        let _ = viewer.tick(ms(375));
        assert_eq!(viewer.displayed_opacity(1), 0.0);
        assert!((viewer.displayed_shift(1) - 450.0).abs() < 1e-9);
        assert_eq!(viewer.displayed_offset(2), 90.0);

        let _ = viewer.tick(ms(625));
        assert_eq!(viewer.displayed_shift(1), 900.0);
        assert!((viewer.displayed_offset(2) - 60.0).abs() < 1e-9);

        assert!(!viewer.tick(ms(750)));
        assert_eq!(viewer.displayed_offset(2), 30.0);
    }

    #[test]
    fn show_choreography_runs_in_three_phases() {
        let mut viewer = stack();
        viewer.set_track_visible("b", false).unwrap();
        assert_eq!(offsets(&viewer), vec![0.0, 30.0, 30.0]);
        let _ = viewer.toggle_track("b", true);

        let _ = viewer.tick(ms(125));
        assert!((viewer.displayed_offset(2) - 60.0).abs() < 1e-9);
        assert_eq!(viewer.displayed_shift(1), 900.0);
        assert_eq!(viewer.displayed_opacity(1), 0.0);

        let _ = viewer.tick(ms(375));
        assert_eq!(viewer.displayed_offset(2), 90.0);
        assert!((viewer.displayed_shift(1) - 450.0).abs() < 1e-9);
        assert_eq!(viewer.displayed_opacity(1), 0.0);

        let _ = viewer.tick(ms(625));
        assert_eq!(viewer.displayed_shift(1), 0.0);
        assert!((viewer.displayed_opacity(1) - 0.5).abs() < 1e-9);

        settle(&mut viewer);
        assert_eq!(viewer.displayed_opacity(1), 1.0);
        assert_eq!(offsets(&viewer), vec![0.0, 30.0, 90.0]);
    }

    #[test]
    fn show_then_hide_restores_offsets() {
        let mut viewer = stack();
        viewer.set_track_visible("b", false).unwrap();
        let before = offsets(&viewer);
        let _ = viewer.toggle_track("b", true);
        settle(&mut viewer);
        let _ = viewer.toggle_track("b", false);
        settle(&mut viewer);
        assert_eq!(offsets(&viewer), before);
        assert_eq!(viewer.height(), 50.0);
    }

    #[test]
    fn repeated_toggle_is_a_no_op() {
        let mut viewer = stack();
        assert!(viewer.toggle_track("a", false).unwrap());
        assert!(!viewer.toggle_track("a", false).unwrap());
        assert!(viewer.toggle_track("nope", true).is_err());
    }

    #[test]
    fn toggles_mid_animation_converge_without_overlap() {
        let mut viewer = stack();
        let _ = viewer.toggle_track("a", false);
        let _ = viewer.tick(ms(100));
        let _ = viewer.toggle_track("b", false);
        let _ = viewer.tick(ms(400));
        let _ = viewer.toggle_track("a", true);
        let _ = viewer.tick(ms(420));
        let _ = viewer.toggle_track("b", true);
        let _ = viewer.tick(ms(600));
        let _ = viewer.toggle_track("b", false);
        settle(&mut viewer);

        let expected: Vec<f64> = ["a", "b", "c"]
            .iter()
            .map(|n| viewer.track_position(n).unwrap())
            .collect();
        assert_eq!(offsets(&viewer), expected);
        assert_eq!(viewer.height(), 50.0);
        // visible tracks at rest do not overlap
        let mut spans: Vec<(f64, f64)> = viewer
            .tracks()
            .iter()
            .filter(|t| t.is_visible())
            .map(|t| {
                let y = viewer.displayed_offset(t.id());
                (y, y + t.height())
            })
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert!(spans.windows(2).all(|w| w[0].1 <= w[1].0));
        assert_eq!(viewer.displayed_opacity(1), 0.0);
        assert_eq!(viewer.displayed_opacity(0), 1.0);
    }

    #[test]
    fn view_residues_retargets_axis_and_tracks() {
        let h = Harness::new();
        let ctx = h.ctx(true);
        let mut viewer = TrackViewer::new(
            "zoom",
            Axis::new((0.0, 200.0), (0.0, 900.0)),
            900.0,
            &linear(),
        );
        let _ = viewer.add_track("PTMs", TrackLayer::create("PTMs", &TrackKind::Ptm, &ctx));
        viewer.view_residues(100.0, 50.0);
        assert_eq!(viewer.axis().domain(), (100.0, 150.0));
        assert_eq!(viewer.axis().range(), (0.0, 900.0));
        let visible = viewer
            .track("PTMs")
            .and_then(|t| t.layer().as_ptm())
            .map(|p| p.visible_sites().to_vec());
        assert_eq!(visible, Some(vec![120]));
    }

    #[test]
    fn failing_track_update_is_isolated() {
        let h = Harness::new();
        let ctx = h.ctx(true);
        let mut viewer = TrackViewer::new(
            "zoom",
            Axis::new((0.0, 200.0), (0.0, 900.0)),
            900.0,
            &linear(),
        );
        let ptm = viewer.add_track("PTMs", TrackLayer::create("PTMs", &TrackKind::Ptm, &ctx));
        let _ = viewer.add_track("None", TrackLayer::Empty(EmptyTrack::new(50.0)));
        let _ = viewer.add_track(
            "Residues",
            TrackLayer::create("Residues", &TrackKind::Residue, &ctx),
        );
        let visible_sites = |v: &TrackViewer| {
            v.track("PTMs")
                .and_then(|t| t.layer().as_ptm())
                .map(|p| p.visible_sites().to_vec())
        };
        let before = viewer.frame(None);

        // every data layer rejects the window; the spacer does not care
        viewer.view_residues(f64::NAN, 50.0);
        assert_eq!(visible_sites(&viewer), Some(vec![50, 120]));
        assert_eq!(viewer.height(), 180.0);
        let after = viewer.frame(None);
        assert_eq!(after.layers.len(), 3);
        assert_eq!(after.primitive_count(), before.primitive_count());
        assert_eq!(viewer.item_at(49.0 * 4.5 + 1.0, 60.0), Some((ptm, ItemRef::PtmSite(50))));

        viewer.view_residues(100.0, 50.0);
        assert_eq!(viewer.axis().domain(), (100.0, 150.0));
        assert_eq!(visible_sites(&viewer), Some(vec![120]));
        assert!(viewer.toggle_track("None", false).unwrap());
        settle(&mut viewer);
        assert_eq!(viewer.track_position("Residues").unwrap(), 100.0);
    }

    #[test]
    fn hit_testing_resolves_track_and_item() {
        let h = Harness::new();
        let ctx = h.ctx(false);
        let mut viewer = TrackViewer::new(
            "macro",
            Axis::new((0.0, 200.0), (0.0, 900.0)),
            900.0,
            &linear(),
        );
        let _ = viewer.add_track("None", TrackLayer::Empty(EmptyTrack::new(50.0)));
        let ptm = viewer.add_track("PTMs", TrackLayer::create("PTMs", &TrackKind::Ptm, &ctx));
        // residue 120 bar: x in [535.5, 540], full 2-type bar from y 0 to 100
        let hit = viewer.item_at(537.0, 50.0 + 60.0);
        assert_eq!(hit, Some((ptm, ItemRef::PtmSite(120))));
        assert_eq!(viewer.item_at(537.0, 20.0), None);
        let tip = viewer.tooltip(ptm, &ItemRef::PtmSite(120));
        assert!(tip.is_some());
    }
}
