//! Post-translational modification track.
//!
//! Each modified residue is drawn as a bar whose height is the number of
//! *enabled* modification types at that site. A type is enabled when its own
//! toggle is on and at least one of its evidences comes from an experiment
//! whose toggle is on. Counts are animated through the track's own timeline
//! whenever the filter changes.

use std::collections::BTreeMap;
use std::sync::Arc;

use web_time::Duration;

use super::{track_label, ClickAction, TrackContext, TrackRenderer, Tooltip};
use crate::animation::AnimationTimeline;
use crate::axis::{Axis, ResidueWindow};
use crate::error::TrackError;
use crate::options::{ColorOptions, GeometryOptions};
use crate::protein_data::{ExperimentId, KinaseLoop, ModSite, ProteinData};
use crate::renderer::primitive::rect;
use crate::renderer::{residue_color, ItemRef, Primitive, Style};

/// Type-level and experiment-level toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtmFilter {
    types: BTreeMap<String, bool>,
    experiments: BTreeMap<ExperimentId, bool>,
}

impl PtmFilter {
    /// Filter with every type in `mod_types` and every experiment in
    /// `exps` enabled.
    ///
    /// Types and experiments that sites reference but the payload does not
    /// list start out unknown and therefore disabled: they stop counting
    /// after the first [`PtmTrack::update_values`] until switched on.
    #[must_use]
    pub fn new(data: &ProteinData) -> Self {
        Self {
            types: data.mod_types.iter().map(|t| (t.clone(), true)).collect(),
            experiments: data
                .experiments
                .keys()
                .map(|e| (e.clone(), true))
                .collect(),
        }
    }

    /// Switch one modification type, registering it if unknown. Returns
    /// whether the type was already known.
    pub fn set_type(&mut self, name: &str, on: bool) -> bool {
        self.types.insert(name.to_owned(), on).is_some()
    }

    /// Switch one experiment, registering it if unknown. Returns whether
    /// the experiment was already known.
    pub fn set_experiment(&mut self, id: &str, on: bool) -> bool {
        self.experiments.insert(id.to_owned(), on).is_some()
    }

    /// Switch every modification type.
    pub fn set_all_types(&mut self, on: bool) {
        self.types.values_mut().for_each(|mode| *mode = on);
    }

    /// Switch every experiment.
    pub fn set_all_experiments(&mut self, on: bool) {
        self.experiments.values_mut().for_each(|mode| *mode = on);
    }

    /// Whether a modification type is switched on.
    #[must_use]
    pub fn type_enabled(&self, name: &str) -> bool {
        self.types.get(name).copied().unwrap_or(false)
    }

    /// Whether an experiment is switched on.
    #[must_use]
    pub fn experiment_enabled(&self, id: &str) -> bool {
        self.experiments.get(id).copied().unwrap_or(false)
    }

    /// Known modification types in name order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Known experiment ids in id order.
    pub fn experiments(&self) -> impl Iterator<Item = &str> {
        self.experiments.keys().map(String::as_str)
    }

    /// Number of enabled modification types at a site.
    #[must_use]
    pub fn enabled_count(&self, site: &ModSite) -> usize {
        site.mods
            .iter()
            .filter(|(ty, evidence)| {
                self.type_enabled(ty)
                    && evidence
                        .iter()
                        .any(|ev| self.experiment_enabled(&ev.experiment))
            })
            .count()
    }
}

/// Annotation icon shown next to an evidence row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationBadge {
    /// Hover title of the icon.
    pub title: &'static str,
    /// Icon location, from the payload's image URL template.
    pub image_url: String,
}

fn annotation_badges(data: &ProteinData, site_pos: usize) -> Vec<AnnotationBadge> {
    let mut badges = Vec::new();
    let mut push = |title: &'static str, file: &str| {
        badges.push(AnnotationBadge {
            title,
            image_url: data.image_url(file),
        });
    };
    if data.is_mutated(site_pos) {
        push("This residue has recorded natural variants", "red_flag.jpg");
    }
    if data.in_kinase_domain(site_pos) {
        push("This residue is in a Pfam kinase domain", "kinase.jpg");
    }
    match data.kinase_loop(site_pos) {
        Some(KinaseLoop::Confirmed) => push(
            "This residue is in a predicted kinase activation loop",
            "active.jpg",
        ),
        Some(KinaseLoop::Possible) => push(
            "This residue is in a possible kinase activation loop",
            "question.jpg",
        ),
        None => {}
    }
    badges
}

/// One row of the evidence table shown for a clicked PTM site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceRow {
    /// Site label, residue letter followed by its index.
    pub site: String,
    /// 1-indexed residue.
    pub site_pos: usize,
    /// Peptide around the site.
    pub peptide: String,
    /// Modification type.
    pub mod_type: String,
    /// Experiment id.
    pub experiment: ExperimentId,
    /// Experiment display name.
    pub experiment_name: String,
    /// Link to the experiment.
    pub experiment_url: Option<String>,
    /// Whether measurement data exists.
    pub has_data: bool,
    /// Link to the measurement data, when it exists.
    pub data_url: Option<String>,
    /// The residue carries a recorded natural variant.
    pub is_mutated: bool,
    /// The residue sits in a Pfam kinase domain.
    pub in_kinase_domain: bool,
    /// The residue sits in a kinase activation loop.
    pub kinase_loop: Option<KinaseLoop>,
    /// Icons for the flags above, in table order.
    pub annotations: Vec<AnnotationBadge>,
}

/// Modification count bars.
#[derive(Debug)]
pub struct PtmTrack {
    name: String,
    data: Arc<ProteinData>,
    geometry: GeometryOptions,
    colors: ColorOptions,
    filter: PtmFilter,
    /// Maps a modification count to a bar top.
    yscale: Axis,
    counts: AnimationTimeline<usize>,
    visible: Vec<usize>,
    axis: Option<Axis>,
    viewport_width: f64,
}

impl PtmTrack {
    /// PTM track with every type and experiment enabled.
    #[must_use]
    pub fn new(name: &str, ctx: &TrackContext<'_>) -> Self {
        let data = Arc::clone(ctx.data);
        let geometry = ctx.options.geometry.clone();
        let max_mods = data.mods.values().map(|s| s.mods.len()).max().unwrap_or(0);
        let yscale = Axis::new(
            (0.0, max_mods as f64),
            (
                geometry.ptm_height,
                geometry.ptm_height - geometry.ptm_bar_height,
            ),
        );
        let mut counts = ctx.options.animation.timeline();
        for (&site, mods) in &data.mods {
            counts.set(site, mods.mods.len() as f64);
        }
        Self {
            name: name.to_owned(),
            filter: PtmFilter::new(&data),
            data,
            geometry,
            colors: ctx.options.colors.clone(),
            yscale,
            counts,
            visible: Vec::new(),
            axis: None,
            viewport_width: ctx.options.display.viewport_width,
        }
    }

    /// Current filter state.
    #[must_use]
    pub fn filter(&self) -> &PtmFilter {
        &self.filter
    }

    /// Mutable filter state. Call [`Self::update_values`] afterwards.
    pub fn filter_mut(&mut self) -> &mut PtmFilter {
        &mut self.filter
    }

    /// Switch a modification type.
    pub fn toggle_ptm(&mut self, name: &str, on: bool) {
        if !self.filter.set_type(name, on) {
            log::debug!("{}: registered modification type {name:?}", self.name);
        }
    }

    /// Switch an experiment.
    pub fn toggle_experiment(&mut self, id: &str, on: bool) {
        if !self.filter.set_experiment(id, on) {
            log::debug!("{}: registered experiment {id:?}", self.name);
        }
    }

    /// Recompute every site's enabled count and animate bars toward it.
    pub fn update_values(&mut self, transition: Duration) {
        for (&site, mods) in &self.data.mods {
            let target = self.filter.enabled_count(mods) as f64;
            self.counts.animate(site, target, Duration::ZERO, transition);
        }
        log::debug!(
            "{}: PTM counts retargeted over {transition:?}",
            self.name
        );
    }

    /// Displayed (possibly mid-animation) count at a site.
    #[must_use]
    pub fn count(&self, site: usize) -> Option<f64> {
        self.counts.value(site)
    }

    /// Count a site's bar is heading toward.
    #[must_use]
    pub fn target_count(&self, site: usize) -> Option<f64> {
        self.counts.target(site)
    }

    /// Sites inside the window of the last update.
    #[must_use]
    pub fn visible_sites(&self) -> &[usize] {
        &self.visible
    }

    /// Evidence table rows for a site, one per evidence record.
    #[must_use]
    pub fn site_details(&self, site_pos: usize) -> Vec<EvidenceRow> {
        let Some(site) = self.data.mods.get(&site_pos) else {
            return Vec::new();
        };
        let data = &self.data;
        let is_mutated = data.is_mutated(site_pos);
        let in_kinase_domain = data.in_kinase_domain(site_pos);
        let kinase_loop = data.kinase_loop(site_pos);
        let annotations = &annotation_badges(data, site_pos);
        site.mods
            .iter()
            .flat_map(|(mod_type, evidence)| {
                evidence.iter().map(move |ev| EvidenceRow {
                    site: format!("{}{site_pos}", site.residue),
                    site_pos,
                    peptide: site.peptide.clone(),
                    mod_type: mod_type.clone(),
                    experiment: ev.experiment.clone(),
                    experiment_name: data
                        .experiment_name(&ev.experiment)
                        .to_owned(),
                    experiment_url: ev.experiment_url.clone(),
                    has_data: ev.has_data,
                    data_url: ev
                        .has_data
                        .then_some(data.protein_data_url.as_deref())
                        .flatten()
                        .map(|url| {
                            format!(
                                "{url}?experiment_id={}&site_pos={site_pos}",
                                ev.experiment
                            )
                        }),
                    is_mutated,
                    in_kinase_domain,
                    kinase_loop,
                    annotations: annotations.clone(),
                })
            })
            .collect()
    }

    fn site_tooltip(&self, site_pos: usize) -> Option<Tooltip> {
        let site = self.data.mods.get(&site_pos)?;
        let types: Vec<&str> = site.mods.keys().map(String::as_str).collect();
        Some(Tooltip::new(vec![
            format!("Residue: {}{site_pos}", site.residue),
            format!("15-mer: {}", site.peptide),
            format!("Modifications: {}", types.join(", ")),
        ]))
    }
}

impl TrackRenderer for PtmTrack {
    fn height(&self) -> f64 {
        self.geometry.ptm_height
    }

    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError> {
        let window = ResidueWindow::from_axis(axis, viewport_width)?;
        self.visible = self
            .data
            .mods
            .keys()
            .copied()
            .filter(|&k| window.contains(k as i64))
            .collect();
        self.axis = Some(*axis);
        self.viewport_width = viewport_width;
        Ok(())
    }

    fn primitives(&self, hovered: Option<&ItemRef>) -> Vec<Primitive> {
        let mut out = vec![track_label(&self.name, 0.0, &self.colors.track_label)];
        let Some(axis) = self.axis else {
            return out;
        };
        let width = axis.unit_width().max(self.geometry.min_bar_width);
        let base = self.yscale.map(0.0);
        for &k in &self.visible {
            let Some(site) = self.data.mods.get(&k) else {
                continue;
            };
            let top = self.yscale.map(self.counts.value(k).unwrap_or(0.0));
            let item = ItemRef::PtmSite(k);
            let opacity = if hovered == Some(&item) { 0.8 } else { 1.0 };
            out.push(
                Primitive::new(
                    rect(axis.map(k as f64 - 1.0), top, width, base - top),
                    Style::filled(residue_color(site.residue)).with_opacity(opacity),
                )
                .with_item(item),
            );
        }
        out
    }

    fn tooltip(&self, item: &ItemRef) -> Option<Tooltip> {
        match item {
            ItemRef::PtmSite(k) => self.site_tooltip(*k),
            _ => None,
        }
    }

    fn click(&self, item: &ItemRef) -> Option<ClickAction> {
        match item {
            ItemRef::PtmSite(k) if self.data.mods.contains_key(k) => {
                Some(ClickAction::PtmDetails(self.site_details(*k)))
            }
            _ => None,
        }
    }

    fn tick(&mut self, now: Duration) -> bool {
        self.counts.tick(now)
    }

    fn settle_time(&self) -> Option<Duration> {
        Some(self.counts.settle_time())
    }
}
