//! Ruler track: backbone line, tick marks, and residue letters.

use std::sync::Arc;

use super::{strand, TrackContext, TrackRenderer};
use crate::axis::{Axis, ResidueWindow};
use crate::error::TrackError;
use crate::options::{ColorOptions, GeometryOptions};
use crate::protein_data::ProteinData;
use crate::renderer::primitive::text;
use crate::renderer::{ItemRef, Primitive, Shape, Style, TextAnchor};

/// Spacing between tick candidates, in residues.
const TICK_STEP: usize = 10;

/// Ticks of one pitch inside the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickLevel {
    /// Spacing in residues.
    pub pitch: u32,
    /// Whether the pitch is wide enough on screen to be drawn.
    pub legible: bool,
    /// Residue positions assigned to this level.
    pub positions: Vec<usize>,
}

/// Ruler along the sequence.
#[derive(Debug)]
pub struct ResidueTrack {
    data: Arc<ProteinData>,
    geometry: GeometryOptions,
    colors: ColorOptions,
    show_residues: bool,
    axis: Option<Axis>,
    viewport_width: f64,
    levels: Vec<TickLevel>,
    /// 0-based sequence index and letter of each drawn residue.
    letters: Vec<(usize, char)>,
    letter_px: f64,
}

impl ResidueTrack {
    /// Ruler over `ctx.data`.
    #[must_use]
    pub fn new(ctx: &TrackContext<'_>) -> Self {
        Self {
            data: Arc::clone(ctx.data),
            geometry: ctx.options.geometry.clone(),
            colors: ctx.options.colors.clone(),
            show_residues: ctx.show_residues,
            axis: None,
            viewport_width: ctx.options.display.viewport_width,
            levels: Vec::new(),
            letters: Vec::new(),
            letter_px: 0.0,
        }
    }

    /// Tick levels from the last update, coarsest first.
    #[must_use]
    pub fn levels(&self) -> &[TickLevel] {
        &self.levels
    }

    /// Residue letters from the last update.
    #[must_use]
    pub fn letters(&self) -> &[(usize, char)] {
        &self.letters
    }

    fn is_legible(&self, axis: &Axis, viewport_width: f64, pitch: u32) -> bool {
        let px = axis.span(0.0, f64::from(pitch)).abs();
        px > 0.0 && viewport_width / px < self.geometry.max_ticks_per_viewport
    }

    /// Assign every tick candidate inside the window to the first (coarsest)
    /// level whose pitch divides it.
    fn layout_ticks(
        &self,
        axis: &Axis,
        viewport_width: f64,
        window: ResidueWindow,
    ) -> Vec<TickLevel> {
        let mut levels: Vec<TickLevel> = self
            .geometry
            .tick_levels
            .iter()
            .map(|&pitch| TickLevel {
                pitch,
                legible: self.is_legible(axis, viewport_width, pitch),
                positions: Vec::new(),
            })
            .collect();
        for i in (TICK_STEP..self.data.len()).step_by(TICK_STEP) {
            if !window.contains(i as i64) {
                continue;
            }
            if let Some(level) = levels.iter_mut().find(|l| {
                l.pitch != 0 && i % l.pitch as usize == 0
            }) {
                level.positions.push(i);
            }
        }
        levels
    }

    fn layout_letters(&self, axis: &Axis, window: ResidueWindow) -> Vec<(usize, char)> {
        if !self.show_residues
            || axis.unit_width() < self.geometry.residue_letter_min_px
        {
            return Vec::new();
        }
        let first = usize::try_from(window.start.max(0)).unwrap_or(0);
        let past_end = usize::try_from(window.end.saturating_add(1))
            .unwrap_or(0)
            .min(self.data.len());
        (first..past_end)
            .filter_map(|i| self.data.seq.get(i).map(|&c| (i, c)))
            .collect()
    }
}

impl TrackRenderer for ResidueTrack {
    fn height(&self) -> f64 {
        self.geometry.residue_height
    }

    fn update_display(
        &mut self,
        axis: &Axis,
        viewport_width: f64,
    ) -> Result<(), TrackError> {
        let window = ResidueWindow::from_axis(axis, viewport_width)?;
        self.levels = self.layout_ticks(axis, viewport_width, window);
        self.letters = self.layout_letters(axis, window);
        self.letter_px = axis
            .unit_width()
            .min(self.geometry.residue_letter_max_font);
        self.axis = Some(*axis);
        self.viewport_width = viewport_width;
        Ok(())
    }

    fn primitives(&self, _: Option<&ItemRef>) -> Vec<Primitive> {
        let mut out = vec![strand(0.0, self.viewport_width, &self.colors.strand)];
        let Some(axis) = self.axis else {
            return out;
        };
        let tick = self.geometry.tick_size;
        for (level_idx, level) in self.levels.iter().enumerate() {
            if !level.legible {
                continue;
            }
            let color = self.colors.tick(level_idx);
            for &pos in &level.positions {
                let x = axis.map(pos as f64 - 0.5);
                out.push(Primitive::new(
                    Shape::Line {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: tick,
                    },
                    Style::stroked(color, 1.0),
                ));
                out.push(Primitive::new(
                    text(x, tick + 8.0, pos.to_string(), 8.0, TextAnchor::Middle),
                    Style::filled(color),
                ));
            }
        }
        for &(idx, letter) in &self.letters {
            out.push(Primitive::new(
                text(
                    axis.map(idx as f64 + 0.5),
                    -2.0,
                    letter.to_string(),
                    self.letter_px,
                    TextAnchor::Middle,
                ),
                Style::filled("#000000"),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::test_support::{full_axis, Harness};

    fn positions(track: &ResidueTrack, pitch: u32) -> Vec<usize> {
        track
            .levels()
            .iter()
            .find(|l| l.pitch == pitch)
            .map(|l| l.positions.clone())
            .unwrap_or_default()
    }

    #[test]
    fn each_position_gets_exactly_one_level() {
        let h = Harness::new();
        let mut track = ResidueTrack::new(&h.ctx(false));
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        assert_eq!(positions(&track, 100), vec![100]);
        assert_eq!(positions(&track, 50), vec![50, 150]);
        assert_eq!(positions(&track, 10).len(), 19 - 3);
        let total: usize =
            track.levels().iter().map(|l| l.positions.len()).sum();
        assert_eq!(total, 19);
    }

    #[test]
    fn only_wide_pitches_are_legible() {
        let h = Harness::new();
        let mut track = ResidueTrack::new(&h.ctx(false));
        // 4.5 px per residue: pitch 10 = 45px, 900/45 = 20 (not < 20)
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let legible: Vec<u32> = track
            .levels()
            .iter()
            .filter(|l| l.legible)
            .map(|l| l.pitch)
            .collect();
        assert_eq!(legible, vec![5000, 1000, 500, 100, 50]);
    }

    #[test]
    fn ticks_are_limited_to_window() {
        let h = Harness::new();
        let mut track = ResidueTrack::new(&h.ctx(true));
        let axis = full_axis(200.0).with_domain(95.0, 145.0);
        track.update_display(&axis, 900.0).unwrap();
        assert_eq!(positions(&track, 100), vec![100]);
        assert_eq!(positions(&track, 10), vec![110, 120, 130, 140]);
        assert!(positions(&track, 50).is_empty());
    }

    #[test]
    fn letters_need_room_and_permission() {
        let h = Harness::new();
        let zoomed = full_axis(200.0).with_domain(0.0, 50.0);

        let mut hidden = ResidueTrack::new(&h.ctx(false));
        hidden.update_display(&zoomed, 900.0).unwrap();
        assert!(hidden.letters().is_empty());

        let mut crowded = ResidueTrack::new(&h.ctx(true));
        crowded.update_display(&full_axis(200.0), 900.0).unwrap();
        assert!(crowded.letters().is_empty());

        let mut shown = ResidueTrack::new(&h.ctx(true));
        shown.update_display(&zoomed, 900.0).unwrap();
        assert_eq!(shown.letters().len(), 51);
        assert_eq!(shown.letters()[0], (0, 'M'));
        let glyphs = shown.primitives(None);
        let font = glyphs.iter().find_map(|p| match &p.shape {
            Shape::Text {
                content, font_size, ..
            } if content == "M" => Some(*font_size),
            _ => None,
        });
        assert_eq!(font, Some(16.0));
    }

    #[test]
    fn tick_is_drawn_between_residues() {
        let h = Harness::new();
        let mut track = ResidueTrack::new(&h.ctx(false));
        track.update_display(&full_axis(200.0), 900.0).unwrap();
        let axis = full_axis(200.0);
        let expected = axis.map(99.5);
        assert!(track.primitives(None).iter().any(|p| matches!(
            p.shape,
            Shape::Line { x1, y2, .. } if (x1 - expected).abs() < 1e-9 && y2 == 5.0
        )));
    }
}
