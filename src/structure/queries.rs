//! Read-only views of the structure viewer: frames, hit testing, export.

use std::path::Path;

use super::{Hit, PanelProperty, StructureViewer, Surface};
use crate::error::TrackError;
use crate::renderer::svg_export::{save_svg, to_svg_string};
use crate::renderer::{Frame, ItemRef, Layer};
use crate::tracks::{ClickAction, Tooltip, TrackId};
use crate::viewer::TrackViewer;

impl StructureViewer {
    fn surface(&self, surface: Surface) -> &TrackViewer {
        match surface {
            Surface::Macro => &self.macro_viewer,
            Surface::Zoom => &self.zoom_viewer,
        }
    }

    /// The zoom viewer is drawn while enabled and while collapsing.
    fn zoom_drawn(&self) -> bool {
        self.zoom_enabled || self.zoom_window.is_some()
    }

    fn hovered_on(&self, surface: Surface) -> Option<(TrackId, &ItemRef)> {
        self.hovered
            .as_ref()
            .filter(|h| h.surface == surface)
            .map(|h| (h.track, &h.item))
    }

    /// Everything visible at the current animation instant, back to front:
    /// zoom window, macro tracks, zoom tracks, drag selection.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let viewport_width = self.options.display.viewport_width;
        let colors = &self.options.colors;
        let mut frame = Frame::new(viewport_width, self.displayed_height());
        if let Some(window) = &self.zoom_window {
            frame.push(Layer::new(
                "zoom-window",
                window.primitives(
                    &self.axis,
                    self.panel_value(PanelProperty::WindowBase),
                    viewport_width,
                    &colors.zoom_window,
                ),
            ));
        }
        frame.extend_shifted(
            self.macro_viewer.frame(self.hovered_on(Surface::Macro)),
            0.0,
        );
        if self.zoom_drawn() {
            frame.extend_shifted(
                self.zoom_viewer.frame(self.hovered_on(Surface::Zoom)),
                self.panel_value(PanelProperty::ZoomBaseline),
            );
        }
        if let Some(selection) = self.pointer.selection() {
            frame.push(Layer::new(
                "drag-selection",
                vec![selection.primitive(self.macro_viewer.height(), &colors.selection)],
            ));
        }
        frame
    }

    /// Feature item under panel point `(x, y)`.
    #[must_use]
    pub fn item_at(&self, x: f64, y: f64) -> Option<Hit> {
        let baseline = self.panel_value(PanelProperty::ZoomBaseline);
        let (surface, local_y) = if self.zoom_enabled && y >= baseline {
            (Surface::Zoom, y - baseline)
        } else {
            (Surface::Macro, y)
        };
        self.surface(surface)
            .item_at(x, local_y)
            .map(|(track, item)| Hit {
                surface,
                track,
                item,
            })
    }

    /// Hover text for a located item.
    #[must_use]
    pub fn tooltip(&self, hit: &Hit) -> Option<Tooltip> {
        self.surface(hit.surface).tooltip(hit.track, &hit.item)
    }

    /// Hover text for whatever is under `(x, y)`.
    #[must_use]
    pub fn hover(&self, x: f64, y: f64) -> Option<Tooltip> {
        self.item_at(x, y).and_then(|hit| self.tooltip(&hit))
    }

    /// Hover text for the item under the pointer.
    #[must_use]
    pub fn hover_tooltip(&self) -> Option<Tooltip> {
        self.hovered.as_ref().and_then(|hit| self.tooltip(hit))
    }

    /// Action for a click at `(x, y)`.
    #[must_use]
    pub fn click(&self, x: f64, y: f64) -> Option<ClickAction> {
        let hit = self.item_at(x, y)?;
        self.surface(hit.surface).click(hit.track, &hit.item)
    }

    /// SVG document of the current visual state.
    #[must_use]
    pub fn export_svg(&self) -> String {
        to_svg_string(&self.frame())
    }

    /// Write the current visual state to an SVG file.
    pub fn save_svg(&self, path: &Path) -> Result<(), TrackError> {
        save_svg(&self.frame(), path)
    }
}
