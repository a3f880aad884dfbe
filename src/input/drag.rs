//! Drag-to-zoom state machine.
//!
//! The tracker owns all transient pointer state (position, button state,
//! the selection being dragged). It knows nothing about tracks: the owner
//! tells it how tall the draggable surface is and interprets the outcome.

use glam::DVec2;

use super::event::{InputEvent, MouseButton};
use crate::structure::DragSelection;

/// Squared pointer travel (px²) above which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f64 = 1.0;

/// What a pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Nothing for the owner to do.
    None,
    /// Pointer moved without dragging.
    Hover(DVec2),
    /// The selection rectangle changed.
    SelectionChanged,
    /// A drag finished with this selection.
    Selected(DragSelection),
    /// Press and release without dragging.
    Click(DVec2),
}

/// Pointer position, button state and the active drag.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: DVec2,
    /// Position of the primary press, while held.
    press: Option<DVec2>,
    /// Whether the press started on the draggable surface.
    can_drag: bool,
    selection: Option<DragSelection>,
}

impl PointerTracker {
    /// Idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position.
    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Selection currently being dragged.
    #[must_use]
    pub fn selection(&self) -> Option<&DragSelection> {
        self.selection.as_ref()
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Feed one event. Presses above `drag_height` may start a selection.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        drag_height: f64,
    ) -> PointerOutcome {
        match event {
            InputEvent::PointerMoved { x, y } => self.handle_moved(DVec2::new(x, y)),
            InputEvent::PointerButton {
                button: MouseButton::Left,
                pressed,
            } => {
                if pressed {
                    self.press = Some(self.position);
                    self.can_drag = self.position.y >= 0.0 && self.position.y < drag_height;
                    self.selection = None;
                    PointerOutcome::None
                } else {
                    self.handle_release()
                }
            }
            InputEvent::PointerButton { .. } => PointerOutcome::None,
            InputEvent::PointerLeft => {
                let had_selection = self.selection.is_some();
                self.press = None;
                self.selection = None;
                if had_selection {
                    PointerOutcome::SelectionChanged
                } else {
                    PointerOutcome::None
                }
            }
        }
    }

    fn handle_moved(&mut self, position: DVec2) -> PointerOutcome {
        self.position = position;
        let Some(press) = self.press else {
            return PointerOutcome::Hover(position);
        };
        if let Some(selection) = self.selection.as_mut() {
            selection.update(position);
            return PointerOutcome::SelectionChanged;
        }
        if self.can_drag && position.distance_squared(press) > DRAG_THRESHOLD_SQ {
            let mut selection = DragSelection::new(press);
            selection.update(position);
            self.selection = Some(selection);
            return PointerOutcome::SelectionChanged;
        }
        PointerOutcome::None
    }

    fn handle_release(&mut self) -> PointerOutcome {
        let Some(press) = self.press.take() else {
            return PointerOutcome::None;
        };
        if let Some(selection) = self.selection.take() {
            return PointerOutcome::Selected(selection);
        }
        if press.distance_squared(self.position) > DRAG_THRESHOLD_SQ {
            PointerOutcome::None
        } else {
            PointerOutcome::Click(self.position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMoved { x, y }
    }

    fn button(pressed: bool) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn drag_on_surface_produces_selection() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(moved(100.0, 20.0), 300.0);
        let _ = tracker.handle_event(button(true), 300.0);
        assert_eq!(
            tracker.handle_event(moved(70.0, 25.0), 300.0),
            PointerOutcome::SelectionChanged
        );
        assert!(tracker.selection().is_some());
        let _ = tracker.handle_event(moved(40.0, 30.0), 300.0);
        let PointerOutcome::Selected(sel) = tracker.handle_event(button(false), 300.0)
        else {
            panic!("expected a finished selection");
        };
        assert_eq!(sel.bounds(), (40.0, 100.0));
        assert!(tracker.selection().is_none());
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(moved(12.0, 400.0), 300.0);
        let _ = tracker.handle_event(button(true), 300.0);
        assert_eq!(
            tracker.handle_event(button(false), 300.0),
            PointerOutcome::Click(DVec2::new(12.0, 400.0))
        );
    }

    #[test]
    fn drag_below_surface_never_selects() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(moved(100.0, 350.0), 300.0);
        let _ = tracker.handle_event(button(true), 300.0);
        assert_eq!(
            tracker.handle_event(moved(10.0, 350.0), 300.0),
            PointerOutcome::None
        );
        assert_eq!(tracker.handle_event(button(false), 300.0), PointerOutcome::None);
    }

    #[test]
    fn leaving_cancels_drag() {
        let mut tracker = PointerTracker::new();
        let _ = tracker.handle_event(moved(100.0, 10.0), 300.0);
        let _ = tracker.handle_event(button(true), 300.0);
        let _ = tracker.handle_event(moved(200.0, 10.0), 300.0);
        assert_eq!(
            tracker.handle_event(InputEvent::PointerLeft, 300.0),
            PointerOutcome::SelectionChanged
        );
        assert_eq!(tracker.handle_event(button(false), 300.0), PointerOutcome::None);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut tracker = PointerTracker::new();
        let event = InputEvent::PointerButton {
            button: MouseButton::Right,
            pressed: true,
        };
        assert_eq!(tracker.handle_event(event, 300.0), PointerOutcome::None);
        assert!(!tracker.is_pressed());
    }
}
