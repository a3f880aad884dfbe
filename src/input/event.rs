/// Platform-agnostic pointer events in panel coordinates.
///
/// These are fed into a [`PointerTracker`](super::PointerTracker), usually
/// through [`ViewerCommand::Pointer`](crate::command::ViewerCommand::Pointer).
///
/// # Example
///
/// ```ignore
/// let click = viewer.execute(ViewerCommand::Pointer(
///     InputEvent::PointerMoved { x: 100.0, y: 20.0 },
/// ))?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a position inside the panel.
    PointerMoved {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// Pointer button pressed or released at the last known position.
    PointerButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Pointer left the panel. Cancels any drag in progress.
    PointerLeft,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) button.
    Left,
    /// Secondary (right) button.
    Right,
    /// Middle button (wheel click).
    Middle,
}
