//! Input handling: pointer event types and the drag-to-zoom state machine
//! that turns raw pointer events into selections, hovers and clicks.

/// Platform-agnostic pointer events.
pub mod event;
/// Drag detection and selection tracking.
pub mod drag;

pub use drag::{PointerOutcome, PointerTracker};
pub use event::{InputEvent, MouseButton};
