//! Drawing output for the track viewers.
//!
//! Tracks emit [`Primitive`]s in their own local coordinates; viewers place
//! them in [`Layer`]s with the track's animated offset and opacity and
//! collect the layers into a [`Frame`]. A frame can be hit-tested for
//! pointer interaction or serialized to SVG.

pub mod frame;
pub mod palette;
pub mod primitive;
pub mod svg_export;

pub use frame::{Frame, Layer};
pub use palette::{residue_color, AminoClass, OrdinalScale};
pub use primitive::{ItemRef, Paint, Primitive, Shape, Style, TextAnchor};
