// -- Lint policy ---------------------------------------------------------
// Lint groups and cast allowances live in Cargo.toml; these are the hard
// guarantees for library code.

// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and panic freely.
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

//! Two-resolution protein feature track viewer with animated layout.
//!
//! Seqtrack lays out per-residue annotations of one protein (modification
//! sites, mutations, predicted motifs, domains, regions) as horizontal
//! tracks along a residue axis. A macro viewer shows the whole sequence and
//! a zoom viewer shows a drag-selected window below it. Toggling tracks,
//! filtering modifications and zooming all animate toward a layout that is
//! computed synchronously, so the resting state never depends on timing.
//!
//! # Key entry points
//!
//! - [`structure::StructureViewer`] - the orchestrator; build one with
//!   [`StructureViewer::builder`](structure::StructureViewer::builder)
//! - [`command::ViewerCommand`] - every interactive operation, passed to
//!   [`StructureViewer::execute`](structure::StructureViewer::execute)
//! - [`viewer::TrackViewer`] - one stack of tracks along one axis
//! - [`protein_data::ProteinData`] - the decoded JSON payload
//! - [`options::ViewerOptions`] - runtime configuration with TOML presets
//!
//! # Driving animation
//!
//! Nothing animates on its own. The host calls
//! [`tick`](structure::StructureViewer::tick) with a monotonic clock and
//! draws [`frame`](structure::StructureViewer::frame) (or exports it as SVG)
//! while `tick` reports motion.
//!
//! ```no_run
//! use seqtrack::command::ViewerCommand;
//! use seqtrack::protein_data::ProteinData;
//! use seqtrack::structure::StructureViewer;
//!
//! # fn main() -> Result<(), seqtrack::error::TrackError> {
//! let data = ProteinData::load(std::path::Path::new("protein.json"))?;
//! let mut viewer = StructureViewer::builder(data).build();
//! let _ = viewer.execute(ViewerCommand::ZoomTo { start: 40.0, width: 60.0 })?;
//! viewer.finish();
//! let svg = viewer.export_svg();
//! # let _ = svg;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod axis;
pub mod command;
pub mod error;
pub mod input;
pub mod options;
pub mod protein_data;
pub mod renderer;
pub mod structure;
pub mod tracks;
pub mod viewer;

pub use command::ViewerCommand;
pub use error::TrackError;
pub use structure::StructureViewer;
