//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a control panel
//! checkbox, a pointer gesture, or a programmatic call, is represented as a
//! `ViewerCommand`. Consumers construct commands and pass them to
//! [`StructureViewer::execute`](crate::structure::StructureViewer::execute).

use crate::input::InputEvent;
use crate::protein_data::ExperimentId;

/// Every operation the structure viewer accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Tracks ──────────────────────────────────────────────────────
    /// Show or hide one track in both viewers.
    ToggleTrack {
        /// Track name.
        name: String,
        /// Target visibility.
        visible: bool,
    },

    /// Show or hide every track.
    SetAllTracks {
        /// Target visibility.
        visible: bool,
    },

    // ── PTM filter ──────────────────────────────────────────────────
    /// Switch one modification type.
    TogglePtm {
        /// Modification type name.
        mod_type: String,
        /// Whether the type counts toward bar heights.
        enabled: bool,
    },

    /// Switch one experiment.
    ToggleExperiment {
        /// Experiment id.
        experiment: ExperimentId,
        /// Whether evidence from the experiment counts.
        enabled: bool,
    },

    /// Switch every modification type.
    SetAllPtms {
        /// Target state.
        enabled: bool,
    },

    /// Switch every experiment.
    SetAllExperiments {
        /// Target state.
        enabled: bool,
    },

    // ── Zoom ────────────────────────────────────────────────────────
    /// Zoom to a residue range; the range is padded and clamped.
    ZoomTo {
        /// First residue coordinate.
        start: f64,
        /// Requested width in residues.
        width: f64,
    },

    /// Close the zoom viewer, remembering its window.
    ZoomOff,

    // ── Pointer ─────────────────────────────────────────────────────
    /// Raw pointer input in panel coordinates.
    Pointer(InputEvent),
}
