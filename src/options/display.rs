use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Viewport and zoom parameters.
pub struct DisplayOptions {
    /// Pixel width every axis maps onto.
    #[schemars(title = "Viewport Width", range(min = 100.0, max = 4000.0), extend("step" = 10.0))]
    pub viewport_width: f64,
    /// Residue track letters are drawn only for proteins shorter than this,
    /// or whenever the viewer is zoomed in.
    #[schemars(title = "Residue Letter Limit")]
    pub show_residues_size_limit: usize,
    /// Cap on the residues the overview spans. `None` spans the whole
    /// sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Overview Residue Cap")]
    pub macro_max_residues: Option<usize>,
    /// Narrowest zoom window in residues.
    #[schemars(title = "Minimum Zoom Width", range(min = 1.0, max = 500.0))]
    pub min_zoom_width: f64,
    /// First residue of the zoom window before any zoom has been made.
    #[schemars(skip)]
    pub initial_zoom_start: f64,
    /// Width of the zoom window before any zoom has been made.
    #[schemars(skip)]
    pub initial_zoom_width: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            viewport_width: 900.0,
            show_residues_size_limit: 100,
            macro_max_residues: None,
            min_zoom_width: 50.0,
            initial_zoom_start: 0.0,
            initial_zoom_width: 50.0,
        }
    }
}
