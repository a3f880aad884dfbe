use serde::{Deserialize, Serialize};

/// Set2 qualitative palette, used for domains.
pub const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f",
    "#e5c494", "#b3b3b3",
];

/// Category10 palette, used for regions.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Color palette options for track glyphs. Colors are CSS strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Track name labels.
    pub track_label: String,
    /// Horizontal strand line through interval tracks.
    pub strand: String,
    /// Mutation markers.
    pub mutation: String,
    /// Scansite markers.
    pub scansite: String,
    /// Marker fill while hovered.
    pub hover: String,
    /// Letters drawn inside markers.
    pub marker_letter: String,
    /// Drag selection rectangle.
    pub selection: String,
    /// Zoom window rectangle and funnel.
    pub zoom_window: String,
    /// Ruler tick colors, one per tick level, coarsest first.
    pub ticks: Vec<String>,
    /// Domain palette, assigned by label in order of first appearance.
    pub domain_palette: Vec<String>,
    /// Region palette, assigned by label in order of first appearance.
    pub region_palette: Vec<String>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            track_label: "#999999".to_owned(),
            strand: "#000000".to_owned(),
            mutation: "red".to_owned(),
            scansite: "#6495ED".to_owned(),
            hover: "black".to_owned(),
            marker_letter: "white".to_owned(),
            selection: "#00ff00".to_owned(),
            zoom_window: "#666666".to_owned(),
            ticks: ["#000", "#222", "#444", "#666", "#888", "#AAA"]
                .map(str::to_owned)
                .to_vec(),
            domain_palette: SET2.map(str::to_owned).to_vec(),
            region_palette: CATEGORY10.map(str::to_owned).to_vec(),
        }
    }
}

impl ColorOptions {
    /// Tick color for level `level`, repeating the last entry past the end.
    #[must_use]
    pub fn tick(&self, level: usize) -> &str {
        self.ticks
            .get(level)
            .or_else(|| self.ticks.last())
            .map_or("#000", String::as_str)
    }
}
