use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Track heights and glyph sizes in pixels.
pub struct GeometryOptions {
    /// Height of the PTM bar track.
    pub ptm_height: f64,
    /// Height of the residue ruler track.
    pub residue_height: f64,
    /// Height of a domain track.
    pub domain_height: f64,
    /// Height of a region track.
    pub region_height: f64,
    /// Height of the mutation track.
    pub mutation_height: f64,
    /// Height of the scansite track.
    pub scansite_height: f64,
    /// Height of the empty spacer track.
    pub spacer_height: f64,
    /// Height of a bar representing the maximum modification count.
    pub ptm_bar_height: f64,
    /// Narrowest PTM bar.
    pub min_bar_width: f64,
    /// Height of the rectangle drawn for each domain or region.
    pub feature_height: f64,
    /// Smallest marker diameter.
    pub min_marker_size: f64,
    /// Largest marker diameter as a fraction of one residue's width.
    pub marker_width_fraction: f64,
    /// Estimated pixel width of one label character.
    pub label_char_width: f64,
    /// Pixels per residue needed before letters are drawn.
    pub residue_letter_min_px: f64,
    /// Largest font size used for residue letters.
    pub residue_letter_max_font: f64,
    /// Length of ruler tick marks.
    pub tick_size: f64,
    /// A tick level is drawn only while fewer than this many of its
    /// intervals fit across the viewport.
    pub max_ticks_per_viewport: f64,
    /// Ruler tick spacings, coarsest first.
    pub tick_levels: Vec<u32>,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            ptm_height: 100.0,
            residue_height: 30.0,
            domain_height: 60.0,
            region_height: 60.0,
            mutation_height: 45.0,
            scansite_height: 45.0,
            spacer_height: 50.0,
            ptm_bar_height: 100.0,
            min_bar_width: 1.0,
            feature_height: 20.0,
            min_marker_size: 5.0,
            marker_width_fraction: 0.75,
            label_char_width: 8.0,
            residue_letter_min_px: 8.0,
            residue_letter_max_font: 16.0,
            tick_size: 5.0,
            max_ticks_per_viewport: 20.0,
            tick_levels: vec![5000, 1000, 500, 100, 50, 10],
        }
    }
}
