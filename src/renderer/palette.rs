//! Amino-acid class colors and label-keyed ordinal color scales.

use rustc_hash::FxHashMap;

/// Physico-chemical class of an amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoClass {
    /// E, D.
    Acidic,
    /// R, H, K.
    Basic,
    /// G, A.
    Small,
    /// T, S, C.
    Nucleophilic,
    /// V, L, I, M, P.
    Hydrophobic,
    /// Y, F, W.
    Aromatic,
    /// Q, N.
    Amide,
    /// Anything else.
    Other,
}

impl AminoClass {
    /// Class of a one-letter residue code (case-insensitive).
    #[must_use]
    pub fn of(residue: char) -> Self {
        match residue.to_ascii_uppercase() {
            'E' | 'D' => Self::Acidic,
            'R' | 'H' | 'K' => Self::Basic,
            'G' | 'A' => Self::Small,
            'T' | 'S' | 'C' => Self::Nucleophilic,
            'V' | 'L' | 'I' | 'M' | 'P' => Self::Hydrophobic,
            'Y' | 'F' | 'W' => Self::Aromatic,
            'Q' | 'N' => Self::Amide,
            _ => Self::Other,
        }
    }

    /// Display color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Acidic => "#d62728",
            Self::Basic => "#6b6ecf",
            Self::Small => "#7f7f7f",
            Self::Nucleophilic => "#ff7f0e",
            Self::Hydrophobic => "#292929",
            Self::Aromatic => "#c49c94",
            Self::Amide => "#ce6dbd",
            Self::Other => "#000000",
        }
    }
}

/// Color of a residue letter.
#[must_use]
pub fn residue_color(residue: char) -> &'static str {
    AminoClass::of(residue).color()
}

/// Assigns palette colors to labels in order of first appearance, cycling
/// when the palette runs out.
#[derive(Debug, Clone, Default)]
pub struct OrdinalScale {
    palette: Vec<String>,
    assigned: FxHashMap<String, usize>,
}

impl OrdinalScale {
    /// Scale over `palette` with labels pre-assigned in iteration order.
    #[must_use]
    pub fn new<'a>(
        palette: &[String],
        labels: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut scale = Self {
            palette: palette.to_vec(),
            assigned: FxHashMap::default(),
        };
        for label in labels {
            let next = scale.assigned.len();
            let _ = scale.assigned.entry(label.to_owned()).or_insert(next);
        }
        scale
    }

    /// Color for `label`; unknown labels get the first palette entry.
    #[must_use]
    pub fn color(&self, label: &str) -> &str {
        if self.palette.is_empty() {
            return "#000000";
        }
        let idx = self.assigned.get(label).copied().unwrap_or(0);
        &self.palette[idx % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CATEGORY10, SET2};

    #[test]
    fn amino_classes() {
        assert_eq!(residue_color('E'), "#d62728");
        assert_eq!(residue_color('k'), "#6b6ecf");
        assert_eq!(residue_color('W'), "#c49c94");
        assert_eq!(residue_color('X'), "#000000");
        assert_eq!(AminoClass::of('P'), AminoClass::Hydrophobic);
    }

    #[test]
    fn ordinal_scale_assigns_by_first_appearance() {
        let palette: Vec<String> = SET2.map(str::to_owned).to_vec();
        let scale =
            OrdinalScale::new(&palette, ["Pkinase", "SH2", "Pkinase", "SH3"]);
        assert_eq!(scale.color("Pkinase"), SET2[0]);
        assert_eq!(scale.color("SH2"), SET2[1]);
        assert_eq!(scale.color("SH3"), SET2[2]);
    }

    #[test]
    fn ordinal_scale_cycles() {
        let palette: Vec<String> = CATEGORY10.map(str::to_owned).to_vec();
        let labels: Vec<String> = (0..12).map(|i| format!("r{i}")).collect();
        let scale =
            OrdinalScale::new(&palette, labels.iter().map(String::as_str));
        assert_eq!(scale.color("r10"), CATEGORY10[0]);
        assert_eq!(scale.color("r11"), CATEGORY10[1]);
    }
}
