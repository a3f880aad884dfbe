use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tracks::TrackKind;

/// One entry of the initial track stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TrackSpec {
    /// Display name; also the key used to toggle the track.
    pub name: String,
    /// Which renderer the track uses.
    pub kind: TrackKind,
    /// Whether the track starts visible.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl TrackSpec {
    /// Visible track spec.
    #[must_use]
    pub fn new(name: &str, kind: TrackKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            visible: true,
        }
    }
}

fn region(name: &str, category: &str) -> TrackSpec {
    TrackSpec::new(
        name,
        TrackKind::Region {
            category: category.to_owned(),
        },
    )
}

/// Track stack shown for a protein when no preset overrides it.
#[must_use]
pub fn default_tracks() -> Vec<TrackSpec> {
    vec![
        TrackSpec::new("None", TrackKind::Empty),
        TrackSpec::new("PTMs", TrackKind::Ptm),
        TrackSpec::new("Residues", TrackKind::Residue),
        TrackSpec::new("Mutations", TrackKind::Mutation),
        TrackSpec::new("Scansite", TrackKind::Scansite),
        region("Activation Loops", "activation_loops"),
        region("Uniprot Domains", "uniprot_domains"),
        TrackSpec::new("PFam Domains", TrackKind::Domain),
        region("Uniprot Structure", "uniprot_structure"),
        region("Uniprot Binding Sites", "uniprot_sites"),
        region("Uniprot Macrostructure", "uniprot_macro"),
        region("Uniprot Topology", "uniprot_topological"),
    ]
}
