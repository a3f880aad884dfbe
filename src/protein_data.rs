//! Protein feature payload consumed by the track engine.
//!
//! The payload arrives as one JSON document per protein. It is decoded once
//! at construction and never mutated afterwards; tracks share it through an
//! `Arc`. Per-residue entries are decoded one at a time so a malformed entry
//! drops only that residue's feature instead of failing the whole load.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TrackError;

/// Experiment identifier as it appears in the payload.
///
/// Numeric ids are normalised to their decimal string form.
pub type ExperimentId = String;

/// One piece of evidence for a modification at a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Experiment that observed the modification.
    #[serde(deserialize_with = "id_string")]
    pub experiment: ExperimentId,
    /// Measured-site record id, if known.
    #[serde(rename = "MS", default)]
    pub ms_id: Option<i64>,
    /// Link to the experiment page.
    #[serde(default)]
    pub experiment_url: Option<String>,
    /// Whether quantitative data is attached to the measurement.
    #[serde(default)]
    pub has_data: bool,
}

/// All modification evidence observed at one residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSite {
    /// Amino-acid letter at the site.
    #[serde(deserialize_with = "first_char")]
    pub residue: char,
    /// Aligned peptide (15-mer) around the site.
    #[serde(default)]
    pub peptide: String,
    /// Evidence lists keyed by modification type name.
    #[serde(default)]
    pub mods: BTreeMap<String, Vec<Evidence>>,
    /// Domain containing the site, if any.
    #[serde(default)]
    pub domain: Option<String>,
    /// Labels of regions containing the site.
    #[serde(default)]
    pub regions: Vec<String>,
}

/// A recorded natural variant at a residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    /// Original amino acid.
    #[serde(default)]
    pub original: String,
    /// Substituted amino acid.
    #[serde(default)]
    pub mutant: String,
    /// Clinical significance, empty when unknown.
    #[serde(default)]
    pub clinical: String,
    /// Free-text annotation.
    #[serde(default)]
    pub annotation: String,
    /// Mutation type as recorded upstream.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A predicted binding-motif hit at a residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScansitePrediction {
    /// Prediction source (kinase or binding domain family).
    #[serde(default)]
    pub source: String,
    /// Predicted motif value.
    #[serde(default, deserialize_with = "display_string")]
    pub value: String,
    /// Percentile score, preformatted.
    #[serde(default, deserialize_with = "display_string")]
    pub score: String,
}

/// A labelled closed interval `[start, stop]` of 1-indexed residues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// First residue (1-indexed, inclusive).
    pub start: i64,
    /// Last residue (inclusive).
    pub stop: i64,
    /// Display label.
    pub label: String,
    /// Annotation source.
    #[serde(default)]
    pub source: Option<String>,
    /// Upstream region type.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Interval {
    /// Interval with only the required fields set.
    pub fn new(start: i64, stop: i64, label: impl Into<String>) -> Self {
        Self {
            start,
            stop,
            label: label.into(),
            source: None,
            kind: None,
        }
    }

    /// Whether `index` lies inside the interval.
    #[must_use]
    pub fn covers(&self, index: i64) -> bool {
        self.start <= index && index <= self.stop
    }
}

/// Whether a residue sits in a kinase activation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KinaseLoop {
    /// Predicted kinase activation loop.
    Confirmed,
    /// Possible kinase activation loop.
    Possible,
}

/// Region category holding kinase activation loops.
pub const ACTIVATION_LOOPS: &str = "activation_loops";

/// Immutable protein snapshot shared by every track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinData {
    /// Sequence letters, residue `i` (1-indexed) at `seq[i - 1]`.
    pub seq: Vec<char>,
    /// Modification sites keyed by residue index.
    pub mods: BTreeMap<usize, ModSite>,
    /// Mutations keyed by residue index.
    pub mutations: BTreeMap<usize, Vec<Mutation>>,
    /// Predicted sites keyed by residue index.
    pub scansite: BTreeMap<usize, Vec<ScansitePrediction>>,
    /// Pfam domains, in payload order.
    pub domains: Vec<Interval>,
    /// Region intervals by category name.
    pub regions: BTreeMap<String, Vec<Interval>>,
    /// Experiment display names.
    pub experiments: BTreeMap<ExperimentId, String>,
    /// Valid modification type names.
    pub mod_types: Vec<String>,
    /// Templated URL for annotation images (`{0}` is the file name).
    pub images_url: String,
    /// Prefix for Pfam family links.
    pub pfam_url: String,
    /// Per-protein data page used by "View" links.
    pub protein_data_url: Option<String>,
    /// Experiment to focus on at load; every other experiment starts hidden.
    pub focus_experiment: Option<ExperimentId>,
}

#[derive(Deserialize)]
struct RawProtein {
    seq: String,
    #[serde(default)]
    mods: Value,
    #[serde(default)]
    mutations: Value,
    #[serde(default)]
    scansite: Value,
    #[serde(default)]
    domains: Value,
    #[serde(default)]
    regions: Value,
    #[serde(default)]
    exps: Value,
    #[serde(default)]
    mod_types: Value,
    #[serde(default)]
    images_url: Option<String>,
    #[serde(default)]
    pfam_url: Option<String>,
    #[serde(default)]
    protein_data_url: Option<String>,
    #[serde(default)]
    experiment: Value,
}

impl ProteinData {
    /// Decode a payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TrackError::DataParse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Decode a payload from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, TrackError> {
        let raw: RawProtein = serde_json::from_value(value)
            .map_err(|e| TrackError::DataParse(e.to_string()))?;
        let seq: Vec<char> = raw.seq.chars().collect();
        let len = seq.len();

        let data = Self {
            mods: residue_map(&raw.mods, len, "mods"),
            mutations: residue_map(&raw.mutations, len, "mutations"),
            scansite: residue_map(&raw.scansite, len, "scansite"),
            domains: interval_list(&raw.domains, "domains"),
            regions: object_entries(&raw.regions)
                .map(|(name, v)| (name.clone(), interval_list(v, name)))
                .collect(),
            experiments: object_entries(&raw.exps)
                .filter_map(|(id, v)| {
                    value_string(v).map(|name| (id.clone(), name))
                })
                .collect(),
            mod_types: raw
                .mod_types
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|v| v.as_str().map(str::to_owned))
                        .collect()
                })
                .unwrap_or_default(),
            images_url: raw.images_url.unwrap_or_default(),
            pfam_url: raw.pfam_url.unwrap_or_default(),
            protein_data_url: raw.protein_data_url,
            focus_experiment: value_string(&raw.experiment),
            seq,
        };
        log::debug!(
            "loaded protein: {} residues, {} PTM sites, {} mutation sites, \
             {} domains",
            data.len(),
            data.mods.len(),
            data.mutations.len(),
            data.domains.len()
        );
        Ok(data)
    }

    /// Read and decode a payload file.
    pub fn load(path: &Path) -> Result<Self, TrackError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Sequence length in residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Amino-acid letter at a 1-indexed residue.
    #[must_use]
    pub fn residue_letter(&self, index: usize) -> Option<char> {
        index.checked_sub(1).and_then(|i| self.seq.get(i)).copied()
    }

    /// Intervals of a region category, empty when the category is absent.
    #[must_use]
    pub fn region(&self, category: &str) -> &[Interval] {
        self.regions.get(category).map_or(&[], Vec::as_slice)
    }

    /// Display name of an experiment, falling back to its id.
    #[must_use]
    pub fn experiment_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.experiments.get(id).map_or(id, String::as_str)
    }

    /// Whether any mutation is recorded at the residue.
    #[must_use]
    pub fn is_mutated(&self, index: usize) -> bool {
        self.mutations.contains_key(&index)
    }

    /// Whether a Pfam kinase domain covers the residue.
    #[must_use]
    pub fn in_kinase_domain(&self, index: usize) -> bool {
        self.domains
            .iter()
            .any(|d| d.covers(index as i64) && d.label.contains("Pkinase"))
    }

    /// Kinase activation loop classification of a residue.
    #[must_use]
    pub fn kinase_loop(&self, index: usize) -> Option<KinaseLoop> {
        self.region(ACTIVATION_LOOPS)
            .iter()
            .filter(|r| r.covers(index as i64))
            .find_map(|r| match r.label.as_str() {
                "Kinase Activation Loop" => Some(KinaseLoop::Confirmed),
                "Possible Kinase Activation Loop" => Some(KinaseLoop::Possible),
                _ => None,
            })
    }

    /// Expand the image URL template for a file name.
    #[must_use]
    pub fn image_url(&self, file: &str) -> String {
        self.images_url.replace("{0}", file)
    }
}

fn object_entries(value: &Value) -> impl Iterator<Item = (&String, &Value)> {
    value.as_object().into_iter().flat_map(|m| m.iter())
}

/// Decode a `{ "<index>": T }` object, skipping bad keys and bad entries.
fn residue_map<T: serde::de::DeserializeOwned>(
    value: &Value,
    len: usize,
    what: &str,
) -> BTreeMap<usize, T> {
    let mut out = BTreeMap::new();
    for (key, entry) in object_entries(value) {
        let Ok(index) = key.trim().parse::<usize>() else {
            log::warn!("{what}: skipping non-numeric residue key {key:?}");
            continue;
        };
        if index == 0 || index > len {
            log::warn!("{what}: residue {index} outside sequence of {len}");
            continue;
        }
        match serde_json::from_value::<T>(entry.clone()) {
            Ok(item) => {
                let _ = out.insert(index, item);
            }
            Err(e) => log::warn!("{what}: skipping residue {index}: {e}"),
        }
    }
    out
}

fn interval_list(value: &Value, what: &str) -> Vec<Interval> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|v| match serde_json::from_value::<Interval>(v.clone()) {
            Ok(interval) => Some(interval),
            Err(e) => {
                log::warn!("{what}: skipping interval: {e}");
                None
            }
        })
        .collect()
}

fn value_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    value_string(&v)
        .ok_or_else(|| D::Error::custom(format!("invalid experiment id {v}")))
}

fn display_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn first_char<'de, D: Deserializer<'de>>(d: D) -> Result<char, D::Error> {
    let s = String::deserialize(d)?;
    s.chars()
        .next()
        .ok_or_else(|| D::Error::custom("empty residue letter"))
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared payloads for unit tests across the crate.

    use super::ProteinData;

    /// 200-residue protein with one feature of each kind.
    pub(crate) fn sample() -> ProteinData {
        let seq: String = "MSTAYKLPGR".repeat(20);
        let json = serde_json::json!({
            "seq": seq,
            "mods": {
                "50": {
                    "residue": "S",
                    "peptide": "LPGRMSTAYKLPGRM",
                    "mods": { "phospho": [{ "experiment": "E1", "has_data": true }] }
                },
                "120": {
                    "residue": "Y",
                    "peptide": "GRMSTAYKLPGRMST",
                    "mods": {
                        "phospho": [{ "experiment": "E1" }, { "experiment": "E2" }],
                        "acetyl": [{ "experiment": "E2" }]
                    }
                }
            },
            "mutations": {
                "50": [
                    { "original": "S", "mutant": "A", "clinical": "", "annotation": "benign" },
                    { "original": "S", "mutant": "D", "clinical": "Pathogenic", "annotation": "x" }
                ],
                "77": [{ "original": "K", "mutant": "R", "clinical": "", "annotation": "" }]
            },
            "scansite": {
                "120": [{ "source": "kinase_bind", "value": "Src SH2", "score": "0.12%" }]
            },
            "domains": [
                { "start": 10, "stop": 60, "label": "Pkinase" },
                { "start": 150, "stop": 152, "label": "Tiny" }
            ],
            "regions": {
                "activation_loops": [
                    { "start": 40, "stop": 55, "label": "Kinase Activation Loop" }
                ],
                "uniprot_structure": [
                    { "start": 1, "stop": 20, "label": "helix" },
                    { "start": 100, "stop": 180, "label": "strand" }
                ]
            },
            "exps": { "E1": "Screen one", "E2": "Screen two" },
            "mod_types": ["acetyl", "phospho"],
            "images_url": "/static/images/{0}",
            "pfam_url": "https://pfam.example/family/"
        });
        ProteinData::from_value(json).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sample_fixture_decodes() {
        let data = fixtures::sample();
        assert_eq!(data.len(), 200);
        assert_eq!(data.mods.len(), 2);
        assert_eq!(data.mods[&50].residue, 'S');
        assert_eq!(data.mutations[&50].len(), 2);
        assert_eq!(data.experiment_name("E2"), "Screen two");
        assert_eq!(data.region("uniprot_structure").len(), 2);
        assert!(data.region("missing").is_empty());
    }

    #[test]
    fn numeric_experiment_ids_become_strings() {
        let data = ProteinData::from_value(json!({
            "seq": "MSKY",
            "mods": { "2": { "residue": "S", "mods": { "phospho": [{ "experiment": 17 }] } } },
            "exps": { "17": "Numeric" },
            "experiment": 17
        }))
        .unwrap();
        assert_eq!(data.mods[&2].mods["phospho"][0].experiment, "17");
        assert_eq!(data.focus_experiment.as_deref(), Some("17"));
        assert_eq!(data.experiment_name("17"), "Numeric");
    }

    #[test]
    fn malformed_residue_entries_are_skipped() {
        let data = ProteinData::from_value(json!({
            "seq": "MSKYT",
            "mods": {
                "abc": { "residue": "S", "mods": {} },
                "2": { "residue": "", "mods": {} },
                "3": { "residue": "K", "mods": {} },
                "99": { "residue": "K", "mods": {} }
            },
            "mutations": { "4": "not a list", "5": [] },
            "domains": [{ "start": 1, "label": "no stop" }, { "start": 1, "stop": 3, "label": "ok" }]
        }))
        .unwrap();
        assert_eq!(data.mods.keys().copied().collect::<Vec<_>>(), vec![3]);
        assert_eq!(data.mutations.keys().copied().collect::<Vec<_>>(), vec![5]);
        assert_eq!(data.domains.len(), 1);
    }

    #[test]
    fn missing_sequence_is_a_document_error() {
        assert!(matches!(
            ProteinData::from_json("{\"mods\": {}}"),
            Err(TrackError::DataParse(_))
        ));
        assert!(matches!(
            ProteinData::from_json("not json"),
            Err(TrackError::DataParse(_))
        ));
    }

    #[test]
    fn kinase_annotations() {
        let data = fixtures::sample();
        assert!(data.in_kinase_domain(50));
        assert!(!data.in_kinase_domain(151));
        assert_eq!(data.kinase_loop(45), Some(KinaseLoop::Confirmed));
        assert_eq!(data.kinase_loop(56), None);
        assert!(data.is_mutated(77));
        assert_eq!(data.image_url("kinase.jpg"), "/static/images/kinase.jpg");
    }

    #[test]
    fn residue_letters_are_one_indexed() {
        let data = fixtures::sample();
        assert_eq!(data.residue_letter(0), None);
        assert_eq!(data.residue_letter(1), Some('M'));
        assert_eq!(data.residue_letter(200), Some('R'));
        assert_eq!(data.residue_letter(201), None);
    }
}
