// Typology configuration and the typology-specific grammar bindings:
// affix slots (agglutinative/polysynthetic), conjugation classes and
// irregular overrides (fusional).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::rule::DimensionValues;

/// Morphological typology, selecting the dispatch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphologicalType {
    Isolating,
    Agglutinative,
    Fusional,
    Polysynthetic,
}

impl MorphologicalType {
    pub fn as_str(self) -> &'static str {
        match self {
            MorphologicalType::Isolating => "isolating",
            MorphologicalType::Agglutinative => "agglutinative",
            MorphologicalType::Fusional => "fusional",
            MorphologicalType::Polysynthetic => "polysynthetic",
        }
    }
}

impl fmt::Display for MorphologicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MorphologicalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isolating" => Ok(MorphologicalType::Isolating),
            "agglutinative" => Ok(MorphologicalType::Agglutinative),
            "fusional" => Ok(MorphologicalType::Fusional),
            "polysynthetic" => Ok(MorphologicalType::Polysynthetic),
            other => Err(format!("unknown morphological type: {other}")),
        }
    }
}

/// Where grammatical relations are marked. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadMarking {
    Head,
    #[default]
    Dependent,
    Double,
    None,
}

impl FromStr for HeadMarking {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(HeadMarking::Head),
            "dependent" => Ok(HeadMarking::Dependent),
            "double" => Ok(HeadMarking::Double),
            "none" => Ok(HeadMarking::None),
            other => Err(format!("unknown head marking: {other}")),
        }
    }
}

/// Active typology plus the auxiliary indices the typology panel displays.
///
/// `morphological_type` is `None` when the document names a typology the
/// engine does not recognize; dispatch then falls back to a plain single
/// rule search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypologyConfig {
    #[serde(
        default = "default_morphological_type",
        deserialize_with = "lenient_morphological_type"
    )]
    pub morphological_type: Option<MorphologicalType>,
    #[serde(default = "default_index")]
    pub synthesis_index: f64,
    #[serde(default = "default_index")]
    pub fusion_index: f64,
    #[serde(default, deserialize_with = "lenient_head_marking")]
    pub head_marking: HeadMarking,
    #[serde(default = "default_auto_estimated")]
    pub auto_estimated: bool,
}

fn default_morphological_type() -> Option<MorphologicalType> {
    Some(MorphologicalType::Fusional)
}

fn default_index() -> f64 {
    2.0
}

fn default_auto_estimated() -> bool {
    true
}

fn lenient_morphological_type<'de, D>(deserializer: D) -> Result<Option<MorphologicalType>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|n| n.parse().ok()))
}

fn lenient_head_marking<'de, D>(deserializer: D) -> Result<HeadMarking, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|n| n.parse().ok()).unwrap_or_default())
}

impl TypologyConfig {
    pub fn new(morphological_type: MorphologicalType) -> Self {
        Self {
            morphological_type: Some(morphological_type),
            ..Self::default()
        }
    }
}

impl Default for TypologyConfig {
    fn default() -> Self {
        Self {
            morphological_type: default_morphological_type(),
            synthesis_index: default_index(),
            fusion_index: default_index(),
            head_marking: HeadMarking::default(),
            auto_estimated: default_auto_estimated(),
        }
    }
}

/// An ordered position in an affix chain, bound to one dimension.
///
/// Negative positions are prefix slots, the rest suffix slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixSlot {
    pub slot_id: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub dimension_id: String,
    #[serde(default)]
    pub is_obligatory: bool,
    #[serde(default)]
    pub label: String,
}

impl AffixSlot {
    pub fn new(slot_id: impl Into<String>, position: i32, dimension_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            position,
            dimension_id: dimension_id.into(),
            is_obligatory: false,
            label: String::new(),
        }
    }

    pub fn obligatory(mut self) -> Self {
        self.is_obligatory = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Label for traces; falls back to the slot id.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.slot_id
        } else {
            &self.label
        }
    }
}

/// A group of fusional rules sharing a stem pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationClass {
    pub class_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub applies_to_pos: String,
    /// Regular expression a root must match to belong to this class. Empty
    /// matches every root.
    #[serde(default)]
    pub stem_pattern: String,
    #[serde(default)]
    pub rule_ids: Vec<String>,
}

impl ConjugationClass {
    pub fn new(class_id: impl Into<String>, applies_to_pos: impl Into<String>, stem_pattern: impl Into<String>) -> Self {
        Self {
            class_id: class_id.into(),
            name: String::new(),
            applies_to_pos: applies_to_pos.into(),
            stem_pattern: stem_pattern.into(),
            rule_ids: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_ids.push(rule_id.into());
        self
    }

    /// Label for traces; falls back to the class id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.class_id
        } else {
            &self.name
        }
    }
}

/// A literal surface form for one lexicon entry and combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrregularOverride {
    pub entry_id: String,
    #[serde(default)]
    pub dimension_values: DimensionValues,
    #[serde(default)]
    pub surface_form: String,
}

impl IrregularOverride {
    pub fn new(entry_id: impl Into<String>, dimension_values: DimensionValues, surface_form: impl Into<String>) -> Self {
        Self {
            entry_id: entry_id.into(),
            dimension_values,
            surface_form: surface_form.into(),
        }
    }

    /// Whether this override covers `entry_id` under `request`: the entry
    /// ids are equal and every pair of the override is present in the
    /// request.
    pub fn covers(&self, entry_id: &str, request: &DimensionValues) -> bool {
        self.entry_id == entry_id
            && self
                .dimension_values
                .iter()
                .all(|(dim, val)| request.get(dim) == Some(val))
    }
}
