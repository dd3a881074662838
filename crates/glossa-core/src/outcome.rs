// Result records returned by every engine entry point

use serde::Serialize;

use crate::rule::DimensionValues;

/// The outcome of applying one rule or one typology strategy to a word.
///
/// `applied` is false only when nothing was applied: a gate rejected the
/// word, a pattern was malformed, or no rule fit the request. In those cases
/// `result` is the input word and `trace` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InflectionOutcome {
    pub result: String,
    pub applied: bool,
    pub trace: String,
}

impl InflectionOutcome {
    pub fn applied(result: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            applied: true,
            trace: trace.into(),
        }
    }

    /// The word unchanged, with the reason in the trace.
    pub fn unchanged(word: &str, trace: impl Into<String>) -> Self {
        Self {
            result: word.to_string(),
            applied: false,
            trace: trace.into(),
        }
    }
}

/// One row of a paradigm table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParadigmCell {
    pub rule_id: String,
    pub dimension_values: DimensionValues,
    pub tag: String,
    pub result: String,
    pub applied: bool,
    pub trace: String,
}

/// A derivation preview for one lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedWord {
    pub entry_id: String,
    pub source: String,
    pub derived: String,
    pub applied: bool,
    pub trace: String,
}

/// One cell of an inflection matrix: a dimension-value combination and the
/// typology-aware outcome for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub dimension_values: DimensionValues,
    #[serde(flatten)]
    pub outcome: InflectionOutcome,
}
