// Grammar document: the collections the grammar editor hands to the engine.
//
// Loading is lenient per rule. A rule that cannot be turned into a typed
// rule (unknown operation, missing payload) is dropped from the rule list
// and recorded in `rejected_rules`; the rest of the grammar stays usable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GrammarError;
use crate::rule::{DerivationRule, InflectionRule, RawDerivationRule, RawInflectionRule};
use crate::typology::{AffixSlot, ConjugationClass, IrregularOverride, TypologyConfig};

/// One value of an inflection dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub val_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gloss: String,
}

/// A grammatical category such as number or tense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InflectionDimension {
    pub dim_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub applies_to_pos: Vec<String>,
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

impl InflectionDimension {
    pub fn new<I, S>(dim_id: impl Into<String>, applies_to_pos: &[&str], values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dim_id: dim_id.into(),
            name: String::new(),
            applies_to_pos: applies_to_pos.iter().map(|p| p.to_string()).collect(),
            values: values
                .into_iter()
                .map(|v| DimensionValue {
                    val_id: v.into(),
                    name: String::new(),
                    gloss: String::new(),
                })
                .collect(),
        }
    }

    pub fn applies_to(&self, pos_id: &str) -> bool {
        self.applies_to_pos.iter().any(|p| p == pos_id)
    }
}

/// The lexicon store's view of an entry: its id, root and parts of speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub entry_id: String,
    pub root: String,
    #[serde(default)]
    pub pos_ids: Vec<String>,
}

impl LexiconEntry {
    pub fn new(entry_id: impl Into<String>, root: impl Into<String>, pos_ids: &[&str]) -> Self {
        Self {
            entry_id: entry_id.into(),
            root: root.into(),
            pos_ids: pos_ids.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A rule left out of the grammar at load time, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRule {
    pub rule_id: String,
    pub reason: String,
}

/// The engine-relevant part of a grammar document.
#[derive(Debug, Clone, Default)]
pub struct GrammarConfig {
    pub language_id: String,
    pub inflection_dimensions: Vec<InflectionDimension>,
    pub inflection_rules: Vec<InflectionRule>,
    pub derivation_rules: Vec<DerivationRule>,
    pub typology: TypologyConfig,
    pub affix_slots: Vec<AffixSlot>,
    pub conjugation_classes: Vec<ConjugationClass>,
    pub irregular_overrides: Vec<IrregularOverride>,
    pub rejected_rules: Vec<RejectedRule>,
}

impl GrammarConfig {
    /// Parse a grammar document.
    ///
    /// Fails only when the document itself is malformed; individual bad
    /// rules end up in `rejected_rules`.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammarConfig = serde_json::from_str(json)?;
        Ok(Self::from(raw))
    }

    /// A grammar holding only inflection rules under `typology`.
    pub fn with_rules(typology: TypologyConfig, rules: Vec<InflectionRule>) -> Self {
        Self {
            typology,
            inflection_rules: rules,
            ..Self::default()
        }
    }

    pub fn rule(&self, rule_id: &str) -> Option<&InflectionRule> {
        self.inflection_rules.iter().find(|r| r.rule_id == rule_id)
    }

    pub fn derivation_rule(&self, rule_id: &str) -> Option<&DerivationRule> {
        self.derivation_rules.iter().find(|r| r.rule_id == rule_id)
    }

    /// Enabled rules of a part of speech, in declaration order.
    pub fn active_rules<'a, 'p>(
        &'a self,
        pos_id: &'p str,
    ) -> impl Iterator<Item = &'a InflectionRule> + use<'a, 'p> {
        self.inflection_rules.iter().filter(move |r| r.is_active_for(pos_id))
    }

    /// Dimensions that apply to a part of speech, in declaration order.
    pub fn dimensions_for<'a, 'p>(
        &'a self,
        pos_id: &'p str,
    ) -> impl Iterator<Item = &'a InflectionDimension> + use<'a, 'p> {
        self.inflection_dimensions.iter().filter(move |d| d.applies_to(pos_id))
    }
}

fn default_language_id() -> String {
    "lang_proto".to_string()
}

#[derive(Debug, Deserialize)]
struct RawGrammarConfig {
    #[serde(default = "default_language_id")]
    language_id: String,
    #[serde(default)]
    inflection_dimensions: Vec<InflectionDimension>,
    #[serde(default, alias = "inflections")]
    inflection_rules: Vec<RawInflectionRule>,
    #[serde(default)]
    derivation_rules: Vec<RawDerivationRule>,
    #[serde(default)]
    typology: TypologyConfig,
    #[serde(default)]
    affix_slots: Vec<AffixSlot>,
    #[serde(default)]
    conjugation_classes: Vec<ConjugationClass>,
    #[serde(default)]
    irregular_overrides: Vec<IrregularOverride>,
}

impl From<RawGrammarConfig> for GrammarConfig {
    fn from(raw: RawGrammarConfig) -> Self {
        let mut rejected_rules = Vec::new();

        let inflection_rules = convert_rules(
            raw.inflection_rules,
            |r: &RawInflectionRule| r.rule_id.clone(),
            RawInflectionRule::into_rule,
            &mut rejected_rules,
        );
        let derivation_rules = convert_rules(
            raw.derivation_rules,
            |r: &RawDerivationRule| r.rule_id.clone(),
            RawDerivationRule::into_rule,
            &mut rejected_rules,
        );

        Self {
            language_id: raw.language_id,
            inflection_dimensions: raw.inflection_dimensions,
            inflection_rules,
            derivation_rules,
            typology: raw.typology,
            affix_slots: raw.affix_slots,
            conjugation_classes: raw.conjugation_classes,
            irregular_overrides: raw.irregular_overrides,
            rejected_rules,
        }
    }
}

fn convert_rules<R, T>(
    raw: Vec<R>,
    rule_id: impl Fn(&R) -> String,
    convert: impl Fn(R) -> Result<T, GrammarError>,
    rejected: &mut Vec<RejectedRule>,
) -> Vec<T> {
    let mut rules = Vec::with_capacity(raw.len());
    for r in raw {
        let id = rule_id(&r);
        match convert(r) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                warn!(rule_id = %id, error = %e, "rejecting rule");
                rejected.push(RejectedRule {
                    rule_id: id,
                    reason: e.to_string(),
                });
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Operation;
    use crate::typology::MorphologicalType;

    const DOCUMENT: &str = r#"{
        "language_id": "lang_test",
        "syntax": { "word_order": "SOV" },
        "parts_of_speech": [{ "pos_id": "noun", "name": "Noun" }],
        "inflection_dimensions": [
            { "dim_id": "number", "name": "Number", "applies_to_pos": ["noun"],
              "values": [{ "val_id": "sg", "name": "Singular" }, { "val_id": "pl", "name": "Plural" }] }
        ],
        "inflections": [
            { "rule_id": "pl", "pos": "noun", "dimension_values": { "number": "pl" },
              "tag": "PL", "type": "suffix", "affix": "-s" },
            { "rule_id": "broken", "pos_id": "noun", "tag": "", "type": "infix" },
            { "rule_id": "weird", "pos_id": "noun", "tag": "", "type": "metathesis" }
        ],
        "derivation_rules": [
            { "rule_id": "agent", "source_pos_id": "verb", "target_pos_id": "noun",
              "type": "suffix", "affix": "-er" }
        ],
        "typology": { "morphological_type": "agglutinative", "synthesis_index": 3.1 },
        "affix_slots": [{ "slot_id": "num", "position": 1, "dimension_id": "number" }],
        "grammar_manual": []
    }"#;

    #[test]
    fn loads_document_and_rejects_bad_rules() {
        let grammar = GrammarConfig::from_json(DOCUMENT).unwrap();
        assert_eq!(grammar.language_id, "lang_test");
        assert_eq!(grammar.inflection_rules.len(), 1);
        assert_eq!(grammar.inflection_rules[0].operation, Operation::Suffix);
        assert_eq!(grammar.derivation_rules.len(), 1);
        assert_eq!(
            grammar.typology.morphological_type,
            Some(MorphologicalType::Agglutinative)
        );
        assert_eq!(grammar.typology.synthesis_index, 3.1);
        assert_eq!(grammar.affix_slots[0].position, 1);

        let rejected: Vec<&str> = grammar.rejected_rules.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(rejected, vec!["broken", "weird"]);
        assert_eq!(grammar.rejected_rules[0].reason, "rule broken: infix: missing config");
    }

    #[test]
    fn empty_document_uses_defaults() {
        let grammar = GrammarConfig::from_json("{}").unwrap();
        assert_eq!(grammar.language_id, "lang_proto");
        assert!(grammar.inflection_rules.is_empty());
        assert_eq!(
            grammar.typology.morphological_type,
            Some(MorphologicalType::Fusional)
        );
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = GrammarConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GrammarError::Json(_)));
    }

    #[test]
    fn lookups_by_id_and_pos() {
        let grammar = GrammarConfig::from_json(DOCUMENT).unwrap();
        assert!(grammar.rule("pl").is_some());
        assert!(grammar.rule("broken").is_none());
        assert!(grammar.derivation_rule("agent").is_some());
        assert_eq!(grammar.active_rules("noun").count(), 1);
        assert_eq!(grammar.active_rules("verb").count(), 0);
        assert_eq!(grammar.dimensions_for("noun").count(), 1);
        assert_eq!(grammar.dimensions_for("verb").count(), 0);
    }

    #[test]
    fn looked_up_rules_outlive_the_pos_id() {
        let grammar = GrammarConfig::with_rules(
            TypologyConfig::default(),
            vec![InflectionRule::new("pl", "noun", Operation::Suffix).with_affix("-s")],
        );
        let found = {
            let pos_id = String::from("noun");
            grammar.active_rules(&pos_id).next()
        };
        assert_eq!(found.map(|r| r.rule_id.as_str()), Some("pl"));

        let dims = {
            let pos_id = String::from("verb");
            grammar.dimensions_for(&pos_id).count()
        };
        assert_eq!(dims, 0);
    }
}
