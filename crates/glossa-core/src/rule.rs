// Inflection and derivation rules
//
// The grammar document stores the operation payload as a flat record with
// one `*_config` field per operation kind. On load it is folded into the
// `Operation` sum type, so a rule that made it into a `GrammarConfig` always
// carries exactly the payload its kind needs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GrammarError, MorphError};
use crate::phoneme::PhonemeClass;

/// Dimension id to value id, e.g. `{"number": "plural", "case": "dat"}`.
pub type DimensionValues = BTreeMap<String, String>;

/// Match pattern that accepts every word.
pub const WILDCARD_PATTERN: &str = ".*";

// ---------------------------------------------------------------------------
// Operation kinds and payloads
// ---------------------------------------------------------------------------

/// The six primitive morphological operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Prefix,
    Suffix,
    Infix,
    Circumfix,
    Reduplication,
    Ablaut,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Prefix => "prefix",
            OperationKind::Suffix => "suffix",
            OperationKind::Infix => "infix",
            OperationKind::Circumfix => "circumfix",
            OperationKind::Reduplication => "reduplication",
            OperationKind::Ablaut => "ablaut",
        }
    }

    /// Parse the `type` field of a rule document.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "prefix" => Some(OperationKind::Prefix),
            "suffix" => Some(OperationKind::Suffix),
            "infix" => Some(OperationKind::Infix),
            "circumfix" => Some(OperationKind::Circumfix),
            "reduplication" => Some(OperationKind::Reduplication),
            "ablaut" => Some(OperationKind::Ablaut),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert `morpheme` right after the first match of `position_regex`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InfixConfig {
    #[serde(default)]
    pub position_regex: String,
    #[serde(default)]
    pub morpheme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CircumfixConfig {
    #[serde(default)]
    pub prefix_part: String,
    #[serde(default)]
    pub suffix_part: String,
}

/// How much of the word a reduplication copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduplicationMode {
    /// The whole word.
    #[default]
    Full,
    /// The first syllable, copied before the word.
    PartialOnset,
    /// The last syllable, copied after the word.
    PartialCoda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReduplicationConfig {
    #[serde(default)]
    pub mode: ReduplicationMode,
}

/// Replace the first `target_vowel` with `replacement_vowel`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AblautConfig {
    #[serde(default)]
    pub target_vowel: String,
    #[serde(default)]
    pub replacement_vowel: String,
}

/// An operation together with the payload its kind requires.
///
/// Prefix and suffix take the rule's (possibly condition-resolved) affix and
/// carry no payload of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Prefix,
    Suffix,
    Infix(InfixConfig),
    Circumfix(CircumfixConfig),
    Reduplication(ReduplicationMode),
    Ablaut(AblautConfig),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Prefix => OperationKind::Prefix,
            Operation::Suffix => OperationKind::Suffix,
            Operation::Infix(_) => OperationKind::Infix,
            Operation::Circumfix(_) => OperationKind::Circumfix,
            Operation::Reduplication(_) => OperationKind::Reduplication,
            Operation::Ablaut(_) => OperationKind::Ablaut,
        }
    }

    pub fn infix(position_regex: impl Into<String>, morpheme: impl Into<String>) -> Self {
        Operation::Infix(InfixConfig {
            position_regex: position_regex.into(),
            morpheme: morpheme.into(),
        })
    }

    pub fn circumfix(prefix_part: impl Into<String>, suffix_part: impl Into<String>) -> Self {
        Operation::Circumfix(CircumfixConfig {
            prefix_part: prefix_part.into(),
            suffix_part: suffix_part.into(),
        })
    }

    pub fn ablaut(target_vowel: impl Into<String>, replacement_vowel: impl Into<String>) -> Self {
        Operation::Ablaut(AblautConfig {
            target_vowel: target_vowel.into(),
            replacement_vowel: replacement_vowel.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Conditional allomorphy
// ---------------------------------------------------------------------------

/// The test a conditional clause runs against the word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConditionTest {
    /// The word's last phoneme belongs to `class`.
    #[serde(rename = "ends_with_phoneme_class")]
    EndsWith {
        #[serde(default)]
        class: PhonemeClass,
    },
    /// The word's first phoneme belongs to `class`.
    #[serde(rename = "starts_with_phoneme_class")]
    StartsWith {
        #[serde(default)]
        class: PhonemeClass,
    },
    /// The whole word matches a regular expression.
    #[serde(rename = "matches_regex")]
    Matches {
        #[serde(default)]
        regex: String,
    },
}

/// IF test THEN `then_affix` ELSE `else_affix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalClause {
    #[serde(flatten)]
    pub test: ConditionTest,
    #[serde(default)]
    pub then_affix: String,
    #[serde(default)]
    pub else_affix: String,
}

impl ConditionalClause {
    pub fn new(test: ConditionTest, then_affix: impl Into<String>, else_affix: impl Into<String>) -> Self {
        Self {
            test,
            then_affix: then_affix.into(),
            else_affix: else_affix.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// The part of a rule the applicator needs, shared by inflection and
/// derivation rules.
pub trait AffixRule {
    /// Gating pattern; `None` for rules that accept every word.
    fn match_pattern(&self) -> Option<&str>;

    /// Literal affix used by prefix and suffix operations.
    fn affix(&self) -> &str;

    fn condition(&self) -> Option<&ConditionalClause>;

    fn operation(&self) -> &Operation;
}

/// A rule mapping one dimension-value combination of a part of speech to an
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionRule {
    pub rule_id: String,
    pub pos_id: String,
    pub dimension_values: DimensionValues,
    pub operation: Operation,
    pub affix: String,
    pub tag: String,
    pub match_pattern: String,
    pub enabled: bool,
    pub condition: Option<ConditionalClause>,
    /// Agglutinative: the affix slot this rule fills.
    pub slot_id: Option<String>,
    /// Fusional: the conjugation class this rule belongs to.
    pub conjugation_class_id: Option<String>,
    /// Fusional: further combinations this single rule also encodes.
    pub fused_dimensions: Vec<DimensionValues>,
}

impl InflectionRule {
    /// An enabled rule with an empty dimension map and a wildcard gate.
    pub fn new(rule_id: impl Into<String>, pos_id: impl Into<String>, operation: Operation) -> Self {
        Self {
            rule_id: rule_id.into(),
            pos_id: pos_id.into(),
            dimension_values: DimensionValues::new(),
            operation,
            affix: String::new(),
            tag: String::new(),
            match_pattern: WILDCARD_PATTERN.to_string(),
            enabled: true,
            condition: None,
            slot_id: None,
            conjugation_class_id: None,
            fused_dimensions: Vec::new(),
        }
    }

    pub fn with_affix(mut self, affix: impl Into<String>) -> Self {
        self.affix = affix.into();
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimension_values.insert(dimension.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_match_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.match_pattern = pattern.into();
        self
    }

    pub fn with_condition(mut self, condition: ConditionalClause) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.slot_id = Some(slot_id.into());
        self
    }

    pub fn with_conjugation_class(mut self, class_id: impl Into<String>) -> Self {
        self.conjugation_class_id = Some(class_id.into());
        self
    }

    pub fn with_fused_dimensions(mut self, values: DimensionValues) -> Self {
        self.fused_dimensions.push(values);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Whether this rule is selectable for `pos_id`.
    pub fn is_active_for(&self, pos_id: &str) -> bool {
        self.enabled && self.pos_id == pos_id
    }

    /// Whether the rule encodes exactly `request`, either through its own
    /// dimension map or through one of its fused mappings.
    ///
    /// Equality is two-directional: a rule that also encodes a dimension the
    /// request does not mention is not a match.
    pub fn encodes(&self, request: &DimensionValues) -> bool {
        self.dimension_values == *request || self.fused_dimensions.iter().any(|f| f == request)
    }
}

impl AffixRule for InflectionRule {
    fn match_pattern(&self) -> Option<&str> {
        Some(self.match_pattern.as_str())
    }

    fn affix(&self) -> &str {
        &self.affix
    }

    fn condition(&self) -> Option<&ConditionalClause> {
        self.condition.as_ref()
    }

    fn operation(&self) -> &Operation {
        &self.operation
    }
}

/// A rule deriving a word of `target_pos_id` from a word of `source_pos_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationRule {
    pub rule_id: String,
    pub name: String,
    pub source_pos_id: String,
    pub target_pos_id: String,
    pub operation: Operation,
    pub affix: String,
    pub condition: Option<ConditionalClause>,
    pub semantic_note: String,
}

impl DerivationRule {
    pub fn new(
        rule_id: impl Into<String>,
        source_pos_id: impl Into<String>,
        target_pos_id: impl Into<String>,
        operation: Operation,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            name: String::new(),
            source_pos_id: source_pos_id.into(),
            target_pos_id: target_pos_id.into(),
            operation,
            affix: String::new(),
            condition: None,
            semantic_note: String::new(),
        }
    }

    pub fn with_affix(mut self, affix: impl Into<String>) -> Self {
        self.affix = affix.into();
        self
    }

    pub fn with_condition(mut self, condition: ConditionalClause) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl AffixRule for DerivationRule {
    fn match_pattern(&self) -> Option<&str> {
        None
    }

    fn affix(&self) -> &str {
        &self.affix
    }

    fn condition(&self) -> Option<&ConditionalClause> {
        self.condition.as_ref()
    }

    fn operation(&self) -> &Operation {
        &self.operation
    }
}

// ---------------------------------------------------------------------------
// Document form
// ---------------------------------------------------------------------------

fn default_match_pattern() -> String {
    WILDCARD_PATTERN.to_string()
}

/// The flat operation record shared by inflection and derivation documents.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOperation {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    affix: String,
    #[serde(default)]
    infix_config: Option<InfixConfig>,
    #[serde(default)]
    circumfix_config: Option<CircumfixConfig>,
    #[serde(default)]
    reduplication_config: Option<ReduplicationConfig>,
    #[serde(default)]
    ablaut_config: Option<AblautConfig>,
}

impl RawOperation {
    /// Fold the flat record into an `Operation`, returning it with the affix.
    fn resolve(self, rule_id: &str) -> Result<(Operation, String), GrammarError> {
        let Some(kind) = OperationKind::parse(&self.kind) else {
            return Err(GrammarError::UnknownOperation {
                rule_id: rule_id.to_string(),
                kind: self.kind,
            });
        };
        let missing = || GrammarError::InvalidRule {
            rule_id: rule_id.to_string(),
            source: MorphError::MissingOperationConfig { kind },
        };

        let operation = match kind {
            OperationKind::Prefix => Operation::Prefix,
            OperationKind::Suffix => Operation::Suffix,
            OperationKind::Infix => match self.infix_config {
                Some(cfg) if !cfg.position_regex.is_empty() && !cfg.morpheme.is_empty() => {
                    Operation::Infix(cfg)
                }
                _ => return Err(missing()),
            },
            OperationKind::Circumfix => match self.circumfix_config {
                Some(cfg) if !(cfg.prefix_part.is_empty() && cfg.suffix_part.is_empty()) => {
                    Operation::Circumfix(cfg)
                }
                _ => return Err(missing()),
            },
            OperationKind::Reduplication => match self.reduplication_config {
                Some(cfg) => Operation::Reduplication(cfg.mode),
                None => return Err(missing()),
            },
            OperationKind::Ablaut => match self.ablaut_config {
                Some(cfg) if !cfg.target_vowel.is_empty() => Operation::Ablaut(cfg),
                _ => return Err(missing()),
            },
        };
        Ok((operation, self.affix))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawInflectionRule {
    pub(crate) rule_id: String,
    #[serde(alias = "pos")]
    pos_id: String,
    #[serde(default)]
    dimension_values: DimensionValues,
    #[serde(default)]
    tag: String,
    #[serde(default = "default_match_pattern")]
    match_regex: String,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    condition: Option<ConditionalClause>,
    #[serde(flatten)]
    operation: RawOperation,
    #[serde(default)]
    slot_id: Option<String>,
    #[serde(default)]
    conjugation_class_id: Option<String>,
    #[serde(default)]
    fused_dimensions: Option<Vec<DimensionValues>>,
}

impl RawInflectionRule {
    pub(crate) fn into_rule(self) -> Result<InflectionRule, GrammarError> {
        let (operation, affix) = self.operation.resolve(&self.rule_id)?;
        Ok(InflectionRule {
            rule_id: self.rule_id,
            pos_id: self.pos_id,
            dimension_values: self.dimension_values,
            operation,
            affix,
            tag: self.tag,
            match_pattern: self.match_regex,
            enabled: !self.disabled,
            condition: self.condition,
            slot_id: self.slot_id.filter(|s| !s.is_empty()),
            conjugation_class_id: self.conjugation_class_id.filter(|s| !s.is_empty()),
            fused_dimensions: self.fused_dimensions.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDerivationRule {
    pub(crate) rule_id: String,
    #[serde(default)]
    name: String,
    source_pos_id: String,
    target_pos_id: String,
    #[serde(default)]
    condition: Option<ConditionalClause>,
    #[serde(flatten)]
    operation: RawOperation,
    #[serde(default)]
    semantic_note: String,
}

impl RawDerivationRule {
    pub(crate) fn into_rule(self) -> Result<DerivationRule, GrammarError> {
        let (operation, affix) = self.operation.resolve(&self.rule_id)?;
        Ok(DerivationRule {
            rule_id: self.rule_id,
            name: self.name,
            source_pos_id: self.source_pos_id,
            target_pos_id: self.target_pos_id,
            operation,
            affix,
            condition: self.condition,
            semantic_note: self.semantic_note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_rule(json: &str) -> Result<InflectionRule, GrammarError> {
        let raw: RawInflectionRule = serde_json::from_str(json).unwrap();
        raw.into_rule()
    }

    fn dims(pairs: &[(&str, &str)]) -> DimensionValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn suffix_rule_from_document() {
        let rule = parse_rule(
            r#"{
                "rule_id": "pl",
                "pos_id": "noun",
                "dimension_values": { "number": "plural" },
                "tag": "PL",
                "type": "suffix",
                "affix": "-s",
                "match_regex": ".*",
                "disabled": false,
                "condition": null
            }"#,
        )
        .unwrap();
        assert_eq!(rule.operation, Operation::Suffix);
        assert_eq!(rule.affix, "-s");
        assert_eq!(rule.tag, "PL");
        assert!(rule.enabled);
        assert_eq!(rule.dimension_values, dims(&[("number", "plural")]));
    }

    #[test]
    fn legacy_pos_field_and_defaults() {
        let rule = parse_rule(r#"{ "rule_id": "r", "pos": "verb", "type": "prefix", "affix": "re-" }"#)
            .unwrap();
        assert_eq!(rule.pos_id, "verb");
        assert_eq!(rule.match_pattern, WILDCARD_PATTERN);
        assert!(rule.enabled);
        assert!(rule.fused_dimensions.is_empty());
    }

    #[test]
    fn payload_is_folded_into_operation() {
        let rule = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "v", "type": "ablaut",
                 "ablaut_config": { "target_vowel": "i", "replacement_vowel": "a" } }"#,
        )
        .unwrap();
        assert_eq!(rule.operation, Operation::ablaut("i", "a"));

        let rule = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "v", "type": "reduplication",
                 "reduplication_config": { "mode": "partial_coda" } }"#,
        )
        .unwrap();
        assert_eq!(
            rule.operation,
            Operation::Reduplication(ReduplicationMode::PartialCoda)
        );
    }

    #[test]
    fn missing_payload_is_rejected() {
        let err = parse_rule(r#"{ "rule_id": "r", "pos_id": "v", "type": "infix" }"#).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::InvalidRule {
                source: MorphError::MissingOperationConfig {
                    kind: OperationKind::Infix
                },
                ..
            }
        ));

        let err = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "v", "type": "ablaut",
                 "ablaut_config": { "target_vowel": "", "replacement_vowel": "a" } }"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "rule r: ablaut: missing config");

        let err = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "v", "type": "circumfix",
                 "circumfix_config": { "prefix_part": "", "suffix_part": "" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GrammarError::InvalidRule { .. }));
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = parse_rule(r#"{ "rule_id": "r", "pos_id": "v", "type": "metathesis" }"#).unwrap_err();
        assert!(matches!(err, GrammarError::UnknownOperation { .. }));
    }

    #[test]
    fn condition_clause_from_document() {
        let rule = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "n", "type": "suffix", "affix": "",
                 "condition": { "type": "ends_with_phoneme_class", "class": "vowel",
                                "then_affix": "-s", "else_affix": "-es" } }"#,
        )
        .unwrap();
        let cond = rule.condition.unwrap();
        assert_eq!(
            cond.test,
            ConditionTest::EndsWith {
                class: PhonemeClass::Vowel
            }
        );
        assert_eq!(cond.then_affix, "-s");
        assert_eq!(cond.else_affix, "-es");

        let rule = parse_rule(
            r#"{ "rule_id": "r", "pos_id": "n", "type": "prefix",
                 "condition": { "type": "matches_regex", "regex": "^[aeiou]",
                                "then_affix": "an-", "else_affix": "a-" } }"#,
        )
        .unwrap();
        assert_eq!(
            rule.condition.unwrap().test,
            ConditionTest::Matches {
                regex: "^[aeiou]".to_string()
            }
        );
    }

    #[test]
    fn encodes_requires_exact_combination() {
        let rule = InflectionRule::new("r", "verb", Operation::Suffix)
            .with_dimension("person", "1")
            .with_dimension("number", "sg")
            .with_fused_dimensions(dims(&[("person", "3"), ("number", "sg")]));

        assert!(rule.encodes(&dims(&[("number", "sg"), ("person", "1")])));
        assert!(rule.encodes(&dims(&[("person", "3"), ("number", "sg")])));
        assert!(!rule.encodes(&dims(&[("person", "1")])));
        assert!(!rule.encodes(&dims(&[("person", "1"), ("number", "sg"), ("tense", "past")])));
    }

    #[test]
    fn active_for_checks_pos_and_enabled() {
        let rule = InflectionRule::new("r", "noun", Operation::Suffix);
        assert!(rule.is_active_for("noun"));
        assert!(!rule.is_active_for("verb"));
        assert!(!rule.clone().disabled().is_active_for("noun"));
    }

    #[test]
    fn derivation_rule_has_no_gate() {
        let raw: RawDerivationRule = serde_json::from_str(
            r#"{ "rule_id": "d", "name": "agent", "source_pos_id": "verb",
                 "target_pos_id": "noun", "type": "suffix", "affix": "-er" }"#,
        )
        .unwrap();
        let rule = raw.into_rule().unwrap();
        assert_eq!(AffixRule::match_pattern(&rule), None);
        assert_eq!(AffixRule::affix(&rule), "-er");
        assert_eq!(rule.name, "agent");
    }
}
