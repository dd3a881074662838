// Single-rule strategies: isolating, and the search used for grammars whose
// typology the engine does not recognize.

use glossa_core::error::MorphError;
use glossa_core::grammar::GrammarConfig;
use glossa_core::outcome::InflectionOutcome;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::InflectionRule;

use super::{InflectionRequest, TypologyStrategy};
use crate::applicator::apply_inflection;

/// The first enabled rule of the request's part of speech that encodes
/// exactly the requested combination.
pub(super) fn find_exact<'g>(request: &InflectionRequest<'_>, rules: impl IntoIterator<Item = &'g InflectionRule>) -> Option<&'g InflectionRule> {
    rules
        .into_iter()
        .find(|r| r.is_active_for(request.pos_id) && r.encodes(request.dimension_values))
}

fn no_rule(word: &str, strategy: &'static str, reason: &'static str) -> InflectionOutcome {
    InflectionOutcome::unchanged(word, MorphError::NoApplicableRule { strategy, reason }.to_string())
}

/// Marking is optional: a missing rule is the normal case, not a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Isolating;

impl TypologyStrategy for Isolating {
    fn name(&self) -> &'static str {
        "isolating"
    }

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome {
        match find_exact(request, &grammar.inflection_rules) {
            Some(rule) => apply_inflection(request.word, rule, inventory),
            None => no_rule(request.word, self.name(), "no inflection expected"),
        }
    }
}

/// Plain exact-match search with no overrides or classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleRuleSearch;

impl TypologyStrategy for SingleRuleSearch {
    fn name(&self) -> &'static str {
        "rule search"
    }

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome {
        match find_exact(request, &grammar.inflection_rules) {
            Some(rule) => apply_inflection(request.word, rule, inventory),
            None => no_rule(request.word, self.name(), "no matching rule"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::rule::{DimensionValues, Operation};
    use glossa_core::typology::{IrregularOverride, MorphologicalType, TypologyConfig};

    fn dims(pairs: &[(&str, &str)]) -> DimensionValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn grammar() -> GrammarConfig {
        GrammarConfig::with_rules(
            TypologyConfig::new(MorphologicalType::Isolating),
            vec![
                InflectionRule::new("off", "noun", Operation::Suffix)
                    .with_affix("-x")
                    .with_dimension("number", "pl")
                    .disabled(),
                InflectionRule::new("pl", "noun", Operation::Prefix)
                    .with_affix("ma-")
                    .with_dimension("number", "pl"),
            ],
        )
    }

    #[test]
    fn exact_rule_is_applied() {
        let g = grammar();
        let d = dims(&[("number", "pl")]);
        let out = Isolating.inflect(&InflectionRequest::new("tao", "e", "noun", &d), &g, &PhonemeInventory::default());
        assert_eq!(out.result, "matao");
        assert!(out.applied);
    }

    #[test]
    fn missing_rule_is_no_inflection() {
        let g = grammar();
        let d = dims(&[("number", "du")]);
        let out = Isolating.inflect(&InflectionRequest::new("tao", "e", "noun", &d), &g, &PhonemeInventory::default());
        assert_eq!(out.result, "tao");
        assert!(!out.applied);
        assert_eq!(out.trace, "isolating: no inflection expected");
    }

    #[test]
    fn partial_combination_does_not_match() {
        let g = grammar();
        let d = dims(&[("number", "pl"), ("case", "acc")]);
        let out = Isolating.inflect(&InflectionRequest::new("tao", "e", "noun", &d), &g, &PhonemeInventory::default());
        assert!(!out.applied);
    }

    #[test]
    fn rule_search_ignores_overrides() {
        let mut g = grammar();
        g.typology.morphological_type = None;
        let d = dims(&[("number", "pl")]);
        g.irregular_overrides.push(IrregularOverride::new("e", d.clone(), "tatao"));
        let out = SingleRuleSearch.inflect(&InflectionRequest::new("tao", "e", "noun", &d), &g, &PhonemeInventory::default());
        assert_eq!(out.result, "matao");

        let none = dims(&[("number", "du")]);
        let out = SingleRuleSearch.inflect(&InflectionRequest::new("tao", "e", "noun", &none), &g, &PhonemeInventory::default());
        assert_eq!(out.trace, "rule search: no matching rule");
    }
}
