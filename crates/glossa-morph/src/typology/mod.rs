// Typology-aware inflection: one strategy per morphological type

mod agglutinative;
mod fusional;
mod isolating;

pub use agglutinative::{AgglutinativeChain, Polysynthetic};
pub use fusional::Fusional;
pub use isolating::{Isolating, SingleRuleSearch};

use tracing::debug;

use glossa_core::grammar::GrammarConfig;
use glossa_core::outcome::InflectionOutcome;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::DimensionValues;
use glossa_core::typology::MorphologicalType;

/// What the caller wants inflected: a lexicon entry's root, its part of
/// speech and the requested dimension-value combination.
#[derive(Debug, Clone, Copy)]
pub struct InflectionRequest<'a> {
    pub word: &'a str,
    pub entry_id: &'a str,
    pub pos_id: &'a str,
    pub dimension_values: &'a DimensionValues,
}

impl<'a> InflectionRequest<'a> {
    pub fn new(word: &'a str, entry_id: &'a str, pos_id: &'a str, dimension_values: &'a DimensionValues) -> Self {
        Self {
            word,
            entry_id,
            pos_id,
            dimension_values,
        }
    }
}

/// A way of combining rules into one inflected form.
///
/// Strategies hold no state; the grammar and inventory are passed in on
/// every call and never modified.
pub trait TypologyStrategy: Sync {
    /// Short name used in traces and logs.
    fn name(&self) -> &'static str;

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome;
}

/// The strategy for a typology. An unrecognized typology gets a plain
/// single-rule search.
pub fn strategy_for(typology: Option<MorphologicalType>) -> &'static dyn TypologyStrategy {
    match typology {
        Some(MorphologicalType::Isolating) => &Isolating,
        Some(MorphologicalType::Agglutinative) => &AgglutinativeChain,
        Some(MorphologicalType::Fusional) => &Fusional,
        Some(MorphologicalType::Polysynthetic) => &Polysynthetic,
        None => &SingleRuleSearch,
    }
}

/// Inflect `request.word` the way the grammar's typology combines rules.
pub fn apply_inflection_typology_aware(
    request: &InflectionRequest<'_>,
    grammar: &GrammarConfig,
    inventory: &PhonemeInventory,
) -> InflectionOutcome {
    let strategy = strategy_for(grammar.typology.morphological_type);
    debug!(
        strategy = strategy.name(),
        entry_id = request.entry_id,
        pos_id = request.pos_id,
        "dispatching inflection"
    );
    strategy.inflect(request, grammar, inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::typology::TypologyConfig;

    #[test]
    fn every_typology_has_a_strategy() {
        assert_eq!(strategy_for(Some(MorphologicalType::Isolating)).name(), "isolating");
        assert_eq!(
            strategy_for(Some(MorphologicalType::Agglutinative)).name(),
            "agglutinative"
        );
        assert_eq!(strategy_for(Some(MorphologicalType::Fusional)).name(), "fusional");
        assert_eq!(
            strategy_for(Some(MorphologicalType::Polysynthetic)).name(),
            "polysynthetic"
        );
        assert_eq!(strategy_for(None).name(), "rule search");
    }

    #[test]
    fn dispatch_follows_grammar_typology() {
        let grammar = GrammarConfig::with_rules(TypologyConfig::new(MorphologicalType::Isolating), Vec::new());
        let dims = DimensionValues::new();
        let request = InflectionRequest::new("kat", "e1", "noun", &dims);
        let out = apply_inflection_typology_aware(&request, &grammar, &PhonemeInventory::default());
        assert_eq!(out.result, "kat");
        assert!(!out.applied);
        assert_eq!(out.trace, "isolating: no inflection expected");
    }
}
