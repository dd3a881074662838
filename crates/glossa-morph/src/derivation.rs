// Derivation: turning a word of one part of speech into another.
//
// Derivation rules go through the same applicator as inflection rules but
// have no gate pattern, so they apply to every word.

use glossa_core::grammar::LexiconEntry;
use glossa_core::outcome::{DerivedWord, InflectionOutcome};
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::DerivationRule;

use crate::applicator::apply_rule;

pub fn derive(word: &str, rule: &DerivationRule, inventory: &PhonemeInventory) -> InflectionOutcome {
    apply_rule(word, rule, inventory)
}

/// Preview `rule` over a set of entries, in entry order.
pub fn generate_derived_words(
    entries: &[LexiconEntry],
    rule: &DerivationRule,
    inventory: &PhonemeInventory,
) -> Vec<DerivedWord> {
    entries
        .iter()
        .map(|entry| {
            let outcome = derive(&entry.root, rule, inventory);
            DerivedWord {
                entry_id: entry.entry_id.clone(),
                source: entry.root.clone(),
                derived: outcome.result,
                applied: outcome.applied,
                trace: outcome.trace,
            }
        })
        .collect()
}
