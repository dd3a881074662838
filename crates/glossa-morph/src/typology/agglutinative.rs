// Slot chain shared by the agglutinative and polysynthetic strategies.
//
// Slots are applied in ascending signed position, each feeding its result
// into the next. The grammar's slot list is sorted here on every call; the
// order it was declared in carries no meaning.

use glossa_core::grammar::GrammarConfig;
use glossa_core::outcome::InflectionOutcome;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::InflectionRule;
use glossa_core::typology::AffixSlot;

use super::{InflectionRequest, TypologyStrategy};
use crate::applicator::apply_inflection;

const STEP_SEPARATOR: &str = " -> ";

/// The rule bound to `slot` that realizes the requested value of the slot's
/// dimension.
fn rule_for_slot<'g>(slot: &AffixSlot, request: &InflectionRequest<'_>, grammar: &'g GrammarConfig) -> Option<&'g InflectionRule> {
    let wanted = request.dimension_values.get(&slot.dimension_id)?;
    grammar.active_rules(request.pos_id).find(|r| {
        r.slot_id.as_deref() == Some(slot.slot_id.as_str())
            && r.dimension_values.get(&slot.dimension_id) == Some(wanted)
    })
}

fn run_chain(
    label: &str,
    request: &InflectionRequest<'_>,
    grammar: &GrammarConfig,
    inventory: &PhonemeInventory,
) -> InflectionOutcome {
    let mut slots: Vec<&AffixSlot> = grammar.affix_slots.iter().collect();
    slots.sort_by_key(|s| s.position);

    let mut current = request.word.to_string();
    let mut steps = Vec::new();
    let mut any_applied = false;

    for slot in slots {
        let Some(rule) = rule_for_slot(slot, request, grammar) else {
            if slot.is_obligatory {
                steps.push(format!("slot[{}]: no rule (obligatory)", slot.display_name()));
            }
            continue;
        };
        let outcome = apply_inflection(&current, rule, inventory);
        if outcome.applied {
            steps.push(format!("slot[{}]: {}", slot.display_name(), outcome.trace));
            current = outcome.result;
            any_applied = true;
        }
    }

    let trace = if steps.is_empty() {
        format!("{label}: no slots matched")
    } else {
        format!("{label}: {}", steps.join(STEP_SEPARATOR))
    };
    InflectionOutcome {
        result: current,
        applied: any_applied,
        trace,
    }
}

/// Affixes stacked one per slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgglutinativeChain;

impl TypologyStrategy for AgglutinativeChain {
    fn name(&self) -> &'static str {
        "agglutinative"
    }

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome {
        run_chain(self.name(), request, grammar, inventory)
    }
}

/// Agglutination over a larger slot inventory; same algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct Polysynthetic;

impl TypologyStrategy for Polysynthetic {
    fn name(&self) -> &'static str {
        "polysynthetic"
    }

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome {
        run_chain(self.name(), request, grammar, inventory)
    }
}
