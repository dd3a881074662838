// Rule applicator: gate, condition, operation, trace.
//
// `applied` is false only when the gate turns the word away (or cannot be
// evaluated). Once past the gate the rule counts as applied, even if the
// operation leaves the word as it was.

use tracing::trace;

use glossa_core::error::MorphError;
use glossa_core::outcome::InflectionOutcome;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::{AffixRule, InflectionRule, Operation};

use crate::condition;
use crate::operations::{self, bare_affix, Transform};
use crate::pattern;

/// Separator between the condition trace and the operation trace.
const TRACE_SEPARATOR: &str = " | ";

/// Apply a single inflection rule to `word`.
pub fn apply_inflection(word: &str, rule: &InflectionRule, inventory: &PhonemeInventory) -> InflectionOutcome {
    let outcome = apply_rule(word, rule, inventory);
    if outcome.applied {
        trace!(rule_id = %rule.rule_id, word, result = %outcome.result, "rule applied");
    }
    outcome
}

/// Apply any rule shape the applicator understands.
pub fn apply_rule<R: AffixRule + ?Sized>(word: &str, rule: &R, inventory: &PhonemeInventory) -> InflectionOutcome {
    if let Some(gate) = rule.match_pattern() {
        if let Err(e) = check_gate(gate, word) {
            return InflectionOutcome::unchanged(word, e.to_string());
        }
    }

    let resolution = rule.condition().map(|clause| condition::resolve(word, clause, inventory));
    let affix = resolution.as_ref().map_or(rule.affix(), |r| r.affix);

    let op = match execute(word, rule.operation(), affix, inventory) {
        Ok(t) => t,
        Err(e) => return InflectionOutcome::unchanged(word, e.to_string()),
    };

    let trace = match resolution {
        Some(r) => format!("{}{TRACE_SEPARATOR}{}", r.trace, op.trace),
        None => op.trace,
    };
    InflectionOutcome::applied(op.result, trace)
}

fn check_gate(gate: &str, word: &str) -> Result<(), MorphError> {
    if pattern::is_wildcard(gate) || pattern::is_match(gate, word)? {
        Ok(())
    } else {
        Err(MorphError::GateRejected {
            pattern: gate.to_string(),
        })
    }
}

fn execute(
    word: &str,
    operation: &Operation,
    affix: &str,
    inventory: &PhonemeInventory,
) -> Result<Transform, MorphError> {
    Ok(match operation {
        Operation::Prefix => Transform {
            result: operations::prefix(word, affix),
            trace: format!("prefix \"{}\"", bare_affix(affix)),
        },
        Operation::Suffix => Transform {
            result: operations::suffix(word, affix),
            trace: format!("suffix \"{}\"", bare_affix(affix)),
        },
        Operation::Infix(cfg) => operations::infix(word, cfg)?,
        Operation::Circumfix(cfg) => Transform {
            result: operations::circumfix(word, cfg),
            trace: format!(
                "circumfix \"{}\" + word + \"{}\"",
                bare_affix(&cfg.prefix_part),
                bare_affix(&cfg.suffix_part)
            ),
        },
        Operation::Reduplication(mode) => operations::reduplicate(word, *mode, inventory),
        Operation::Ablaut(cfg) => operations::ablaut(word, cfg),
    })
}
