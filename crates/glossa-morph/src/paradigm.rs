// Paradigm preview: every enabled rule of a part of speech applied to the
// same root, independently and in rule order.

use glossa_core::outcome::ParadigmCell;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::InflectionRule;

use crate::applicator::apply_inflection;

/// Build the paradigm table of `word` for `pos_id`.
///
/// Rules are not chained: each cell starts from `word`. A rule that fails
/// (gate, bad pattern) still gets its cell, marked not applied.
pub fn generate_paradigm(
    word: &str,
    pos_id: &str,
    rules: &[InflectionRule],
    inventory: &PhonemeInventory,
) -> Vec<ParadigmCell> {
    rules
        .iter()
        .filter(|r| r.is_active_for(pos_id))
        .map(|rule| {
            let outcome = apply_inflection(word, rule, inventory);
            ParadigmCell {
                rule_id: rule.rule_id.clone(),
                dimension_values: rule.dimension_values.clone(),
                tag: rule.tag.clone(),
                result: outcome.result,
                applied: outcome.applied,
                trace: outcome.trace,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::rule::Operation;

    fn rules() -> Vec<InflectionRule> {
        vec![
            InflectionRule::new("pl", "noun", Operation::Suffix)
                .with_affix("-s")
                .with_dimension("number", "pl")
                .with_tag("PL"),
            InflectionRule::new("past", "verb", Operation::Suffix).with_affix("-ed"),
            InflectionRule::new("dim", "noun", Operation::Suffix)
                .with_affix("-ling")
                .disabled(),
            InflectionRule::new("voc", "noun", Operation::Prefix)
                .with_affix("o-")
                .with_match_pattern("^[aeiou]"),
            InflectionRule::new("gen", "noun", Operation::Suffix)
                .with_affix("-es")
                .with_tag("GEN"),
        ]
    }

    #[test]
    fn cells_follow_rule_order_for_pos() {
        let cells = generate_paradigm("kat", "noun", &rules(), &PhonemeInventory::default());
        let ids: Vec<&str> = cells.iter().map(|c| c.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["pl", "voc", "gen"]);
        assert_eq!(cells[0].result, "kats");
        assert_eq!(cells[0].tag, "PL");
        assert_eq!(cells[0].dimension_values.get("number").map(String::as_str), Some("pl"));
        // Independent, not chained.
        assert_eq!(cells[2].result, "kates");
    }

    #[test]
    fn failed_rule_keeps_its_cell() {
        let cells = generate_paradigm("kat", "noun", &rules(), &PhonemeInventory::default());
        assert_eq!(cells[1].result, "kat");
        assert!(!cells[1].applied);
        assert!(cells[2].applied);
    }

    #[test]
    fn unknown_pos_yields_empty_table() {
        assert!(generate_paradigm("kat", "adj", &rules(), &PhonemeInventory::default()).is_empty());
    }
}
