// Fusional strategy: irregular overrides, then one fused rule per request,
// scoped by conjugation class.
//
// A root belongs to the first class of its part of speech whose stem
// pattern matches it. Rules assigned to some other class are out of scope;
// rules assigned to no class are shared by every class and tried after the
// class's own rules.

use hashbrown::HashMap;

use glossa_core::error::MorphError;
use glossa_core::grammar::GrammarConfig;
use glossa_core::outcome::InflectionOutcome;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::InflectionRule;
use glossa_core::typology::ConjugationClass;

use super::{InflectionRequest, TypologyStrategy};
use crate::applicator::apply_inflection;
use crate::pattern;

const NOTE_SEPARATOR: &str = " | ";

/// Irregular forms first, then a single fused rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fusional;

impl TypologyStrategy for Fusional {
    fn name(&self) -> &'static str {
        "fusional"
    }

    fn inflect(
        &self,
        request: &InflectionRequest<'_>,
        grammar: &GrammarConfig,
        inventory: &PhonemeInventory,
    ) -> InflectionOutcome {
        if let Some(ov) = grammar
            .irregular_overrides
            .iter()
            .find(|o| o.covers(request.entry_id, request.dimension_values))
        {
            return InflectionOutcome::applied(
                ov.surface_form.clone(),
                format!("fusional: irregular override -> \"{}\"", ov.surface_form),
            );
        }

        let mut notes = Vec::new();
        let class = active_class(request, grammar, &mut notes);
        let class_of = rule_classes(grammar);

        let candidate = |in_class: bool| {
            grammar.active_rules(request.pos_id).find(|r| {
                if !r.encodes(request.dimension_values) {
                    return false;
                }
                match (assigned_class(r, &class_of), class) {
                    (Some(id), Some(active)) => in_class && id == active.class_id,
                    (Some(_), None) => false,
                    (None, _) => !in_class,
                }
            })
        };

        let Some(rule) = candidate(true).or_else(|| candidate(false)) else {
            let mut trace = MorphError::NoApplicableRule {
                strategy: self.name(),
                reason: "no matching rule",
            }
            .to_string();
            for note in notes {
                trace.push_str(NOTE_SEPARATOR);
                trace.push_str(&note);
            }
            return InflectionOutcome::unchanged(request.word, trace);
        };

        if let Some(c) = class {
            notes.push(format!("class[{}]", c.display_name()));
        }
        let mut outcome = apply_inflection(request.word, rule, inventory);
        notes.push(outcome.trace);
        outcome.trace = format!("fusional: {}", notes.join(NOTE_SEPARATOR));
        outcome
    }
}

/// The first class of the request's part of speech whose stem pattern
/// accepts the root. Classes with a malformed pattern are skipped and noted.
fn active_class<'g>(
    request: &InflectionRequest<'_>,
    grammar: &'g GrammarConfig,
    notes: &mut Vec<String>,
) -> Option<&'g ConjugationClass> {
    for class in grammar
        .conjugation_classes
        .iter()
        .filter(|c| c.applies_to_pos == request.pos_id)
    {
        if class.stem_pattern.is_empty() {
            return Some(class);
        }
        match pattern::is_match(&class.stem_pattern, request.word) {
            Ok(true) => return Some(class),
            Ok(false) => {}
            Err(e) => notes.push(format!("class[{}]: {e}", class.display_name())),
        }
    }
    None
}

/// Rule id to class id, from the classes' member lists.
fn rule_classes(grammar: &GrammarConfig) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for class in &grammar.conjugation_classes {
        for rule_id in &class.rule_ids {
            map.entry(rule_id.as_str()).or_insert(class.class_id.as_str());
        }
    }
    map
}

/// A rule's own class id wins over membership lists.
fn assigned_class<'a>(rule: &'a InflectionRule, class_of: &HashMap<&'a str, &'a str>) -> Option<&'a str> {
    rule.conjugation_class_id
        .as_deref()
        .or_else(|| class_of.get(rule.rule_id.as_str()).copied())
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
        let mut g = GrammarConfig::with_rules(
            TypologyConfig::new(MorphologicalType::Fusional),
            vec![
                InflectionRule::new("weak_past", "verb", Operation::Suffix)
                    .with_affix("-ed")
                    .with_dimension("tense", "past")
                    .with_conjugation_class("weak"),
                InflectionRule::new("strong_past", "verb", Operation::ablaut("i", "a"))
                    .with_dimension("tense", "past"),
                InflectionRule::new("pres_3sg", "verb", Operation::Suffix)
                    .with_affix("-s")
                    .with_dimension("tense", "pres")
                    .with_dimension("person", "3")
                    .with_fused_dimensions(dims(&[("tense", "pres"), ("person", "3"), ("number", "sg")])),
            ],
        );
        g.conjugation_classes = vec![
            ConjugationClass::new("strong", "verb", "^s[iu]ng$").with_rule("strong_past"),
            ConjugationClass::new("weak", "verb", ""),
        ];
        g
    }

    fn inflect(g: &GrammarConfig, word: &str, entry: &str, d: &DimensionValues) -> InflectionOutcome {
        Fusional.inflect(&InflectionRequest::new(word, entry, "verb", d), g, &PhonemeInventory::default())
    }

    #[test]
    fn override_wins_over_rule() {
        let mut g = grammar();
        let d = dims(&[("tense", "past")]);
        g.irregular_overrides.push(IrregularOverride::new("go", d.clone(), "went"));
        let out = inflect(&g, "walk", "go", &d);
        assert_eq!(out.result, "went");
        assert!(out.applied);
        assert_eq!(out.trace, "fusional: irregular override -> \"went\"");
    }

    #[test]
    fn class_selects_rule_by_stem() {
        let g = grammar();
        let d = dims(&[("tense", "past")]);

        let out = inflect(&g, "sing", "e1", &d);
        assert_eq!(out.result, "sang");
        assert_eq!(out.trace, "fusional: class[strong] | ablaut: \"i\" -> \"a\"");

        let out = inflect(&g, "walk", "e2", &d);
        assert_eq!(out.result, "walked");
    }

    #[test]
    fn unclassed_rules_are_shared() {
        let g = grammar();
        let out = inflect(&g, "sing", "e1", &dims(&[("person", "3"), ("tense", "pres")]));
        assert_eq!(out.result, "sings");
        let out = inflect(&g, "walk", "e2", &dims(&[("person", "3"), ("number", "sg"), ("tense", "pres")]));
        assert_eq!(out.result, "walks");
    }

    #[test]
    fn request_must_equal_rule_combination() {
        let g = grammar();
        let out = inflect(&g, "walk", "e2", &dims(&[("person", "3")]));
        assert!(!out.applied);
        assert_eq!(out.result, "walk");
        assert_eq!(out.trace, "fusional: no matching rule");
    }

    #[test]
    fn malformed_stem_pattern_skips_class() {
        let mut g = grammar();
        g.conjugation_classes[0].stem_pattern = "(".to_string();
        let out = inflect(&g, "sing", "e1", &dims(&[("tense", "past")]));
        assert_eq!(out.result, "singed");
        assert!(out.trace.starts_with("fusional: class[strong]: invalid pattern /(/"));
    }

    #[test]
    fn no_classes_means_only_unclassed_rules() {
        let mut g = grammar();
        g.conjugation_classes.clear();
        let out = inflect(&g, "walk", "e2", &dims(&[("tense", "past")]));
        assert_eq!(out.result, "walk");
        assert_eq!(out.trace, "fusional: ablaut: \"i\" not found");
        assert!(out.applied);
    }
}
