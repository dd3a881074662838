// Typology index estimation from the lexicon and the rule set.
//
// Both indices are rough densities, not corpus measurements: synthesis
// counts a root plus one morpheme per dimension a part of speech can be
// inflected for (capped by how many rules actually exist), fusion counts how
// many dimensions a single rule encodes.

use hashbrown::HashMap;
use serde::Serialize;

use glossa_core::grammar::{GrammarConfig, LexiconEntry};

const SYNTHESIS_RANGE: (f64, f64) = (1.0, 5.0);
const FUSION_RANGE: (f64, f64) = (1.0, 3.0);

/// Estimated indices for the typology panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypologyEstimation {
    /// Average morphemes per word, in [1, 5].
    pub synthesis_index: f64,
    /// Average dimensions encoded per rule, in [1, 3].
    pub fusion_index: f64,
    pub word_count: usize,
    /// Number of enabled inflection rules.
    pub rules_analyzed: usize,
}

pub fn estimate_typology(entries: &[LexiconEntry], grammar: &GrammarConfig) -> TypologyEstimation {
    let rules_analyzed = grammar.inflection_rules.iter().filter(|r| r.enabled).count();
    TypologyEstimation {
        synthesis_index: synthesis_index(entries, grammar),
        fusion_index: fusion_index(grammar),
        word_count: entries.len(),
        rules_analyzed,
    }
}

fn synthesis_index(entries: &[LexiconEntry], grammar: &GrammarConfig) -> f64 {
    let mut rules_per_pos: HashMap<&str, usize> = HashMap::new();
    for rule in grammar.inflection_rules.iter().filter(|r| r.enabled) {
        *rules_per_pos.entry(rule.pos_id.as_str()).or_default() += 1;
    }
    if entries.is_empty() || rules_per_pos.is_empty() {
        return SYNTHESIS_RANGE.0;
    }

    let mut morphemes = 0usize;
    let mut senses = 0usize;
    for pos_id in entries.iter().flat_map(|e| e.pos_ids.iter()) {
        let Some(&rules) = rules_per_pos.get(pos_id.as_str()) else {
            continue;
        };
        let dims = grammar.dimensions_for(pos_id).count();
        morphemes += 1 + dims.min(rules);
        senses += 1;
    }
    if senses == 0 {
        return SYNTHESIS_RANGE.0;
    }
    (morphemes as f64 / senses as f64).clamp(SYNTHESIS_RANGE.0, SYNTHESIS_RANGE.1)
}

fn fusion_index(grammar: &GrammarConfig) -> f64 {
    let (count, total) = grammar
        .inflection_rules
        .iter()
        .filter(|r| r.enabled)
        .fold((0usize, 0usize), |(n, sum), r| (n + 1, sum + r.dimension_values.len().max(1)));
    if count == 0 {
        return FUSION_RANGE.0;
    }
    (total as f64 / count as f64).clamp(FUSION_RANGE.0, FUSION_RANGE.1)
}
