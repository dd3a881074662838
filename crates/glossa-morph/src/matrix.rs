// Inflection matrix: the typology-aware form of a word for every
// combination of the dimensions that apply to its part of speech.

use glossa_core::grammar::{GrammarConfig, InflectionDimension};
use glossa_core::outcome::MatrixCell;
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::DimensionValues;

use crate::typology::{apply_inflection_typology_aware, InflectionRequest};

/// Cross product of the dimensions' values, first dimension varying
/// slowest. Dimensions without values are left out; no dimensions at all
/// gives no combinations.
pub fn combinations(dimensions: &[&InflectionDimension]) -> Vec<DimensionValues> {
    let dimensions: Vec<&InflectionDimension> = dimensions
        .iter()
        .copied()
        .filter(|d| !d.values.is_empty())
        .collect();
    if dimensions.is_empty() {
        return Vec::new();
    }

    let mut combos = vec![DimensionValues::new()];
    for dim in dimensions {
        let mut next = Vec::with_capacity(combos.len() * dim.values.len());
        for combo in &combos {
            for value in &dim.values {
                let mut c = combo.clone();
                c.insert(dim.dim_id.clone(), value.val_id.clone());
                next.push(c);
            }
        }
        combos = next;
    }
    combos
}

/// Inflect `word` for every combination of the dimensions of `pos_id`.
pub fn inflection_matrix(
    word: &str,
    entry_id: &str,
    pos_id: &str,
    grammar: &GrammarConfig,
    inventory: &PhonemeInventory,
) -> Vec<MatrixCell> {
    let dimensions: Vec<&InflectionDimension> = grammar.dimensions_for(pos_id).collect();
    combinations(&dimensions)
        .into_iter()
        .map(|dimension_values| {
            let request = InflectionRequest::new(word, entry_id, pos_id, &dimension_values);
            let outcome = apply_inflection_typology_aware(&request, grammar, inventory);
            MatrixCell {
                dimension_values,
                outcome,
            }
        })
        .collect()
}
