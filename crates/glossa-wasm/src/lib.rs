// WASM bindings for the glossa morphology engine.
//
// Provides a `WasmGlossa` class exported via wasm-bindgen that wraps the
// `MorphHandle` from glossa-morph. Outcomes, paradigm rows and matrix cells
// are serialized to plain JavaScript objects using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const glossa = new WasmGlossa(grammarJson, phonologyJson);
//   glossa.applyInflection("kat", "n_pl");   // => { result: "kats", applied: true, trace: "..." }
//   glossa.inflect("go", "go", "verb", { tense: "past" });
//                                            // => { result: "went", applied: true, ... }
//   glossa.generateParadigm("kat", "noun");  // => [{ ruleId: "n_pl", tag: "PL", ... }, ...]
//   glossa.inflectionMatrix("kat", "e1", "noun");
//                                            // => [{ dimensionValues: {...}, result: "...", ... }, ...]
//   glossa.derive("walk", "agent");          // => { result: "walker", ... }
//   glossa.estimateTypology(entries);        // => { synthesisIndex: 3, fusionIndex: 1, ... }
//   glossa.rejectedRules();                  // => [{ ruleId: "v_broken", reason: "..." }]

use serde::Serialize;
use wasm_bindgen::prelude::*;

use glossa_core::grammar::{GrammarConfig, LexiconEntry};
use glossa_core::rule::DimensionValues;
use glossa_morph::{EngineError, MorphHandle};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable representation of a rule skipped at load time.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRejectedRule {
    rule_id: String,
    reason: String,
}

/// Serializable representation of a derivation rule summary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDerivationRule {
    rule_id: String,
    name: String,
    source_pos_id: String,
    target_pos_id: String,
}

// ============================================================================
// Conversion helpers
// ============================================================================

fn engine_error_to_js(e: EngineError) -> JsError {
    JsError::new(&e.to_string())
}

/// Dimension maps become plain objects rather than JS `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// WasmGlossa
// ============================================================================

/// Morphology engine instance for JavaScript.
#[wasm_bindgen]
pub struct WasmGlossa {
    handle: MorphHandle,
}

#[wasm_bindgen]
impl WasmGlossa {
    /// Load a grammar document and a phonology document (both JSON text).
    #[wasm_bindgen(constructor)]
    pub fn new(grammar_json: &str, phonology_json: &str) -> Result<WasmGlossa, JsError> {
        let handle = MorphHandle::from_json(grammar_json, phonology_json).map_err(engine_error_to_js)?;
        Ok(WasmGlossa { handle })
    }

    /// Apply one inflection rule by id.
    #[wasm_bindgen(js_name = "applyInflection")]
    pub fn apply_inflection(&self, word: &str, rule_id: &str) -> Result<JsValue, JsError> {
        let outcome = self.handle.apply_rule(word, rule_id).map_err(engine_error_to_js)?;
        to_js(&outcome)
    }

    /// Typology-aware inflection. `dimensions` is an object of
    /// dimension id to value id.
    pub fn inflect(
        &self,
        word: &str,
        entry_id: &str,
        pos_id: &str,
        dimensions: JsValue,
    ) -> Result<JsValue, JsError> {
        let dims: DimensionValues = if dimensions.is_undefined() || dimensions.is_null() {
            DimensionValues::new()
        } else {
            serde_wasm_bindgen::from_value(dimensions).map_err(|e| JsError::new(&e.to_string()))?
        };
        to_js(&self.handle.inflect(word, entry_id, pos_id, &dims))
    }

    #[wasm_bindgen(js_name = "generateParadigm")]
    pub fn generate_paradigm(&self, word: &str, pos_id: &str) -> Result<JsValue, JsError> {
        to_js(&self.handle.paradigm(word, pos_id))
    }

    #[wasm_bindgen(js_name = "inflectionMatrix")]
    pub fn inflection_matrix(&self, word: &str, entry_id: &str, pos_id: &str) -> Result<JsValue, JsError> {
        to_js(&self.handle.inflection_matrix(word, entry_id, pos_id))
    }

    /// Apply one derivation rule by id.
    pub fn derive(&self, word: &str, rule_id: &str) -> Result<JsValue, JsError> {
        let outcome = self.handle.derive(word, rule_id).map_err(engine_error_to_js)?;
        to_js(&outcome)
    }

    /// Derivation preview for an array of lexicon entries
    /// (`{ entry_id, root, pos_ids }`).
    #[wasm_bindgen(js_name = "deriveEntries")]
    pub fn derive_entries(&self, entries: JsValue, rule_id: &str) -> Result<JsValue, JsError> {
        let entries: Vec<LexiconEntry> =
            serde_wasm_bindgen::from_value(entries).map_err(|e| JsError::new(&e.to_string()))?;
        let derived = self.handle.derive_entries(&entries, rule_id).map_err(engine_error_to_js)?;
        to_js(&derived)
    }

    #[wasm_bindgen(js_name = "estimateTypology")]
    pub fn estimate_typology(&self, entries: JsValue) -> Result<JsValue, JsError> {
        let entries: Vec<LexiconEntry> =
            serde_wasm_bindgen::from_value(entries).map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&self.handle.estimate_typology(&entries))
    }

    #[wasm_bindgen(js_name = "derivationRules")]
    pub fn derivation_rules(&self) -> Result<JsValue, JsError> {
        let rules: Vec<JsDerivationRule> = self
            .handle
            .grammar()
            .derivation_rules
            .iter()
            .map(|r| JsDerivationRule {
                rule_id: r.rule_id.clone(),
                name: r.name.clone(),
                source_pos_id: r.source_pos_id.clone(),
                target_pos_id: r.target_pos_id.clone(),
            })
            .collect();
        to_js(&rules)
    }

    /// Rules skipped while loading the grammar, with the reason.
    #[wasm_bindgen(js_name = "rejectedRules")]
    pub fn rejected_rules(&self) -> Result<JsValue, JsError> {
        let rejected: Vec<JsRejectedRule> = self
            .handle
            .grammar()
            .rejected_rules
            .iter()
            .map(|r| JsRejectedRule {
                rule_id: r.rule_id.clone(),
                reason: r.reason.clone(),
            })
            .collect();
        to_js(&rejected)
    }

    /// Replace the grammar document. The phonology stays as loaded.
    #[wasm_bindgen(js_name = "setGrammar")]
    pub fn set_grammar(&mut self, grammar_json: &str) -> Result<(), JsError> {
        let grammar = GrammarConfig::from_json(grammar_json)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.handle.set_grammar(grammar);
        Ok(())
    }

    /// Returns the library version string.
    #[wasm_bindgen(js_name = "getVersion")]
    pub fn get_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
