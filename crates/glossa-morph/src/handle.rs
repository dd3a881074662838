// MorphHandle: one place holding a grammar and a phoneme inventory and
// exposing every engine entry point against them.
//
// Both documents sit behind `Arc`. Replacing either swaps the pointer, so a
// batch that took a snapshot keeps working on the documents it started
// with while the editor moves on.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use glossa_core::error::GrammarError;
use glossa_core::grammar::{GrammarConfig, LexiconEntry};
use glossa_core::outcome::{DerivedWord, InflectionOutcome, MatrixCell, ParadigmCell};
use glossa_core::phoneme::{PhonemeInventory, PhonologyConfig};
use glossa_core::rule::DimensionValues;

use crate::applicator::apply_inflection;
use crate::batch::{self, EntryOutcome, EntryParadigm};
use crate::derivation;
use crate::estimate::{self, TypologyEstimation};
use crate::matrix;
use crate::paradigm::generate_paradigm;
use crate::typology::{apply_inflection_typology_aware, InflectionRequest};

/// Error type for handle operations that name a rule or load documents.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no inflection rule with id {0}")]
    UnknownRule(String),

    #[error("no derivation rule with id {0}")]
    UnknownDerivationRule(String),

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Tunables for a `MorphHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Worker threads used by batch calls.
    pub batch_workers: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            batch_workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// The documents a call runs against.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grammar: Arc<GrammarConfig>,
    pub inventory: Arc<PhonemeInventory>,
}

#[derive(Debug, Clone)]
pub struct MorphHandle {
    grammar: Arc<GrammarConfig>,
    inventory: Arc<PhonemeInventory>,
    options: EngineOptions,
}

impl MorphHandle {
    pub fn new(grammar: GrammarConfig, inventory: PhonemeInventory) -> Self {
        Self {
            grammar: Arc::new(grammar),
            inventory: Arc::new(inventory),
            options: EngineOptions::default(),
        }
    }

    /// Load a grammar document and a phonology document.
    pub fn from_json(grammar_json: &str, phonology_json: &str) -> Result<Self, EngineError> {
        let grammar = GrammarConfig::from_json(grammar_json)?;
        let phonology = PhonologyConfig::from_json(phonology_json)?;
        Ok(Self::new(grammar, phonology.phoneme_inventory))
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn grammar(&self) -> &GrammarConfig {
        &self.grammar
    }

    pub fn inventory(&self) -> &PhonemeInventory {
        &self.inventory
    }

    /// Replace the grammar. Snapshots taken earlier are unaffected.
    pub fn set_grammar(&mut self, grammar: GrammarConfig) {
        self.grammar = Arc::new(grammar);
    }

    /// Replace the phoneme inventory. Snapshots taken earlier are unaffected.
    pub fn set_inventory(&mut self, inventory: PhonemeInventory) {
        self.inventory = Arc::new(inventory);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grammar: Arc::clone(&self.grammar),
            inventory: Arc::clone(&self.inventory),
        }
    }

    // -- Single words --

    /// Apply the inflection rule `rule_id` to `word`.
    pub fn apply_rule(&self, word: &str, rule_id: &str) -> Result<InflectionOutcome, EngineError> {
        let rule = self
            .grammar
            .rule(rule_id)
            .ok_or_else(|| EngineError::UnknownRule(rule_id.to_string()))?;
        Ok(apply_inflection(word, rule, &self.inventory))
    }

    /// Typology-aware inflection of one entry.
    pub fn inflect(&self, word: &str, entry_id: &str, pos_id: &str, dimension_values: &DimensionValues) -> InflectionOutcome {
        let request = InflectionRequest::new(word, entry_id, pos_id, dimension_values);
        apply_inflection_typology_aware(&request, &self.grammar, &self.inventory)
    }

    pub fn paradigm(&self, word: &str, pos_id: &str) -> Vec<ParadigmCell> {
        generate_paradigm(word, pos_id, &self.grammar.inflection_rules, &self.inventory)
    }

    pub fn inflection_matrix(&self, word: &str, entry_id: &str, pos_id: &str) -> Vec<MatrixCell> {
        matrix::inflection_matrix(word, entry_id, pos_id, &self.grammar, &self.inventory)
    }

    /// Apply the derivation rule `rule_id` to `word`.
    pub fn derive(&self, word: &str, rule_id: &str) -> Result<InflectionOutcome, EngineError> {
        let rule = self
            .grammar
            .derivation_rule(rule_id)
            .ok_or_else(|| EngineError::UnknownDerivationRule(rule_id.to_string()))?;
        Ok(derivation::derive(word, rule, &self.inventory))
    }

    // -- Lexicon-wide --

    pub fn derive_entries(&self, entries: &[LexiconEntry], rule_id: &str) -> Result<Vec<DerivedWord>, EngineError> {
        let rule = self
            .grammar
            .derivation_rule(rule_id)
            .ok_or_else(|| EngineError::UnknownDerivationRule(rule_id.to_string()))?;
        Ok(derivation::generate_derived_words(entries, rule, &self.inventory))
    }

    pub fn estimate_typology(&self, entries: &[LexiconEntry]) -> TypologyEstimation {
        estimate::estimate_typology(entries, &self.grammar)
    }

    /// Paradigm tables for many entries, on the configured worker count.
    pub fn paradigms(&self, entries: &[LexiconEntry], pos_id: &str) -> Vec<EntryParadigm> {
        let snap = self.snapshot();
        batch::generate_paradigms(
            entries,
            pos_id,
            &snap.grammar.inflection_rules,
            &snap.inventory,
            self.options.batch_workers,
        )
    }

    /// One combination applied to many entries, on the configured worker
    /// count.
    pub fn inflect_entries(
        &self,
        entries: &[LexiconEntry],
        pos_id: &str,
        dimension_values: &DimensionValues,
    ) -> Vec<EntryOutcome> {
        let snap = self.snapshot();
        batch::inflect_entries(
            entries,
            pos_id,
            dimension_values,
            &snap.grammar,
            &snap.inventory,
            self.options.batch_workers,
        )
    }
}
