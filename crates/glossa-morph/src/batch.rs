// Bulk inflection over many lexicon entries.
//
// Every call reads the grammar and inventory and never writes them, so
// entries are split into contiguous chunks, one per scoped worker thread,
// with no locking. Results come back in entry order.

use std::panic;
use std::thread;

use serde::Serialize;
use tracing::debug;

use glossa_core::grammar::{GrammarConfig, LexiconEntry};
use glossa_core::outcome::{InflectionOutcome, ParadigmCell};
use glossa_core::phoneme::PhonemeInventory;
use glossa_core::rule::{DimensionValues, InflectionRule};

use crate::paradigm::generate_paradigm;
use crate::typology::{apply_inflection_typology_aware, InflectionRequest};

/// The paradigm table of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryParadigm {
    pub entry_id: String,
    pub root: String,
    pub cells: Vec<ParadigmCell>,
}

/// The typology-aware form of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutcome {
    pub entry_id: String,
    #[serde(flatten)]
    pub outcome: InflectionOutcome,
}

/// Paradigm tables for every entry, computed on up to `workers` threads.
pub fn generate_paradigms(
    entries: &[LexiconEntry],
    pos_id: &str,
    rules: &[InflectionRule],
    inventory: &PhonemeInventory,
    workers: usize,
) -> Vec<EntryParadigm> {
    run_chunked(entries, workers, |entry| EntryParadigm {
        entry_id: entry.entry_id.clone(),
        root: entry.root.clone(),
        cells: generate_paradigm(&entry.root, pos_id, rules, inventory),
    })
}

/// One dimension-value combination applied to every entry.
pub fn inflect_entries(
    entries: &[LexiconEntry],
    pos_id: &str,
    dimension_values: &DimensionValues,
    grammar: &GrammarConfig,
    inventory: &PhonemeInventory,
    workers: usize,
) -> Vec<EntryOutcome> {
    run_chunked(entries, workers, |entry| {
        let request = InflectionRequest::new(&entry.root, &entry.entry_id, pos_id, dimension_values);
        EntryOutcome {
            entry_id: entry.entry_id.clone(),
            outcome: apply_inflection_typology_aware(&request, grammar, inventory),
        }
    })
}

/// Map `f` over `items` on at most `workers` threads, keeping item order.
fn run_chunked<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if items.is_empty() {
        return Vec::new();
    }
    let workers = workers.clamp(1, items.len());
    debug!(items = items.len(), workers, "batch start");
    if workers == 1 {
        return items.iter().map(f).collect();
    }

    let chunk_size = items.len().div_ceil(workers);
    let f = &f;
    thread::scope(|s| {
        let handles: Vec<_> = items
            .chunks(chunk_size)
            .map(|chunk| s.spawn(move || chunk.iter().map(f).collect::<Vec<R>>()))
            .collect();

        let mut out = Vec::with_capacity(items.len());
        for handle in handles {
            match handle.join() {
                Ok(part) => out.extend(part),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        out
    })
}
