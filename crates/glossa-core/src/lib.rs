//! Shared types for the glossa morphology engine.
//!
//! This crate holds the data model the grammar and phonology editors hand
//! to the engine, the result records the engine hands back, and the error
//! types. It has no behavior beyond document loading and small lookups;
//! the rule engine itself lives in `glossa-morph`.
//!
//! # Modules
//!
//! - [`phoneme`] -- Phoneme inventory and phonological classes
//! - [`rule`] -- Inflection/derivation rules, operations, conditional clauses
//! - [`typology`] -- Typology configuration, affix slots, conjugation classes, overrides
//! - [`grammar`] -- The grammar document and its lenient loader
//! - [`outcome`] -- Result records
//! - [`error`] -- `MorphError` and `GrammarError`

pub mod error;
pub mod grammar;
pub mod outcome;
pub mod phoneme;
pub mod rule;
pub mod typology;
