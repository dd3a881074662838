//! Morphological rule engine for constructed languages.
//!
//! Takes a root, a grammar and a phoneme inventory and produces inflected
//! or derived word forms, each with a trace saying how the form came about.
//! Every entry point is a pure function of its arguments; nothing here
//! performs I/O or keeps state between calls.
//!
//! # Entry points
//!
//! - [`apply_inflection`] -- one rule, one word
//! - [`apply_inflection_typology_aware`] -- one dimension-value combination,
//!   combined the way the grammar's typology dictates
//! - [`generate_paradigm`] -- every rule of a part of speech, independently
//! - [`MorphHandle`] -- the above plus derivation, matrices, estimation and
//!   batch calls against a shared grammar snapshot
//!
//! # Modules
//!
//! - [`phoneme`] -- Edge classification and phoneme segmentation
//! - [`condition`] -- Conditional allomorphy
//! - [`operations`] -- The six primitive operations
//! - [`applicator`] -- Gate, condition, operation and trace for one rule
//! - [`typology`] -- Isolating, agglutinative, fusional and polysynthetic strategies
//! - [`paradigm`] -- Paradigm tables
//! - [`derivation`] -- Derivation rules
//! - [`matrix`] -- Inflection matrices over dimension cross products
//! - [`estimate`] -- Synthesis and fusion index estimation
//! - [`batch`] -- Multi-threaded bulk inflection
//! - [`handle`] -- `MorphHandle`

pub mod applicator;
pub mod batch;
pub mod condition;
pub mod derivation;
pub mod estimate;
pub mod handle;
pub mod matrix;
pub mod operations;
pub mod paradigm;
mod pattern;
pub mod phoneme;
pub mod typology;

pub use applicator::{apply_inflection, apply_rule};
pub use derivation::{derive, generate_derived_words};
pub use estimate::{estimate_typology, TypologyEstimation};
pub use handle::{EngineError, EngineOptions, MorphHandle, Snapshot};
pub use matrix::inflection_matrix;
pub use paradigm::generate_paradigm;
pub use typology::{apply_inflection_typology_aware, InflectionRequest, TypologyStrategy};
