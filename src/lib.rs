//! This crate provides two small building blocks of formal language theory: finite languages
//! with their closure operations, and table-driven deterministic finite automata.
//! It includes modules for parsing and validating transition tables, simulating automata, and
//! a catalog of embedded sample tables.

pub mod analyzer;
pub mod encoder;
pub mod language;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod samples;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` and `unreachable_states` functions and the `AnalysisError` enum from
/// the analyzer module.
pub use analyzer::{analyze, unreachable_states, AnalysisError};
/// Re-exports the encoding function from the encoder module.
pub use encoder::encode;
/// Re-exports the `FiniteLanguage` struct from the language module.
pub use language::FiniteLanguage;
/// Re-exports the `TableLoader` struct and its directory entry type from the loader module.
pub use loader::{TableEntry, TableLoader};
/// Re-exports the automaton and its simulation cursor from the machine module.
pub use machine::{DeterministicAutomaton, Simulation};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the sample catalog.
pub use samples::{Sample, SampleCatalog, SAMPLES};
/// Re-exports the shared types.
pub use types::{
    AutomatonError, LanguageError, State, Step, TransitionTable, Verdict, INITIAL_STATE,
    MAX_TABLE_SIZE,
};
