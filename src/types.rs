//! This module defines the core data structures and types shared by the automaton and language
//! modules, including the transition table representation, simulation outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::Rule;

/// The field delimiter used by the transition table text format.
pub const DELIMITER: char = ',';
/// The state every simulation starts in.
pub const INITIAL_STATE: State = 0;
/// The maximum allowed size for a transition table file in bytes.
pub const MAX_TABLE_SIZE: u64 = 1 << 20; // 1MB
/// File extension picked up when loading every table in a directory.
pub const TABLE_EXTENSION: &str = "dfa";

/// A state of a deterministic automaton, identified by its row in the transition table.
pub type State = usize;

/// The raw contents of a transition table file.
///
/// A table is plain data: it is not guaranteed to be well formed until it has been checked by
/// [`crate::analyzer::analyze`], which every automaton constructor does.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    /// Alphabet symbols, ordered by column of the transition table.
    pub alphabet: Vec<String>,
    /// One row per state. `rows[s][c]` is the state entered from `s` on `alphabet[c]`.
    pub rows: Vec<Vec<State>>,
    /// The accepting states.
    pub accept_states: BTreeSet<State>,
}

impl TransitionTable {
    /// Creates a table from its three sections.
    pub fn new<S, I>(alphabet: I, rows: Vec<Vec<State>>, accept_states: &[State]) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            rows,
            accept_states: accept_states.iter().copied().collect(),
        }
    }

    /// Returns the number of states, i.e. the number of rows.
    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the column of `symbol` in the alphabet, if present.
    pub fn column(&self, symbol: &str) -> Option<usize> {
        self.alphabet.iter().position(|s| s == symbol)
    }

    /// Checks if the table defines no states at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Represents the outcome of a single simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A symbol was consumed and input remains.
    Continue,
    /// The input is exhausted and the run has been decided.
    Halt(Verdict),
}

/// The decision reached at the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    /// Checks if the input was accepted.
    pub fn is_accept(self) -> bool {
        self == Verdict::Accept
    }
}

/// Represents the errors that can occur while building an automaton.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// Indicates a syntax error, or a malformed field, in a transition table.
    #[error("Table parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a table whose structure is inconsistent.
    #[error("Table validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading table files.
    #[error("File error: {0}")]
    FileError(String),
}

/// Represents the errors that can occur while manipulating languages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// A language was compared against a value that is not a language.
    #[error("Type mismatch: expected a FiniteLanguage, found {0}")]
    TypeMismatch(String),
}
