//! This module defines the `DeterministicAutomaton` struct, a table-driven DFA, and the
//! `Simulation` cursor that feeds an input string through it one symbol at a time.

use crate::analyzer::{analyze, unreachable_states};
use crate::encoder::encode;
use crate::loader::TableLoader;
use crate::types::{AutomatonError, State, Step, TransitionTable, Verdict, INITIAL_STATE};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::{Chars, FromStr};

/// A deterministic finite automaton driven by an explicit transition table.
///
/// The initial state is always [`INITIAL_STATE`]. The automaton is immutable once built.
///
/// # Transition contract
///
/// [`next_state`](Self::next_state) is total and never fails: a missing symbol, a symbol that is
/// not in the alphabet, or a state outside the table all leave the state unchanged. Callers
/// that need to tell these cases apart should check [`column`](TransitionTable::column) or
/// [`state_count`](Self::state_count) themselves.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeterministicAutomaton {
    table: TransitionTable,
}

impl DeterministicAutomaton {
    /// Creates an automaton from a transition table after validating it.
    ///
    /// # Returns
    ///
    /// * `Ok(DeterministicAutomaton)` if the table is well formed.
    /// * `Err(AutomatonError::ValidationError)` otherwise.
    pub fn new(table: TransitionTable) -> Result<Self, AutomatonError> {
        analyze(&table)?;

        let unreachable = unreachable_states(&table);
        if !unreachable.is_empty() {
            log::debug!("States unreachable from the initial state: {:?}", unreachable);
        }

        Ok(Self { table })
    }

    /// Loads an automaton from a table file.
    pub fn from_file(path: &Path) -> Result<Self, AutomatonError> {
        Self::new(TableLoader::load_table(path)?)
    }

    /// Loads an automaton from a table file, falling back to the empty automaton.
    ///
    /// Any failure is reported through the `log` facade and the returned automaton has no
    /// states. Check [`is_empty`](Self::is_empty) before relying on it.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            log::error!(
                "Error during attempt to read table file {}: {}",
                path.display(),
                e
            );
            Self::default()
        })
    }

    /// Determines the next state given a current state and an input symbol.
    ///
    /// Returns `current` unchanged when `symbol` is `None`, when the symbol is not part of the
    /// alphabet, or when `current` is not a state of this automaton.
    pub fn next_state(&self, current: State, symbol: Option<&str>) -> State {
        symbol
            .and_then(|symbol| self.table.column(symbol))
            .and_then(|column| self.table.rows.get(current)?.get(column).copied())
            .unwrap_or(current)
    }

    /// Processes an input string to determine acceptance.
    ///
    /// Each `char` of the input is one symbol. The string is accepted if the state reached
    /// after the last symbol is an accept state. The empty string is always rejected, whether
    /// or not the initial state accepts.
    pub fn process_string(&self, input: &str) -> bool {
        Simulation::new(self, input).run().is_accept()
    }

    /// Returns the state entered after each symbol of `input`, in order.
    pub fn trace(&self, input: &str) -> Vec<State> {
        let mut simulation = Simulation::new(self, input);
        let mut states = Vec::with_capacity(input.len());

        while !simulation.is_halted() {
            simulation.step();
            if simulation.step_count() > states.len() {
                states.push(simulation.state());
            }
        }

        states
    }

    /// Returns the alphabet in column order.
    pub fn alphabet(&self) -> &[String] {
        &self.table.alphabet
    }

    /// Returns the accepting states.
    pub fn accept_states(&self) -> &BTreeSet<State> {
        &self.table.accept_states
    }

    /// Returns the number of states.
    pub fn state_count(&self) -> usize {
        self.table.state_count()
    }

    /// Returns the initial state, which is always [`INITIAL_STATE`].
    pub fn initial_state(&self) -> State {
        INITIAL_STATE
    }

    /// Checks if `state` is an accepting state.
    pub fn is_accepting(&self, state: State) -> bool {
        self.table.accept_states.contains(&state)
    }

    /// Checks if the automaton has no states, e.g. after a failed load.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the underlying transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns the states that no input can reach.
    pub fn unreachable_states(&self) -> Vec<State> {
        unreachable_states(&self.table)
    }
}

impl FromStr for DeterministicAutomaton {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(TableLoader::load_table_from_string(s)?)
    }
}

impl fmt::Display for DeterministicAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.table))
    }
}

/// A single run of an automaton over an input string.
///
/// The simulation starts in the initial state and consumes one `char` per
/// [`step`](Self::step). The verdict is decided only once the input is exhausted.
pub struct Simulation<'a> {
    automaton: &'a DeterministicAutomaton,
    input: &'a str,
    remaining: Chars<'a>,
    state: State,
    step_count: usize,
    verdict: Option<Verdict>,
}

impl<'a> Simulation<'a> {
    /// Creates a simulation of `automaton` over `input`, positioned before the first symbol.
    pub fn new(automaton: &'a DeterministicAutomaton, input: &'a str) -> Self {
        Self {
            automaton,
            input,
            remaining: input.chars(),
            state: INITIAL_STATE,
            step_count: 0,
            verdict: None,
        }
    }

    /// Consumes the next symbol.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if input remains after this symbol.
    /// * `Step::Halt(_)` once the last symbol has been consumed. Empty input halts immediately
    ///   with `Verdict::Reject`.
    pub fn step(&mut self) -> Step {
        if let Some(verdict) = self.verdict {
            return Step::Halt(verdict);
        }

        let Some(symbol) = self.remaining.next() else {
            // Only reachable for empty input.
            return self.halt(Verdict::Reject);
        };

        let mut buffer = [0; 4];
        self.state = self
            .automaton
            .next_state(self.state, Some(symbol.encode_utf8(&mut buffer)));
        self.step_count += 1;

        log::trace!(
            "step {}: read {:?}, entered state {}",
            self.step_count,
            symbol,
            self.state
        );

        if self.remaining.as_str().is_empty() {
            let verdict = if self.automaton.is_accepting(self.state) {
                Verdict::Accept
            } else {
                Verdict::Reject
            };
            return self.halt(verdict);
        }

        Step::Continue
    }

    /// Runs the simulation until the input is exhausted.
    pub fn run(&mut self) -> Verdict {
        loop {
            if let Step::Halt(verdict) = self.step() {
                return verdict;
            }
        }
    }

    /// Rewinds to the initial state and the start of the input.
    pub fn reset(&mut self) {
        self.remaining = self.input.chars();
        self.state = INITIAL_STATE;
        self.step_count = 0;
        self.verdict = None;
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the number of symbols consumed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks if the run has reached its verdict.
    pub fn is_halted(&self) -> bool {
        self.verdict.is_some()
    }

    fn halt(&mut self, verdict: Verdict) -> Step {
        self.verdict = Some(verdict);
        Step::Halt(verdict)
    }
}
