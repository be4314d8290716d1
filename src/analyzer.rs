//! This module provides functions for analyzing transition tables to detect structural errors
//! before an automaton is built from them. This includes checks for well-formed alphabets,
//! consistent row widths, and in-range destination and accept states. It also offers a
//! reachability query used for diagnostics.

use crate::types::{AutomatonError, State, TransitionTable, DELIMITER, INITIAL_STATE};
use std::collections::{BTreeSet, VecDeque};

/// Represents various errors that can be found during the analysis of a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The alphabet contains an empty symbol at the given column.
    EmptySymbol(usize),
    /// A symbol contains the field delimiter or a line break and could not be written back.
    ReservedCharacter { column: usize, symbol: String },
    /// The alphabet lists the same symbol more than once.
    DuplicateSymbols(Vec<String>),
    /// A row does not have one entry per alphabet symbol.
    RowArity {
        state: State,
        expected: usize,
        found: usize,
    },
    /// A transition points past the last state.
    TargetOutOfRange {
        state: State,
        symbol: String,
        target: State,
    },
    /// Accept states that are not rows of the table.
    AcceptStatesOutOfRange(Vec<State>),
    /// A table with states needs an alphabet, and accept states need states.
    StructuralError(String),
}

impl From<AnalysisError> for AutomatonError {
    /// Converts an `AnalysisError` into an `AutomatonError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::EmptySymbol(column) => AutomatonError::ValidationError(format!(
                "Empty alphabet symbol in column {}",
                column
            )),
            AnalysisError::ReservedCharacter { column, symbol } => {
                AutomatonError::ValidationError(format!(
                    "Alphabet symbol {:?} in column {} contains a delimiter or line break",
                    symbol, column
                ))
            }
            AnalysisError::DuplicateSymbols(symbols) => AutomatonError::ValidationError(
                format!("Duplicate alphabet symbols: {:?}", symbols),
            ),
            AnalysisError::RowArity {
                state,
                expected,
                found,
            } => AutomatonError::ValidationError(format!(
                "Row for state {} has {} entries, expected {}",
                state, found, expected
            )),
            AnalysisError::TargetOutOfRange {
                state,
                symbol,
                target,
            } => AutomatonError::ValidationError(format!(
                "Transition from state {} on {:?} leads to undefined state {}",
                state, symbol, target
            )),
            AnalysisError::AcceptStatesOutOfRange(states) => AutomatonError::ValidationError(
                format!("Accept states are not defined in the table: {:?}", states),
            ),
            AnalysisError::StructuralError(msg) => AutomatonError::ValidationError(msg),
        }
    }
}

/// Analyzes a `TransitionTable` for structural errors.
///
/// An empty table (no states) is valid as long as it does not name accept states; it is the
/// benign "nothing loaded" automaton.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(AutomatonError::ValidationError)` describing the first violated rule.
pub fn analyze(table: &TransitionTable) -> Result<(), AutomatonError> {
    let errors = [
        check_structure,
        check_alphabet,
        check_row_arity,
        check_targets,
        check_accept_states,
    ]
    .iter()
    .filter_map(|f| f(table).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.into_iter().next() {
        return Err(first_error.into());
    }

    Ok(())
}

/// Returns the states that cannot be reached from the initial state, in ascending order.
///
/// Out-of-range targets are ignored, so this is safe to call on unvalidated tables.
pub fn unreachable_states(table: &TransitionTable) -> Vec<State> {
    if table.is_empty() {
        return Vec::new();
    }

    let mut visited = BTreeSet::from([INITIAL_STATE]);
    let mut queue = VecDeque::from([INITIAL_STATE]);

    while let Some(state) = queue.pop_front() {
        for &target in &table.rows[state] {
            if target < table.state_count() && visited.insert(target) {
                queue.push_back(target);
            }
        }
    }

    (0..table.state_count())
        .filter(|state| !visited.contains(state))
        .collect()
}

fn check_structure(table: &TransitionTable) -> Result<(), AnalysisError> {
    if table.is_empty() && !table.accept_states.is_empty() {
        return Err(AnalysisError::StructuralError(
            "Accept states given for a table without states".to_string(),
        ));
    }

    if !table.is_empty() && table.alphabet.is_empty() {
        return Err(AnalysisError::StructuralError(
            "Table has states but no alphabet".to_string(),
        ));
    }

    Ok(())
}

fn check_alphabet(table: &TransitionTable) -> Result<(), AnalysisError> {
    if let Some(column) = table.alphabet.iter().position(|s| s.is_empty()) {
        return Err(AnalysisError::EmptySymbol(column));
    }

    if let Some((column, symbol)) = table
        .alphabet
        .iter()
        .enumerate()
        .find(|(_, s)| s.contains([DELIMITER, '\n', '\r']))
    {
        return Err(AnalysisError::ReservedCharacter {
            column,
            symbol: symbol.clone(),
        });
    }

    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<String> = table
        .alphabet
        .iter()
        .filter(|s| !seen.insert(s.as_str()))
        .cloned()
        .collect();

    if !duplicates.is_empty() {
        return Err(AnalysisError::DuplicateSymbols(
            duplicates.into_iter().collect(),
        ));
    }

    Ok(())
}

fn check_row_arity(table: &TransitionTable) -> Result<(), AnalysisError> {
    let expected = table.alphabet.len();

    match table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != expected)
    {
        Some((state, row)) => Err(AnalysisError::RowArity {
            state,
            expected,
            found: row.len(),
        }),
        None => Ok(()),
    }
}

fn check_targets(table: &TransitionTable) -> Result<(), AnalysisError> {
    let count = table.state_count();

    for (state, row) in table.rows.iter().enumerate() {
        for (column, &target) in row.iter().enumerate() {
            if target >= count {
                return Err(AnalysisError::TargetOutOfRange {
                    state,
                    symbol: table.alphabet.get(column).cloned().unwrap_or_default(),
                    target,
                });
            }
        }
    }

    Ok(())
}

fn check_accept_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let outside: Vec<State> = table
        .accept_states
        .iter()
        .copied()
        .filter(|&state| state >= table.state_count())
        .collect();

    // An empty table is reported by check_structure.
    if !outside.is_empty() && !table.is_empty() {
        return Err(AnalysisError::AcceptStatesOutOfRange(outside));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_table() -> TransitionTable {
        TransitionTable::new(["a", "b"], vec![vec![1, 0], vec![0, 1]], &[1])
    }

    #[test]
    fn test_valid_table() {
        assert!(analyze(&valid_table()).is_ok());
    }

    #[test]
    fn test_empty_table_is_valid() {
        assert!(analyze(&TransitionTable::default()).is_ok());
    }

    #[test]
    fn test_accept_states_without_states() {
        let table = TransitionTable::new(["a"], vec![], &[0]);
        assert_eq!(
            check_structure(&table),
            Err(AnalysisError::StructuralError(
                "Accept states given for a table without states".to_string()
            ))
        );
        assert!(analyze(&table).is_err());
    }

    #[test]
    fn test_states_without_alphabet() {
        let table = TransitionTable::new(Vec::<String>::new(), vec![vec![]], &[]);
        let result = analyze(&table);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Table validation error: Table has states but no alphabet"
        );
    }

    #[test]
    fn test_empty_symbol() {
        let table = TransitionTable::new(["a", ""], vec![vec![0, 0]], &[]);
        assert_eq!(check_alphabet(&table), Err(AnalysisError::EmptySymbol(1)));
    }

    #[test]
    fn test_reserved_characters_in_symbol() {
        let table = TransitionTable::new(["a,b"], vec![vec![0]], &[0]);
        assert_eq!(
            check_alphabet(&table),
            Err(AnalysisError::ReservedCharacter {
                column: 0,
                symbol: "a,b".to_string()
            })
        );
        assert_eq!(
            analyze(&table).unwrap_err().to_string(),
            "Table validation error: Alphabet symbol \"a,b\" in column 0 contains a delimiter or line break"
        );

        for symbol in ["x\ny", "x\r", "\r\n"] {
            let table = TransitionTable::new(["a", symbol], vec![vec![0, 0]], &[]);
            assert!(matches!(
                check_alphabet(&table),
                Err(AnalysisError::ReservedCharacter { column: 1, .. })
            ));
        }

        // Other punctuation, including braces, renders and reads back fine.
        let table = TransitionTable::new(["{", "}", " ", "-1"], vec![vec![0, 0, 0, 0]], &[]);
        assert!(analyze(&table).is_ok());
    }

    #[test]
    fn test_duplicate_symbols() {
        let table = TransitionTable::new(["a", "b", "a"], vec![vec![0, 0, 0]], &[]);
        assert_eq!(
            check_alphabet(&table),
            Err(AnalysisError::DuplicateSymbols(vec!["a".to_string()]))
        );
    }

    #[test]
    fn test_row_arity() {
        let table = TransitionTable::new(["a", "b"], vec![vec![0, 0], vec![1]], &[]);
        assert_eq!(
            check_row_arity(&table),
            Err(AnalysisError::RowArity {
                state: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            analyze(&table).unwrap_err().to_string(),
            "Table validation error: Row for state 1 has 1 entries, expected 2"
        );
    }

    #[test]
    fn test_target_out_of_range() {
        let table = TransitionTable::new(["a", "b"], vec![vec![0, 2], vec![1, 1]], &[]);
        assert_eq!(
            check_targets(&table),
            Err(AnalysisError::TargetOutOfRange {
                state: 0,
                symbol: "b".to_string(),
                target: 2
            })
        );
    }

    #[test]
    fn test_accept_states_out_of_range() {
        let table = TransitionTable::new(["a"], vec![vec![0]], &[0, 3, 5]);
        assert_eq!(
            check_accept_states(&table),
            Err(AnalysisError::AcceptStatesOutOfRange(vec![3, 5]))
        );
    }

    #[test]
    fn test_first_error_wins() {
        // Both the arity and the accept set are wrong; arity is checked first.
        let table = TransitionTable::new(["a"], vec![vec![0, 0]], &[4]);
        let error = analyze(&table).unwrap_err();
        assert!(error.to_string().contains("Row for state 0"));
    }

    #[test]
    fn test_unreachable_states() {
        let table = TransitionTable::new(
            ["a", "b"],
            vec![vec![1, 0], vec![1, 1], vec![0, 3], vec![2, 2]],
            &[],
        );
        assert_eq!(unreachable_states(&table), vec![2, 3]);
        assert!(unreachable_states(&valid_table()).is_empty());
        assert!(unreachable_states(&TransitionTable::default()).is_empty());
    }
}
