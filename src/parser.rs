//! This module provides the parser for transition table files, utilizing the `pest` crate.
//! It defines the grammar for the comma-delimited table format and functions to parse the
//! input into a `TransitionTable`.

use crate::{
    analyzer::analyze,
    types::{AutomatonError, State, TransitionTable},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::BTreeSet;

/// Derives a `PestParser` for the transition table grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// The smallest number of lines that describes at least one state:
/// the alphabet, one row and the accept set.
const MIN_TABLE_LINES: usize = 3;

/// Parses the given input string into a `TransitionTable`.
///
/// Trailing line breaks are ignored. Input with fewer than three lines implies zero states and
/// yields the empty table rather than an error. The parsed table is validated before being
/// returned.
///
/// # Returns
///
/// * `Ok(TransitionTable)` if the input is successfully parsed and validated.
/// * `Err(AutomatonError::ParseError)` if there are syntax errors or malformed fields.
/// * `Err(AutomatonError::ValidationError)` if the table is structurally inconsistent.
pub fn parse(input: &str) -> Result<TransitionTable, AutomatonError> {
    let input = input.trim_end_matches(['\r', '\n']);

    if input.lines().count() < MIN_TABLE_LINES {
        log::debug!("Table text has no state rows, using an empty table");
        return Ok(TransitionTable::default());
    }

    let root = TableParser::parse(Rule::table, input)
        .map_err(|e| AutomatonError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| AutomatonError::ValidationError("Empty table".to_string()))?;

    let table = parse_table(root)?;

    analyze(&table)?;

    log::debug!(
        "Parsed table with {} states over {} symbols",
        table.state_count(),
        table.alphabet.len()
    );

    Ok(table)
}

/// Collects the alphabet, rows and accept set from a `Pair<Rule::table>`.
fn parse_table(pair: Pair<Rule>) -> Result<TransitionTable, AutomatonError> {
    let mut table = TransitionTable::default();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::alphabet => table.alphabet = parse_alphabet(p),
            Rule::row => table.rows.push(parse_indices(p)?),
            Rule::accepts => table.accept_states = parse_accepts(p)?,
            _ => {} // EOI
        }
    }

    Ok(table)
}

fn parse_alphabet(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::symbol)
        .map(|p| p.as_str().to_string())
        .collect()
}

fn parse_indices(pair: Pair<Rule>) -> Result<Vec<State>, AutomatonError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::index)
        .map(parse_index)
        .collect()
}

fn parse_accepts(pair: Pair<Rule>) -> Result<BTreeSet<State>, AutomatonError> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::index)
        .map(parse_index)
        .collect()
}

/// Parses a state index, rejecting negative and oversized values with the field's span.
fn parse_index(pair: Pair<Rule>) -> Result<State, AutomatonError> {
    let span = pair.as_span();
    let text = pair.as_str();

    if text.starts_with('-') {
        return Err(parse_error(&format!("Negative state index: {text}"), span));
    }

    text.parse::<State>()
        .map_err(|e| parse_error(&format!("Invalid state index {text}: {e}"), span))
}

/// Creates an `AutomatonError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> AutomatonError {
    AutomatonError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let input = "a,b\n1,0\n0,1\n{1}\n";

        let table = parse(input).unwrap();
        assert_eq!(table.alphabet, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec![1, 0], vec![0, 1]]);
        assert_eq!(table.accept_states, BTreeSet::from([1]));
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let table = parse("a\n0\n{0}").unwrap();
        assert_eq!(table.rows, vec![vec![0]]);
    }

    #[test]
    fn test_parse_crlf_line_breaks() {
        let table = parse("a,b\r\n1,0\r\n1,1\r\n{1}\r\n").unwrap();
        assert_eq!(table.alphabet, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_parse_multi_character_symbols() {
        let table = parse("ab,c\n0,0\n{}").unwrap();
        assert_eq!(table.alphabet, vec!["ab", "c"]);
        assert!(table.accept_states.is_empty());
    }

    #[test]
    fn test_parse_too_few_lines_is_empty() {
        assert_eq!(parse("").unwrap(), TransitionTable::default());
        assert_eq!(parse("a,b").unwrap(), TransitionTable::default());
        assert_eq!(parse("a,b\n{1}\n").unwrap(), TransitionTable::default());
    }

    #[test]
    fn test_parse_non_numeric_entry() {
        let result = parse("a,b\n1,x\n0,1\n{1}");
        let error = result.unwrap_err();
        assert!(matches!(error, AutomatonError::ParseError(_)));
    }

    #[test]
    fn test_parse_whitespace_is_not_tolerated() {
        let error = parse("a,b\n1, 0\n0,1\n{1}").unwrap_err();
        assert!(matches!(error, AutomatonError::ParseError(_)));
    }

    #[test]
    fn test_parse_missing_braces() {
        let error = parse("a,b\n1,0\n0,1\n1").unwrap_err();
        assert!(matches!(error, AutomatonError::ParseError(_)));
    }

    #[test]
    fn test_parse_negative_index() {
        let error = parse("a\n-1\n{0}").unwrap_err();
        assert!(matches!(error, AutomatonError::ParseError(_)));
        assert!(error.to_string().contains("Negative state index: -1"));
    }

    #[test]
    fn test_parse_oversized_index() {
        let error = parse("a\n99999999999999999999999\n{0}").unwrap_err();
        assert!(matches!(error, AutomatonError::ParseError(_)));
        assert!(error.to_string().contains("Invalid state index"));
    }

    #[test]
    fn test_parse_wrong_arity() {
        let error = parse("a,b\n1,0,1\n0,1\n{1}").unwrap_err();
        assert!(matches!(error, AutomatonError::ValidationError(_)));
        assert_eq!(
            error.to_string(),
            "Table validation error: Row for state 0 has 3 entries, expected 2"
        );
    }

    #[test]
    fn test_parse_target_out_of_range() {
        let error = parse("a,b\n1,2\n0,1\n{1}").unwrap_err();
        assert!(matches!(error, AutomatonError::ValidationError(_)));
        assert!(error.to_string().contains("undefined state 2"));
    }

    #[test]
    fn test_parse_accept_state_out_of_range() {
        let error = parse("a,b\n1,0\n0,1\n{1,7}").unwrap_err();
        assert!(matches!(error, AutomatonError::ValidationError(_)));
        assert!(error.to_string().contains("[7]"));
    }

    #[test]
    fn test_parse_duplicate_symbols() {
        let error = parse("a,a\n0,0\n{0}").unwrap_err();
        assert!(matches!(error, AutomatonError::ValidationError(_)));
    }
}
