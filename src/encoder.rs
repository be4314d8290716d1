//! This module renders transition tables back into the comma-delimited text format read by
//! the parser.

use crate::types::{State, TransitionTable, DELIMITER};

/// Encodes a transition table into its text format.
///
/// Format, one record per line:
/// - the alphabet symbols in column order,
/// - one row of destination states per state,
/// - the accept states in braces.
///
/// Every line, including the last, ends with a newline. A table without states encodes to the
/// empty string.
pub fn encode(table: &TransitionTable) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.state_count() + 2);

    lines.push(join(table.alphabet.iter()));
    lines.extend(table.rows.iter().map(|row| encode_states(row.iter())));
    lines.push(format!("{{{}}}", encode_states(table.accept_states.iter())));

    let mut encoded = lines.join("\n");
    encoded.push('\n');
    encoded
}

fn encode_states<'a>(states: impl Iterator<Item = &'a State>) -> String {
    join(states.map(|s| s.to_string()))
}

fn join<S: AsRef<str>>(items: impl Iterator<Item = S>) -> String {
    items
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}
