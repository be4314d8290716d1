//! A catalog of small sample automata embedded in the crate, parsed once on first use.

use crate::machine::DeterministicAutomaton;
use crate::types::AutomatonError;

// Embedded sample tables
const SAMPLE_TEXTS: [(&str, &str); 3] = [
    ("odd-a", include_str!("../tables/odd-a.dfa")),
    ("ends-with-ab", include_str!("../tables/ends-with-ab.dfa")),
    ("binary-mod-3", include_str!("../tables/binary-mod-3.dfa")),
];

/// A named sample automaton.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: &'static str,
    pub text: &'static str,
    pub automaton: DeterministicAutomaton,
}

lazy_static::lazy_static! {
    pub static ref SAMPLES: Vec<Sample> = SAMPLE_TEXTS
        .iter()
        .filter_map(|&(name, text)| match text.parse::<DeterministicAutomaton>() {
            Ok(automaton) => Some(Sample { name, text, automaton }),
            Err(e) => {
                log::error!("Failed to parse sample table {}: {}", name, e);
                None
            }
        })
        .collect();
}

pub struct SampleCatalog;

impl SampleCatalog {
    /// Get the number of available samples
    pub fn count() -> usize {
        SAMPLES.len()
    }

    /// List all sample names
    pub fn names() -> Vec<&'static str> {
        SAMPLES.iter().map(|sample| sample.name).collect()
    }

    /// Get a sample by its index
    pub fn by_index(index: usize) -> Result<&'static Sample, AutomatonError> {
        SAMPLES.get(index).ok_or_else(|| {
            AutomatonError::ValidationError(format!("Sample index {} out of range", index))
        })
    }

    /// Get a sample by its name
    pub fn by_name(name: &str) -> Result<&'static Sample, AutomatonError> {
        SAMPLES
            .iter()
            .find(|sample| sample.name == name)
            .ok_or_else(|| AutomatonError::ValidationError(format!("Sample '{}' not found", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_samples_parse() {
        assert_eq!(SampleCatalog::count(), SAMPLE_TEXTS.len());
        assert_eq!(
            SampleCatalog::names(),
            vec!["odd-a", "ends-with-ab", "binary-mod-3"]
        );
    }

    #[test]
    fn test_samples_render_their_source() {
        for sample in SAMPLES.iter() {
            assert_eq!(sample.automaton.to_string(), sample.text);
        }
    }

    #[test]
    fn test_sample_by_index() {
        let sample = SampleCatalog::by_index(0).unwrap();
        assert_eq!(sample.name, "odd-a");

        let error = SampleCatalog::by_index(99).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Table validation error: Sample index 99 out of range"
        );
    }

    #[test]
    fn test_sample_by_name_missing() {
        assert!(SampleCatalog::by_name("palindrome").is_err());
    }

    #[test]
    fn test_odd_a() {
        let machine = &SampleCatalog::by_name("odd-a").unwrap().automaton;

        assert!(machine.process_string("a"));
        assert!(!machine.process_string("b"));
        assert!(!machine.process_string(""));
        assert!(machine.process_string("bbab"));
        assert!(!machine.process_string("babab"));
    }

    #[test]
    fn test_ends_with_ab() {
        let machine = &SampleCatalog::by_name("ends-with-ab").unwrap().automaton;

        assert!(machine.process_string("ab"));
        assert!(machine.process_string("bbaab"));
        assert!(!machine.process_string("aba"));
        assert!(!machine.process_string("b"));
    }

    #[test]
    fn test_binary_mod_3() {
        let machine = &SampleCatalog::by_name("binary-mod-3").unwrap().automaton;

        for n in 1u32..64 {
            let binary = format!("{:b}", n);
            assert_eq!(machine.process_string(&binary), n % 3 == 0, "n = {}", n);
        }
        assert!(machine.process_string("0"));
    }
}
