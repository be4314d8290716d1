//! This module defines `FiniteLanguage`, a finite set of strings with the closure operations of
//! formal language theory.

use crate::types::LanguageError;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::collections::{btree_set, BTreeSet};
use std::fmt;

/// A finite language: a set of strings, iterated in ascending lexicographic order.
///
/// Strings are ordered by Unicode code point. The language only grows; there is no removal.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FiniteLanguage {
    strings: BTreeSet<String>,
}

impl FiniteLanguage {
    /// Creates a language with no strings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the language is the empty set.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns the number of strings in the language, saturated at `u32::MAX`.
    pub fn cardinality(&self) -> u32 {
        u32::try_from(self.strings.len()).unwrap_or(u32::MAX)
    }

    /// Checks if `candidate` is in the language.
    pub fn includes(&self, candidate: &str) -> bool {
        self.strings.contains(candidate)
    }

    /// Ensures the language includes `member`.
    ///
    /// Returns `true` if the language changed as a result of the call.
    pub fn add_string(&mut self, member: impl Into<String>) -> bool {
        self.strings.insert(member.into())
    }

    /// Ensures the language includes every string of `members`.
    ///
    /// Returns `true` if the language grew at all.
    pub fn add_all_strings<I>(&mut self, members: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let before = self.strings.len();
        self.strings.extend(members.into_iter().map(Into::into));
        self.strings.len() > before
    }

    /// Returns an iterator over the strings in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.strings.iter()
    }

    /// Creates the concatenation of this language with `other`.
    ///
    /// Every string of `self` is joined with every string of `other`. The empty string is the
    /// identity: pairing it with `y` contributes `y` itself.
    pub fn concatenate(&self, other: &FiniteLanguage) -> FiniteLanguage {
        let mut result = FiniteLanguage::new();

        for x in &self.strings {
            for y in &other.strings {
                let joined = if x.is_empty() {
                    y.clone()
                } else if y.is_empty() {
                    x.clone()
                } else {
                    let mut joined = String::with_capacity(x.len() + y.len());
                    joined.push_str(x);
                    joined.push_str(y);
                    joined
                };
                result.strings.insert(joined);
            }
        }

        result
    }

    /// Compares this language against a value of any type.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` if `other` is a `FiniteLanguage`, with set equality.
    /// * `Err(LanguageError::TypeMismatch)` for any other type.
    pub fn try_eq<T: Any>(&self, other: &T) -> Result<bool, LanguageError> {
        (other as &dyn Any)
            .downcast_ref::<FiniteLanguage>()
            .map(|language| self == language)
            .ok_or_else(|| LanguageError::TypeMismatch(type_name::<T>().to_string()))
    }
}

impl<S: Into<String>> FromIterator<S> for FiniteLanguage {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for FiniteLanguage {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add_all_strings(iter);
    }
}

impl<'a> IntoIterator for &'a FiniteLanguage {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.strings.iter()
    }
}

impl IntoIterator for FiniteLanguage {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.strings.into_iter()
    }
}

/// Formats the language as a set literal, e.g. `{"", "a", "ab"}`.
impl fmt::Display for FiniteLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", s)?;
        }
        f.write_str("}")
    }
}
