//! Ordered placeholder bindings.

use super::TemplateError;

/// Whether `name` can appear between `{{` and `}}`: non-empty, no braces.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && !name.contains(['{', '}'])
}

/// Identifier → replacement value, in insertion order.
///
/// Identifiers are unique and case-sensitive. Re-inserting an identifier
/// replaces its value without moving it, so sequential rendering stays
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(String, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Split a `KEY=VALUE` command-line assignment at the first `=`.
    ///
    /// The value may be empty or contain further `=` signs; the key must be
    /// a placeholder identifier (see [`is_identifier`]).
    pub fn parse_assignment(input: &str) -> Result<(String, String), TemplateError> {
        match input.split_once('=') {
            Some((key, value)) if is_identifier(key) => Ok((key.to_string(), value.to_string())),
            _ => Err(TemplateError::InvalidAssignment(input.to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Bindings {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        bindings.extend(iter);
        bindings
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Bindings {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
