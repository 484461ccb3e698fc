//! Rule Entries and Keyed Rule Tables

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One substitution: a pattern and what it may be replaced with.
///
/// `replacements` is never empty. Rewrite rules hold exactly one replacement
/// (the empty string deletes the match); synonym and bag entries may hold
/// several.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub pattern: String,
    pub replacements: Vec<String>,
}

impl RuleEntry {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacements: vec![replacement.into()],
        }
    }

    pub fn with_replacements(pattern: impl Into<String>, replacements: Vec<String>) -> Self {
        debug_assert!(!replacements.is_empty());
        Self {
            pattern: pattern.into(),
            replacements,
        }
    }

    /// The first replacement, which is the only one for rewrite rules.
    pub fn replacement(&self) -> &str {
        self.replacements.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<<{}>> -> <<{}>>", self.pattern, self.replacements.join("|"))
    }
}

/// Keyed rule table used by the synonym and bag transforms.
///
/// Keys keep insertion order so dumps and `replace_patterns()` are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RuleIndex {
    entries: IndexMap<String, RuleEntry>,
    /// Word count of the longest key
    #[serde(skip)]
    max_key_words: usize,
}

impl RuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&RuleEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Replacements stored for `key`, empty when the key is unknown.
    pub fn replacements(&self, key: &str) -> &[String] {
        self.entries
            .get(key)
            .map(|entry| entry.replacements.as_slice())
            .unwrap_or(&[])
    }

    /// Add `replacement` under `key`, appending if the key already exists.
    pub fn append(&mut self, key: String, replacement: String) {
        match self.entries.get_mut(&key) {
            Some(entry) => entry.replacements.push(replacement),
            None => {
                let entry = RuleEntry::new(key.clone(), replacement);
                self.insert_new(key, entry);
            }
        }
    }

    /// Insert `entry` only if `key` is not present yet. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, key: String, entry: RuleEntry) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.insert_new(key, entry);
        true
    }

    fn insert_new(&mut self, key: String, entry: RuleEntry) {
        self.max_key_words = self.max_key_words.max(key.split_whitespace().count());
        self.entries.insert(key, entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_key_words(&self) -> usize {
        self.max_key_words
    }
}
