//! Query Cleaning and Tokenizing
//!
//! Every transform cleans the raw query before touching it. The cleaner is
//! pluggable; [`DefaultCleaner`] covers the common case.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Turns a raw query into a plain, scannable string.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, raw: &str) -> String;
}

impl<F> TextCleaner for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn clean(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Cleaner settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Apply NFKC normalization (full-width forms, ligatures, etc.)
    #[serde(default = "default_true")]
    pub normalize_unicode: bool,

    /// Lowercase the query. Off by default; rule keys keep their casing.
    #[serde(default)]
    pub lowercase: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            lowercase: false,
        }
    }
}

fn default_true() -> bool { true }

/// Normalizes unicode, drops control characters, collapses whitespace.
#[derive(Clone, Debug, Default)]
pub struct DefaultCleaner {
    config: CleanerConfig,
}

impl DefaultCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }
}

impl TextCleaner for DefaultCleaner {
    fn clean(&self, raw: &str) -> String {
        let normalized: String = if self.config.normalize_unicode {
            raw.nfkc().collect()
        } else {
            raw.to_string()
        };

        let spaced: String = normalized
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();

        let collapsed = tokenize(&spaced).join(" ");

        if self.config.lowercase {
            collapsed.to_lowercase()
        } else {
            collapsed
        }
    }
}

/// Split a cleaned query into whitespace-delimited tokens.
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Collapse internal whitespace to single spaces (phrase key form).
pub fn normalize_phrase(phrase: &str) -> String {
    tokenize(phrase).join(" ")
}
