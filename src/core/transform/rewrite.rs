//! Rewrite Transform
//!
//! Ordered pattern rewriting. Each row is `pattern[;pattern...][,replacement]`:
//!
//! - a single field deletes the pattern as a whole word (`\bword\b\s?`)
//! - with a second field, the pattern is a regular expression and every match
//!   is replaced by the literal replacement text
//!
//! Rules run in row order and each one sees the output of the previous one.

use std::cell::OnceCell;

use regex::{NoExpand, Regex};

use super::base::TransformBase;
use super::diagnostics::Diagnostic;
use super::factory::{QueryTransformer, TransformKind};
use super::reader::ConfigRow;
use super::rules::RuleEntry;

/// A compiled rewrite rule.
#[derive(Clone, Debug)]
pub struct RewriteRule {
    entry: RuleEntry,
    regex: Regex,
}

impl RewriteRule {
    pub fn entry(&self) -> &RuleEntry {
        &self.entry
    }

    /// Replace every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, NoExpand(self.entry.replacement()))
            .into_owned()
    }
}

#[derive(Debug)]
pub struct RewriteTransform {
    base: TransformBase,
    rules: OnceCell<Vec<RewriteRule>>,
}

impl RewriteTransform {
    pub fn new(query: impl Into<String>, name: impl Into<String>, config: impl Into<String>) -> Self {
        Self::from_base(TransformBase::new(query, name, config))
    }

    pub fn from_base(base: TransformBase) -> Self {
        Self {
            base,
            rules: OnceCell::new(),
        }
    }

    /// Compiled rules in application order.
    pub fn rules(&self) -> &[RewriteRule] {
        self.rules.get_or_init(|| self.build_rules())
    }

    fn build_rules(&self) -> Vec<RewriteRule> {
        let mut rules = Vec::new();
        for row in self.base.rule_rows(TransformKind::Rewrite) {
            self.parse_row(&row, &mut rules);
        }
        log::debug!("{} {}: {} rewrite rules", self.kind().processor_name(), self.base.name(), rules.len());
        rules
    }

    fn parse_row(&self, row: &ConfigRow, rules: &mut Vec<RewriteRule>) {
        if !self.base.row_is_valid(row, Some(1)) {
            return;
        }

        let whole_word = row.len() == 1;
        let patterns = row.field(0).unwrap_or_default();
        let replacement = if whole_word {
            ""
        } else {
            row.field(1).unwrap_or_default().trim()
        };

        for sub in patterns.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let pattern = if whole_word {
                format!(r"\b{}\b\s?", sub)
            } else {
                sub.to_string()
            };

            match Regex::new(&pattern) {
                Ok(regex) => rules.push(RewriteRule {
                    entry: RuleEntry::new(pattern, replacement),
                    regex,
                }),
                Err(e) => self.base.report(Diagnostic::InvalidPattern {
                    name: self.base.name().to_string(),
                    row: row.ordinal,
                    line: row.line,
                    pattern,
                    message: e.to_string(),
                }),
            }
        }
    }
}

impl QueryTransformer for RewriteTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Rewrite
    }

    fn base(&self) -> &TransformBase {
        &self.base
    }

    fn parse_config(&self) {
        self.rules();
    }

    fn is_parsed(&self) -> bool {
        self.rules.get().is_some()
    }

    fn process(&self) -> String {
        let rules = self.rules();
        let query = self.base.clean_query();
        if query.is_empty() {
            return query;
        }
        log::info!("{} {} processing query", self.kind().processor_name(), self.base.name());

        rules.iter().fold(query, |text, rule| rule.apply(&text))
    }

    fn replace_patterns(&self) -> Vec<&RuleEntry> {
        self.rules().iter().map(RewriteRule::entry).collect()
    }

    fn synonyms(&self, _word: &str) -> &[String] {
        &[]
    }
}
