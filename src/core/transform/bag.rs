//! Synonym Bag Transform
//!
//! Each row is a bag of interchangeable words: `red,scarlet,crimson`. Every
//! member maps to the whole bag, itself included. A word belongs to at most one
//! bag; the first row that mentions it wins.
//!
//! `process` only cleans the query. Bags are exposed through
//! [`QueryTransformer::synonyms`] for callers that compose their own expansion.

use std::cell::OnceCell;

use super::base::TransformBase;
use super::diagnostics::Diagnostic;
use super::factory::{QueryTransformer, TransformKind};
use super::reader::ConfigRow;
use super::rules::{RuleEntry, RuleIndex};

#[derive(Debug)]
pub struct BagTransform {
    base: TransformBase,
    index: OnceCell<RuleIndex>,
}

impl BagTransform {
    pub fn new(query: impl Into<String>, name: impl Into<String>, config: impl Into<String>) -> Self {
        Self::from_base(TransformBase::new(query, name, config))
    }

    pub fn from_base(base: TransformBase) -> Self {
        Self {
            base,
            index: OnceCell::new(),
        }
    }

    /// Word → bag table, parsed on first access.
    pub fn index(&self) -> &RuleIndex {
        self.index.get_or_init(|| self.build_index())
    }

    fn build_index(&self) -> RuleIndex {
        let mut index = RuleIndex::new();
        for row in self.base.rule_rows(TransformKind::Bag) {
            self.parse_row(&row, &mut index);
        }
        index
    }

    fn parse_row(&self, row: &ConfigRow, index: &mut RuleIndex) {
        if !self.base.row_is_valid(row, None) {
            return;
        }

        let mut members: Vec<String> = Vec::with_capacity(row.len());
        for field in &row.fields {
            let word = field.trim();
            if word.is_empty() || members.iter().any(|m| m == word) {
                continue;
            }
            members.push(word.to_string());
        }

        for word in &members {
            let entry = RuleEntry::with_replacements(word.clone(), members.clone());
            if !index.insert_if_absent(word.clone(), entry) {
                self.base.report(Diagnostic::BagConflict {
                    name: self.base.name().to_string(),
                    word: word.clone(),
                });
            }
        }
    }
}

impl QueryTransformer for BagTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Bag
    }

    fn base(&self) -> &TransformBase {
        &self.base
    }

    fn parse_config(&self) {
        self.index();
    }

    fn is_parsed(&self) -> bool {
        self.index.get().is_some()
    }

    fn process(&self) -> String {
        self.parse_config();
        self.base.clean_query()
    }

    fn replace_patterns(&self) -> Vec<&RuleEntry> {
        self.index().entries().collect()
    }

    fn synonyms(&self, word: &str) -> &[String] {
        self.index().replacements(word)
    }
}
