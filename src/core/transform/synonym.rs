//! Synonym Transform
//!
//! Rows are `phrase,replacement`. A phrase may span several words; its
//! whitespace is collapsed to form the lookup key. Repeating a phrase adds
//! another alternative instead of replacing the first.
//!
//! Queries are scanned left to right. At each position the longest run of
//! tokens that is a known phrase wins and is emitted as an OR-group:
//!
//! ```text
//! rules:  new york,ny    york,yorkshire
//! query:  new york city
//! result: ( new york OR ny ) city
//! ```
//!
//! Limitation: once a phrase is consumed, shorter phrases starting inside it
//! are never tried. With rules `a b,x` and `b,y` the query `a b` yields
//! `( a b OR x )`; only the query `b` yields `( b OR y )`.

use std::cell::OnceCell;

use super::base::TransformBase;
use super::clean::{normalize_phrase, tokenize};
use super::factory::{QueryTransformer, TransformKind};
use super::reader::ConfigRow;
use super::rules::{RuleEntry, RuleIndex};

#[derive(Debug)]
pub struct SynonymTransform {
    base: TransformBase,
    index: OnceCell<RuleIndex>,
}

impl SynonymTransform {
    pub fn new(query: impl Into<String>, name: impl Into<String>, config: impl Into<String>) -> Self {
        Self::from_base(TransformBase::new(query, name, config))
    }

    pub fn from_base(base: TransformBase) -> Self {
        Self {
            base,
            index: OnceCell::new(),
        }
    }

    /// The phrase table, parsed on first access.
    pub fn index(&self) -> &RuleIndex {
        self.index.get_or_init(|| self.build_index())
    }

    fn build_index(&self) -> RuleIndex {
        let mut index = RuleIndex::new();
        for row in self.base.rule_rows(TransformKind::Synonym) {
            self.parse_row(&row, &mut index);
        }
        index
    }

    fn parse_row(&self, row: &ConfigRow, index: &mut RuleIndex) {
        if !self.base.row_is_valid(row, Some(2)) {
            return;
        }

        let key = normalize_phrase(row.field(0).unwrap_or_default());
        let replacement = row.field(1).unwrap_or_default().trim();
        if key.is_empty() || replacement.is_empty() {
            self.base.report_malformed(row);
            return;
        }

        index.append(key, replacement.to_string());
    }
}

/// Expand `tokens` against `index` using greedy longest-phrase matching.
pub fn expand_tokens(index: &RuleIndex, tokens: &[&str]) -> String {
    let n = tokens.len();
    // Candidates longer than the longest key can never match.
    let longest = index.max_key_words().max(1);

    let mut fragments: Vec<String> = Vec::with_capacity(n);
    let mut pos = 0;

    while pos < n {
        let max_len = (n - pos).min(longest);

        for len in (1..=max_len).rev() {
            let candidate = tokens[pos..pos + len].join(" ");
            let replacements = index.replacements(&candidate);

            if !replacements.is_empty() {
                fragments.push(or_group(&candidate, replacements));
                pos += len;
                break;
            }

            if len == 1 {
                fragments.push(candidate);
                pos += 1;
            }
        }
    }

    fragments.join(" ")
}

/// `( original OR alt1 OR alt2 )`
fn or_group(original: &str, alternatives: &[String]) -> String {
    let mut terms = Vec::with_capacity(alternatives.len() + 1);
    terms.push(original);
    terms.extend(alternatives.iter().map(String::as_str));
    format!("( {} )", terms.join(" OR "))
}

impl QueryTransformer for SynonymTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Synonym
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
        let index = self.index();
        let query = self.base.clean_query();
        if query.is_empty() {
            return query;
        }
        log::info!("{} {} processing query", self.kind().processor_name(), self.base.name());

        expand_tokens(index, &tokenize(&query))
    }

    fn replace_patterns(&self) -> Vec<&RuleEntry> {
        self.index().entries().collect()
    }

    fn synonyms(&self, word: &str) -> &[String] {
        self.index().replacements(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::diagnostics::{Diagnostic, MemorySink};

    fn expand(query: &str, config: &str) -> String {
        SynonymTransform::new(query, "test", config).process()
    }

    #[test]
    fn test_longest_phrase_wins() {
        let config = "new york,ny\nyork,yorkshire\n";
        assert_eq!(expand("new york city", config), "( new york OR ny ) city");
        assert_eq!(expand("york city", config), "( york OR yorkshire ) city");
    }

    #[test]
    fn test_no_rules_passthrough() {
        assert_eq!(expand("hello world", ""), "hello world");
        assert_eq!(expand("  hello   world ", ""), "hello world");
    }

    #[test]
    fn test_repeated_rows_accumulate() {
        assert_eq!(expand("car", "car,auto\ncar,vehicle\n"), "( car OR auto OR vehicle )");
    }

    #[test]
    fn test_overlap_limitation() {
        let config = "a b,x\nb,y\n";
        assert_eq!(expand("a b", config), "( a b OR x )");
        assert_eq!(expand("b", config), "( b OR y )");
        assert_eq!(expand("c b", config), "c ( b OR y )");
    }

    #[test]
    fn test_key_whitespace_collapsed() {
        assert_eq!(expand("new york", "  new    york  , ny \n"), "( new york OR ny )");
    }

    #[test]
    fn test_replacement_kept_verbatim() {
        assert_eq!(expand("ny", "ny,New   York\n"), "( ny OR New   York )");
    }

    #[test]
    fn test_case_sensitive_keys() {
        assert_eq!(expand("NY", "ny,new york\n"), "NY");
    }

    #[test]
    fn test_multiple_groups_and_literals() {
        let config = "hp,hit points\nac,armor class\n";
        assert_eq!(
            expand("restore hp and ac", config),
            "restore ( hp OR hit points ) and ( ac OR armor class )"
        );
    }

    #[test]
    fn test_three_word_phrase_inside_query() {
        let config = "new york city,nyc\nnew york,ny\n";
        assert_eq!(expand("visit new york city now", config), "visit ( new york city OR nyc ) now");
        assert_eq!(expand("visit new york now", config), "visit ( new york OR ny ) now");
    }

    #[test]
    fn test_short_rows_reported() {
        let sink = MemorySink::shared();
        let base = TransformBase::new("car", "syn", "# header\ncar\ncar,auto\ncar,\n").with_sink(sink.clone());
        let transform = SynonymTransform::from_base(base);

        assert_eq!(transform.process(), "( car OR auto )");
        let rows: Vec<usize> = sink
            .diagnostics()
            .iter()
            .filter_map(|d| match d {
                Diagnostic::MalformedRow { row, .. } => Some(*row),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec![1, 3]);
    }

    #[test]
    fn test_empty_key_or_replacement_rejected() {
        let sink = MemorySink::shared();
        let base = TransformBase::new("car", "syn", "car,\n   ,auto\ncar,  \n").with_sink(sink.clone());
        let transform = SynonymTransform::from_base(base);

        assert_eq!(transform.process(), "car");
        assert!(transform.synonyms("car").is_empty());
        assert!(transform.replace_patterns().is_empty());
        assert_eq!(
            sink.diagnostics(),
            vec![
                Diagnostic::MalformedRow { name: "syn".to_string(), row: 1, line: 1 },
                Diagnostic::MalformedRow { name: "syn".to_string(), row: 2, line: 2 },
                Diagnostic::MalformedRow { name: "syn".to_string(), row: 3, line: 3 },
            ]
        );
    }

    #[test]
    fn test_lookup_and_patterns() {
        let transform = SynonymTransform::new("", "syn", "car,auto\nbike,bicycle\ncar,vehicle\n");
        assert_eq!(transform.synonyms("car"), ["auto", "vehicle"]);
        assert!(transform.synonyms("truck").is_empty());

        let patterns = transform.replace_patterns();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].pattern, "car");
        assert_eq!(patterns[1].pattern, "bike");
    }

    #[test]
    fn test_empty_query() {
        let transform = SynonymTransform::new("   ", "syn", "car,auto\n");
        assert_eq!(transform.process(), "");
        assert!(transform.is_parsed());
    }

    #[test]
    fn test_expand_tokens_directly() {
        let mut index = RuleIndex::new();
        index.append("b c".to_string(), "x".to_string());
        assert_eq!(expand_tokens(&index, &["a", "b", "c", "d"]), "a ( b c OR x ) d");
        assert_eq!(expand_tokens(&index, &[]), "");
    }
}
