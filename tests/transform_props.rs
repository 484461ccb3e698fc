//! Property tests for the query transforms.

use proptest::prelude::*;

use query_transform::core::transform::{
    alloc_query_transform, expand_tokens, DefaultCleaner, QueryTransformer, RuleIndex, TextCleaner,
};

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..8).prop_map(|words| words.join("  "))
}

proptest! {
    #[test]
    fn bag_process_is_cleaning_only(q in query(), bag in prop::collection::vec(word(), 1..4)) {
        let rules = bag.join(",");
        let transform = alloc_query_transform("bag", q.clone(), "bag", rules).unwrap();
        prop_assert_eq!(transform.process(), DefaultCleaner::default().clean(&q));
    }

    #[test]
    fn synonym_without_rules_is_identity(q in query()) {
        let transform = alloc_query_transform("synonym", q.clone(), "syn", "").unwrap();
        prop_assert_eq!(transform.process(), DefaultCleaner::default().clean(&q));
    }

    #[test]
    fn rewrite_without_rules_is_identity(q in query()) {
        let transform = alloc_query_transform("rewrite", q.clone(), "rw", "# nothing\n").unwrap();
        prop_assert_eq!(transform.process(), DefaultCleaner::default().clean(&q));
    }

    /// Stripping the OR-group decoration gives back every query token in order.
    #[test]
    fn synonym_groups_keep_original_tokens(
        words in prop::collection::vec("[a-c]", 0..10),
        keys in prop::collection::vec(prop::collection::vec("[a-c]", 1..3), 0..4),
    ) {
        let mut index = RuleIndex::new();
        for key in &keys {
            index.append(key.join(" "), "ALT".to_string());
        }
        let tokens: Vec<&str> = words.iter().map(String::as_str).collect();
        let expanded = expand_tokens(&index, &tokens);

        let mut recovered = Vec::new();
        let mut skip_alternatives = false;
        for piece in expanded.split_whitespace() {
            match piece {
                "(" => skip_alternatives = false,
                ")" => skip_alternatives = false,
                "OR" => skip_alternatives = true,
                other if !skip_alternatives => recovered.push(other),
                _ => {}
            }
        }
        prop_assert_eq!(recovered, tokens);
    }
}
