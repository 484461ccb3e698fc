//! Integration tests for the query transforms.
//!
//! Exercises the public API end to end: factory selection, lazy rule parsing,
//! the three transform algorithms and diagnostics delivery.

use std::sync::Arc;

use rstest::rstest;

use query_transform::core::transform::{
    alloc_query_transform, Diagnostic, MemorySink, QueryTransform, QueryTransformer,
    TransformError, TransformFactory, TransformKind,
};

fn factory_with_sink() -> (TransformFactory, Arc<MemorySink>) {
    let sink = MemorySink::shared();
    let factory = TransformFactory::new().with_sink(sink.clone());
    (factory, sink)
}

#[rstest]
#[case::order_matters("cat", "cat,dog\ndog,fish\n", "fish")]
#[case::reverse_order("cat", "dog,fish\ncat,dog\n", "dog")]
#[case::whole_word_delete("the cat sat", "the\n", "cat sat")]
#[case::no_substring_delete("theme", "the\n", "theme")]
#[case::multi_pattern("tv and telly", "tv;telly,television\n", "television and television")]
#[case::empty_query("   ", "cat,dog\n", "")]
#[case::no_rules("  keep   me ", "", "keep me")]
fn rewrite_cases(#[case] query: &str, #[case] rules: &str, #[case] expected: &str) {
    let transform = alloc_query_transform("rewrite", query, "rewrite-test", rules).unwrap();
    assert_eq!(transform.process(), expected);
}

#[rstest]
#[case::longest_match_first("new york city", "new york,ny\nyork,yorkshire\n", "( new york OR ny ) city")]
#[case::literal_fallback("hello world", "", "hello world")]
#[case::accumulated_alternatives("car", "car,auto\ncar,vehicle\n", "( car OR auto OR vehicle )")]
#[case::single_word_key("york", "new york,ny\nyork,yorkshire\n", "( york OR yorkshire )")]
#[case::phrase_at_end("i love new york", "new york,ny\n", "i love ( new york OR ny )")]
#[case::adjacent_groups("ny la", "ny,new york\nla,los angeles\n", "( ny OR new york ) ( la OR los angeles )")]
#[case::overlap_not_retried("a b c", "a b,x\nb c,y\n", "( a b OR x ) c")]
fn synonym_cases(#[case] query: &str, #[case] rules: &str, #[case] expected: &str) {
    let transform = alloc_query_transform("synonym", query, "synonym-test", rules).unwrap();
    assert_eq!(transform.process(), expected);
}

#[test]
fn bag_first_definition_wins() {
    let (factory, sink) = factory_with_sink();
    let bag = factory.build(TransformKind::Bag, "", "colors", "red,scarlet,crimson\nred,pink\n");

    bag.parse_config();
    assert_eq!(bag.synonyms("red"), ["red", "scarlet", "crimson"]);
    assert_eq!(bag.synonyms("scarlet"), ["red", "scarlet", "crimson"]);
    assert_eq!(
        sink.diagnostics(),
        vec![Diagnostic::BagConflict {
            name: "colors".to_string(),
            word: "red".to_string(),
        }]
    );
}

#[test]
fn bag_process_does_not_expand() {
    let bag = alloc_query_transform("bag", "red  car", "colors", "red,scarlet\n").unwrap();
    assert_eq!(bag.process(), "red car");
}

#[rstest]
#[case::rewrite("rewrite")]
#[case::synonym("synonym")]
#[case::bag("bag")]
fn comments_and_blank_rows_skipped(#[case] tag: &str) {
    let (factory, sink) = factory_with_sink();
    let transform = factory
        .alloc(tag, "", "skip-test", "# comment\n\ncar,auto\n")
        .unwrap();

    let expected = match transform.kind() {
        // one rule row, one entry per member word for bags
        TransformKind::Bag => 2,
        _ => 1,
    };
    assert_eq!(transform.replace_patterns().len(), expected);
    assert!(sink.is_empty());
}

#[test]
fn unknown_tag_fails_before_processing() {
    let err = alloc_query_transform("bogus", "anything", "n", "a,b\n").unwrap_err();
    assert!(matches!(err, TransformError::InvalidTransformType(ref tag) if tag == "bogus"));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn rules_parsed_once_across_calls() {
    let (factory, sink) = factory_with_sink();
    let transform = factory.build(TransformKind::Synonym, "car", "once", "broken\ncar,auto\n");

    assert!(!transform.is_parsed());
    let first = transform.process();
    assert!(transform.is_parsed());
    let second = transform.process();

    assert_eq!(first, second);
    assert_eq!(sink.len(), 1, "malformed row should be reported exactly once");

    let a = transform.replace_patterns()[0] as *const _;
    let b = transform.replace_patterns()[0] as *const _;
    assert_eq!(a, b, "table should not be rebuilt");
}

#[rstest]
#[case::no_blank_lines("# comment\nok,fine\nbad\n", 3)]
#[case::blank_lines_before_row("# c\n\nok,fine\n\nbad\n", 5)]
#[case::crlf_blank_lines("# c\r\n\r\nok,fine\r\n\r\nbad\r\n", 5)]
fn malformed_rows_report_ordinal_and_line(#[case] rules: &str, #[case] line: u64) {
    let (factory, sink) = factory_with_sink();
    let transform = factory.build(TransformKind::Synonym, "x", "abbreviations", rules);
    transform.parse_config();

    assert_eq!(
        sink.diagnostics(),
        vec![Diagnostic::MalformedRow {
            name: "abbreviations".to_string(),
            row: 2,
            line,
        }]
    );
}

#[test]
fn invalid_pattern_reports_source_line() {
    let (factory, sink) = factory_with_sink();
    let transform = factory.build(TransformKind::Rewrite, "cat", "rw", "\n\ncat,dog\n\n(oops,x\n");
    assert_eq!(transform.process(), "dog");

    match sink.diagnostics().as_slice() {
        [Diagnostic::InvalidPattern { row, line, .. }] => assert_eq!((*row, *line), (2, 5)),
        other => panic!("unexpected diagnostics: {other:?}"),
    }
}

#[test]
fn instances_do_not_share_tables() {
    let first = alloc_query_transform("synonym", "car", "a", "car,auto\n").unwrap();
    let second = alloc_query_transform("synonym", "car", "b", "car,vehicle\n").unwrap();

    assert_eq!(first.process(), "( car OR auto )");
    assert_eq!(second.process(), "( car OR vehicle )");
}

#[test]
fn transforms_move_across_threads() {
    let transform: QueryTransform = alloc_query_transform("synonym", "car", "t", "car,auto\n").unwrap();
    let handle = std::thread::spawn(move || transform.process());
    assert_eq!(handle.join().unwrap(), "( car OR auto )");
}

#[test]
fn custom_cleaner_is_used() {
    let factory = TransformFactory::new().with_cleaner(Arc::new(|s: &str| s.to_lowercase()));
    let transform = factory.alloc("synonym", "New York", "lower", "new york,ny\n").unwrap();
    assert_eq!(transform.process(), "( new york OR ny )");
}
