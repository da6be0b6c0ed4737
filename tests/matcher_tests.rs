// Mon Oct 19 2026 - Alex

use hypermatcher::{MatcherError, PatternMatcher};
use std::collections::HashSet;

fn as_set(items: Vec<String>) -> HashSet<String> {
    items.into_iter().collect()
}

#[test]
fn test_literal_substring_matches_each_pattern() {
    let patterns: Vec<String> = (0..50).map(|i| format!("token{:03}x", i)).collect();
    let matcher = PatternMatcher::new();
    matcher.load(&patterns).unwrap();

    for (i, pattern) in patterns.iter().enumerate() {
        let corpus = [format!("prefix {} suffix", pattern), "unrelated".to_string()];
        let found = matcher.scan(&corpus).unwrap();
        assert!(found.contains(pattern), "pattern {} not found in {:?}", i, found);
    }
}

#[test]
fn test_scan_before_load_has_no_side_effects() {
    let matcher = PatternMatcher::new();
    for _ in 0..3 {
        assert_eq!(matcher.scan(&["anything"]).unwrap_err(), MatcherError::NotLoaded);
    }
    assert_eq!(matcher.generation(), 0);

    matcher.load(&["anything"]).unwrap();
    assert_eq!(matcher.scan(&["anything"]).unwrap(), vec!["anything".to_string()]);
}

#[test]
fn test_empty_load_is_rejected_and_keeps_generation() {
    let matcher = PatternMatcher::new();
    let empty: [&str; 0] = [];
    assert_eq!(matcher.load(&empty).unwrap_err(), MatcherError::NoPatterns);
    assert_eq!(matcher.scan(&["foo"]).unwrap_err(), MatcherError::NotLoaded);

    matcher.load(&["foo", "bar"]).unwrap();
    assert_eq!(matcher.load(&empty).unwrap_err(), MatcherError::NoPatterns);
    assert_eq!(matcher.scan(&["foo bar"]).unwrap(), vec!["foo".to_string(), "bar".to_string()]);
    assert_eq!(matcher.generation(), 1);
}

#[test]
fn test_invalid_pattern_installs_nothing() {
    let matcher = PatternMatcher::new();
    let bad = ["alpha", "beta", "gam(ma", "delta"];

    match matcher.load(&bad) {
        Err(MatcherError::PatternSyntax { index, text, message }) => {
            assert_eq!(index, 2);
            assert_eq!(text, "gam(ma");
            assert!(!message.is_empty());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
    assert_eq!(matcher.scan(&["alpha"]).unwrap_err(), MatcherError::NotLoaded);

    matcher.load(&["old"]).unwrap();
    assert!(matcher.load(&bad).is_err());
    assert_eq!(matcher.scan(&["old alpha"]).unwrap(), vec!["old".to_string()]);
}

#[test]
fn test_duplicates_reported_once() {
    let matcher = PatternMatcher::new();
    matcher.load(&["ab"]).unwrap();

    let result = matcher.scan_result(&["ab ab ab", "abab", "xab"]).unwrap();
    assert_eq!(result.expressions(), ["ab".to_string()]);
    assert_eq!(result.occurrences(), 6);
}

#[test]
fn test_reference_examples() {
    let matcher = PatternMatcher::new();
    matcher.load(&["foo", "bar"]).unwrap();

    assert_eq!(matcher.scan(&["a foo string", "nothing"]).unwrap(), vec!["foo".to_string()]);
    assert_eq!(
        as_set(matcher.scan(&["foo and bar", "barbar"]).unwrap()),
        as_set(vec!["foo".to_string(), "bar".to_string()])
    );

    let empty: Vec<&str> = Vec::new();
    assert_eq!(matcher.load(&empty).unwrap_err(), MatcherError::NoPatterns);
}

#[test]
fn test_reload_assigns_fresh_ids() {
    let matcher = PatternMatcher::new();
    matcher.load(&["shared", "first"]).unwrap();
    assert_eq!(matcher.scan_result(&["shared"]).unwrap().ids(), [0]);

    matcher.load(&["second", "shared"]).unwrap();
    let result = matcher.scan_result(&["shared"]).unwrap();
    assert_eq!(result.ids(), [1]);
    assert_eq!(result.expressions(), ["shared".to_string()]);
}

#[test]
fn test_empty_corpus_is_empty_result() {
    let matcher = PatternMatcher::new();
    matcher.load(&["x"]).unwrap();
    let corpus: Vec<String> = Vec::new();
    assert!(matcher.scan(&corpus).unwrap().is_empty());
    assert!(matcher.scan(&["", ""]).unwrap().is_empty());
}

#[test]
fn test_regex_features() {
    let matcher = PatternMatcher::new();
    matcher
        .load(&[r"\d{3}-\d{4}", "/^begin/m", "/ünïcode/8", "/hello.world/s"])
        .unwrap();

    let found = as_set(matcher.scan(&["call 555-1234", "x\nbegin here", "ÜNÏCODE ünïcode", "hello\nworld"]).unwrap());
    let expected = as_set(
        [r"\d{3}-\d{4}", "^begin", "ünïcode", "hello.world"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    assert_eq!(found, expected);
}

#[test]
fn test_corpus_elements_form_one_stream() {
    let matcher = PatternMatcher::new();
    matcher.load(&["foobar"]).unwrap();
    assert_eq!(matcher.scan(&["foo", "bar"]).unwrap(), vec!["foobar".to_string()]);
    assert_eq!(matcher.scan(&["xfo", "", "obarx"]).unwrap(), vec!["foobar".to_string()]);
    assert!(matcher.scan(&["foo", " bar"]).unwrap().is_empty());
}

#[test]
fn test_anchors_bind_to_whole_corpus() {
    let matcher = PatternMatcher::new();
    matcher.load(&["^foo", "bar$"]).unwrap();
    assert!(matcher.scan(&["xx", "foo"]).unwrap().is_empty());
    assert!(matcher.scan(&["bar", "xx"]).unwrap().is_empty());
    assert_eq!(
        matcher.scan(&["foo", "xx", "bar"]).unwrap(),
        vec!["^foo".to_string(), "bar$".to_string()]
    );
}

#[test]
fn test_numbered_patterns_use_position_ids() {
    let matcher = PatternMatcher::new();
    matcher.load(&["7:/alpha/i", "3:/beta/"]).unwrap();
    let result = matcher.scan_result(&["ALPHA beta"]).unwrap();
    assert_eq!(result.ids(), [0, 1]);
    assert_eq!(result.expressions(), ["alpha".to_string(), "beta".to_string()]);
}
