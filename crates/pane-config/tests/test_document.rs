/*
 * test_document.rs
 * Copyright (c) 2025 Posit, PBC
 */

use pane_config::{
    ColonSeparated, ConfigError, LookupTable, Scope, SyntaxErrorKind, format_error,
    lookup_parser, parse, parse_document, unused_summary,
};
use pretty_assertions::assert_eq;

#[test]
fn test_duplicate_within_group() {
    match parse_document("key=\"a\";key=\"b\"") {
        Err(ConfigError::Duplicate { scope, second, .. }) => {
            assert_eq!(scope, Scope::Group);
            assert_eq!(second.value.as_str(), "b");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_duplicate_across_reentered_section() {
    let doc = parse_document("[x]key=a\n[y]\n[x]key=b\n").unwrap();
    let x = doc.root().subsection("x").unwrap();
    match x.get("key") {
        Err(ConfigError::Duplicate {
            first,
            second,
            scope,
        }) => {
            assert_eq!(scope, Scope::Section);
            assert_eq!(first.value.as_str(), "a");
            assert_eq!(second.value.as_str(), "b");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_group_break_allows_repeated_keys() {
    let doc = parse_document("a=1\n-\na=2\n").unwrap();
    let root = doc.tree();
    assert!(root.subsections().is_empty());
    assert_eq!(root.groups().len(), 2);
    assert!(root.groups().iter().all(|g| g.len() == 1 && g.get("a").is_some()));
    assert_eq!(root.count_keys("a"), 2);

    let values: Vec<u32> = doc
        .root()
        .groups()
        .map(|group| group.require_as::<u32>("a").unwrap())
        .collect();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn test_numeric_values() {
    let doc = parse_document("small = 256\ngarbage = 12x\nok = 12\n").unwrap();
    let root = doc.root();
    assert!(matches!(
        root.require_as::<u8>("small"),
        Err(ConfigError::ValueParse { .. })
    ));
    assert!(root.require_as::<i64>("garbage").is_err());
    assert!(root.require_as::<u32>("garbage").is_err());
    assert_eq!(root.require_as::<u8>("ok").unwrap(), 12);
}

#[test]
fn test_parse_marks_entry_used() {
    let doc = parse_document("a = 1\nb = 2\n").unwrap();
    let a = doc.root().require("a").unwrap();
    let _: u32 = parse(a).unwrap();
    assert!(doc.is_used(a.entry().id()));
    let unused: Vec<_> = doc.unused_keys().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(unused, vec!["b"]);
}

#[test]
fn test_unqueried_section_is_reported_once() {
    let doc = parse_document("[used]\nx = 1\n[skipped]\na = 1\nb = 2\n[skipped.inner]\nc = 3\n")
        .unwrap();
    let _: u32 = doc.root().subsection("used").unwrap().require_as("x").unwrap();

    assert!(doc.unused_keys().is_empty());
    let sections: Vec<_> = doc.unused_sections().iter().map(|s| s.name()).collect();
    assert_eq!(sections, vec!["skipped"]);
}

#[test]
fn test_queried_section_reports_its_keys() {
    let doc = parse_document("[s]\na = 1\nb = 2\n[s.inner]\nc = 3\n").unwrap();
    let s = doc.root().subsection("s").unwrap();
    let _ = s.require("a").unwrap().value();

    let keys: Vec<_> = doc.unused_keys().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["b"]);
    let sections: Vec<_> = doc.unused_sections().iter().map(|s| s.name()).collect();
    assert_eq!(sections, vec!["inner"]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Low,
    High,
}

static LEVELS: LookupTable<Level> =
    LookupTable::new(&[(&["low", "lo"], Level::Low), (&["high", "hi"], Level::High)]);
lookup_parser!(Level, "level", LEVELS);

#[test]
fn test_custom_lookup_parser() {
    let doc = parse_document("level = HI\nother = medium\n").unwrap();
    assert_eq!(doc.root().require_as::<Level>("level").unwrap(), Level::High);

    let err = doc.root().require_as::<Level>("other").unwrap_err();
    match &err {
        ConfigError::ValueParse {
            type_name, format, ..
        } => {
            assert_eq!(type_name, "level");
            assert_eq!(format, "one of low/lo, high/hi");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_composite_value_error_points_at_component() {
    let source = "ports = \"80:http:443\"\n";
    let doc = parse_document(source).unwrap();
    let err = doc
        .root()
        .require_as::<ColonSeparated<u16>>("ports")
        .unwrap_err();
    let text = format_error(&err, source, false);
    assert_eq!(
        text,
        "error[P-3-1]: invalid value for 'ports'\n\
         'http' is not a valid integer: expected a whole number between 0 and 65535\n\
         line 1 | ports = \"80:http:443\"\n                     ^^^^\n\
         ℹ in this value, expected list of integer: integer values separated by ':'\n\
         line 1 | ports = \"80:http:443\"\n                 ^^^^^^^^^^^^^\n"
    );
}

#[test]
fn test_missing_key_points_at_section() {
    let source = "[server]\nhost = example.org\n";
    let doc = parse_document(source).unwrap();
    let err = doc
        .root()
        .subsection("server")
        .unwrap()
        .require("port")
        .unwrap_err();
    assert_eq!(
        format_error(&err, source, false),
        "error[P-2-3]: missing key 'port'\n\
         this section requires a value for 'port'\n\
         line 1 | [server]\n          ^\n\
         ? add 'port = ...' here?\n"
    );
}

#[test]
fn test_syntax_errors_abort_parse() {
    for (text, kind) in [
        ("a = 'x\n", SyntaxErrorKind::MissingQuote),
        ("a = x\\", SyntaxErrorKind::IncompleteEscape),
        ("a = \"x\" y\n", SyntaxErrorKind::UnexpectedCharacter('y')),
        ("; a = 1\n", SyntaxErrorKind::UnexpectedSemicolon),
        ("[a.b\n", SyntaxErrorKind::UnterminatedSection),
        ("a\n", SyntaxErrorKind::MissingValue),
        ("= 1\n", SyntaxErrorKind::EmptyKey),
        ("[a.]\n", SyntaxErrorKind::EmptySectionName),
    ] {
        match parse_document(text) {
            Err(ConfigError::Syntax(err)) => assert_eq!(err.kind, kind, "{text:?}"),
            other => panic!("{text:?}: unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_unused_summary_for_clean_document() {
    let source = "# nothing here\n";
    let doc = parse_document(source).unwrap();
    assert_eq!(unused_summary(&doc, source, false), None);
}
