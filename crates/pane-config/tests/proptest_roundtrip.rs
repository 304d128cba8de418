/*
 * proptest_roundtrip.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Property-based tests for document serialization.
 *
 * A random document is generated as text, parsed, written back with
 * write_document, and parsed again. Both trees must have the same
 * structure: section nesting, group boundaries, keys and decoded values.
 */

use pane_config::{parse_document, write_document};
use proptest::prelude::*;
use std::collections::BTreeMap;

type Group = BTreeMap<String, String>;

fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn value() -> impl Strategy<Value = String> {
    "(\\PC|\n){0,12}"
}

fn group() -> impl Strategy<Value = Group> {
    prop::collection::btree_map(key(), value(), 0..4)
}

fn section() -> impl Strategy<Value = (Vec<String>, Vec<Group>)> {
    (
        prop::collection::vec("[a-z]{1,4}", 1..3),
        prop::collection::vec(group(), 1..3),
    )
}

fn write_groups(out: &mut String, groups: &[Group]) {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push_str("-\n");
        }
        for (key, value) in group {
            out.push_str(&format!("{} = {}\n", key, quote(value)));
        }
    }
}

fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(group(), 1..3),
        prop::collection::vec(section(), 0..4),
    )
        .prop_map(|(root, sections)| {
            let mut out = String::new();
            write_groups(&mut out, &root);
            for (path, groups) in sections {
                out.push_str(&format!("[{}]\n", path.join(".")));
                write_groups(&mut out, &groups);
            }
            out
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn written_document_parses_to_same_structure(text in document()) {
        let doc = parse_document(&text).unwrap();
        let written = write_document(doc.tree());
        let reparsed = parse_document(&written);
        prop_assert!(reparsed.is_ok(), "failed to reparse:\n{}", written);
        let reparsed = reparsed.unwrap();
        prop_assert!(
            doc.tree().same_structure(reparsed.tree()),
            "structure changed\n--- input ---\n{}\n--- written ---\n{}",
            text,
            written
        );
    }

    #[test]
    fn writing_is_idempotent(text in document()) {
        let once = write_document(parse_document(&text).unwrap().tree());
        let twice = write_document(parse_document(&once).unwrap().tree());
        prop_assert_eq!(once, twice);
    }
}
