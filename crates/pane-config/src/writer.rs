/*
 * writer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Serialize a configuration tree back to document text.
//!
//! The output parses back to a tree with the same structure (see
//! [`Section::same_structure`]). Comments and original formatting are not
//! preserved. Text is quoted only when it would otherwise be read
//! differently.

use crate::tree::Section;

/// Write `root` and all of its subsections as document text.
pub fn write_document(root: &Section) -> String {
    let mut out = String::new();
    write_groups(&mut out, root);
    let mut path = Vec::new();
    for section in root.subsections() {
        write_section(&mut out, section, &mut path);
    }
    out
}

fn write_section<'a>(out: &mut String, section: &'a Section, path: &mut Vec<&'a str>) {
    path.push(section.name());
    let header: Vec<String> = path
        .iter()
        .map(|segment| quote_if_needed(segment, &['.', '[', ']', '#', ';', '=']))
        .collect();
    out.push('[');
    out.push_str(&header.join("."));
    out.push_str("]\n");

    write_groups(out, section);
    for subsection in section.subsections() {
        write_section(out, subsection, path);
    }
    path.pop();
}

fn write_groups(out: &mut String, section: &Section) {
    for (index, group) in section.groups().iter().enumerate() {
        if index > 0 {
            out.push_str("-\n");
        }
        for entry in group.entries() {
            out.push_str(&quote_if_needed(entry.key.as_str(), &['=', ';', '#', '[']));
            out.push_str(" = ");
            out.push_str(&quote_if_needed(entry.value.as_str(), &[';', '[']));
            out.push('\n');
        }
    }
}

fn quote_if_needed(text: &str, specials: &[char]) -> String {
    let needs_quotes = text.is_empty()
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.starts_with(['"', '\''])
        || text.contains(|c: char| c == '\\' || c == '\n' || specials.contains(&c));

    if !needs_quotes {
        return text.to_string();
    }

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
