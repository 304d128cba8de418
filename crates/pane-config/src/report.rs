/*
 * report.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Human-readable rendering of errors and unused-setting warnings.

use crate::document::Document;
use crate::error::ConfigError;
use pane_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, RenderOptions};
use pane_source_map::Span;

/// Render `error` against the text it came from.
///
/// The first line names the error, followed by the offending source line
/// with the problem underlined and, where relevant, further located notes
/// and a hint.
pub fn format_error(error: &ConfigError, source: &str, colorize: bool) -> String {
    error
        .to_diagnostic(source)
        .render(Some(source), &RenderOptions::colored(colorize))
}

/// Warning listing every entry and section the application never read.
pub fn unused_diagnostic(document: &Document) -> Option<DiagnosticMessage> {
    let keys = document.unused_keys();
    let sections = document.unused_sections();
    if keys.is_empty() && sections.is_empty() {
        return None;
    }

    let mut items: Vec<(Span, String)> = keys
        .iter()
        .map(|entry| (entry.key.span(), format!("key '{}' is never used", entry.key)))
        .chain(sections.iter().map(|section| {
            (
                section.name_span(),
                format!("section '{}' is never used", section.name()),
            )
        }))
        .collect();
    items.sort_by_key(|(span, _)| span.offset);

    let mut counts = Vec::new();
    if !keys.is_empty() {
        counts.push(count_of(keys.len(), "key"));
    }
    if !sections.is_empty() {
        counts.push(count_of(sections.len(), "section"));
    }

    let (problem, hint) = if items.len() == 1 {
        (
            "this setting has no effect",
            "remove it, or check its spelling?",
        )
    } else {
        (
            "these settings have no effect",
            "remove them, or check their spelling?",
        )
    };

    let builder = DiagnosticMessageBuilder::warning(counts.join(" and "))
        .with_code("P-5-1")
        .problem(problem);
    let builder = items
        .into_iter()
        .fold(builder, |builder, (span, label)| builder.add_info_at(label, span));
    Some(builder.add_hint(hint).build())
}

/// Render the unused-settings warning, or `None` when everything was read.
pub fn unused_summary(document: &Document, source: &str, colorize: bool) -> Option<String> {
    unused_diagnostic(document)
        .map(|diagnostic| diagnostic.render(Some(source), &RenderOptions::colored(colorize)))
}

fn count_of(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 unused {}", noun)
    } else {
        format!("{} unused {}s", count, noun)
    }
}
