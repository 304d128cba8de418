/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse structure: a title, one problem
//! statement, details (optionally anchored to a source span) and hints.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use pane_source_map::Span;

/// Builder for [`DiagnosticMessage`].
///
/// # Example
///
/// ```
/// use pane_error_reporting::DiagnosticMessageBuilder;
/// use pane_source_map::Span;
///
/// let msg = DiagnosticMessageBuilder::error("multiple definitions of 'gap'")
///     .with_code("P-2-1")
///     .with_location(Span::new(10, 3))
///     .add_info_at("first defined here", Span::new(0, 3))
///     .add_hint("start a new group with '-' to repeat keys")
///     .build();
///
/// assert_eq!(msg.details.len(), 1);
/// assert_eq!(msg.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(DiagnosticKind::Error, title),
        }
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(DiagnosticKind::Warning, title),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// Set the problem statement (what went wrong).
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    /// Set the primary location, highlighted as the offending occurrence.
    pub fn with_location(mut self, location: Span) -> Self {
        self.message.location = Some(location);
        self
    }

    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, content, None)
    }

    pub fn add_detail_at(self, content: impl Into<String>, location: Span) -> Self {
        self.push_detail(DetailKind::Error, content, Some(location))
    }

    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, content, None)
    }

    /// Add a detail pointing at a related (previous or surrounding) location.
    pub fn add_info_at(self, content: impl Into<String>, location: Span) -> Self {
        self.push_detail(DetailKind::Info, content, Some(location))
    }

    pub fn add_note(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Note, content, None)
    }

    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }

    fn push_detail(
        mut self,
        kind: DetailKind,
        content: impl Into<String>,
        location: Option<Span>,
    ) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content: content.into(),
            location,
        });
        self
    }
}
