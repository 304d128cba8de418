/*
 * diagnostic.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostics: what went wrong, where, and how to fix it.
//!
//! A [`DiagnosticMessage`] has a one-line title, an optional problem
//! statement, bullet details that may point into the source, and hints.

use crate::snippet::{RenderOptions, paint, render_snippet};
use ariadne::Color;
use pane_source_map::{Span, snap_span};
use serde::{Deserialize, Serialize};

/// Severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Error,
    /// Advisory only; the document is still usable.
    Warning,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
        }
    }

    fn color(&self) -> Color {
        match self {
            DiagnosticKind::Error => Color::Red,
            DiagnosticKind::Warning => Color::Yellow,
        }
    }
}

/// Bullet style of a detail line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// `✖`, drawn in the error color.
    Error,
    /// `ℹ`, used for a previous or enclosing occurrence.
    Info,
    /// `•`
    Note,
}

impl DetailKind {
    fn bullet(&self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }

    fn color(&self) -> Color {
        match self {
            DetailKind::Error => Color::Red,
            DetailKind::Info => Color::Cyan,
            DetailKind::Note => Color::Blue,
        }
    }
}

/// One bullet line under the problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
    /// A located detail gets its own snippet, so one message can point at
    /// several places.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

/// An error or warning ready to be rendered as text, JSON or a labelled
/// report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Catalog code such as `P-1-6`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    pub kind: DiagnosticKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    pub details: Vec<DetailItem>,

    /// Suggestions, conventionally phrased as questions.
    pub hints: Vec<String>,

    /// Where the main snippet points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

impl DiagnosticMessage {
    /// A bare message; [`crate::DiagnosticMessageBuilder`] fills in the rest.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Set the error code.
    ///
    /// Error codes follow the format `P-<subsystem>-<number>` (e.g., "P-1-6").
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Render this diagnostic as plain text, with snippets when `source` is given.
    ///
    /// # Example
    ///
    /// ```
    /// use pane_error_reporting::DiagnosticMessageBuilder;
    ///
    /// let text = DiagnosticMessageBuilder::error("invalid value for 'width'")
    ///     .problem("expected integer")
    ///     .add_hint("use a whole number?")
    ///     .build()
    ///     .to_text(None);
    /// assert!(text.starts_with("error: invalid value for 'width'\n"));
    /// assert!(text.ends_with("? use a whole number?\n"));
    /// ```
    pub fn to_text(&self, source: Option<&str>) -> String {
        self.render(source, &RenderOptions::default())
    }

    /// Render this diagnostic following tidyverse style.
    ///
    /// Format:
    /// ```text
    /// error[P-2-1]: multiple definitions of 'key'
    /// problem statement
    /// line 2 | key = b
    ///          ^^^
    /// ℹ first defined here
    /// line 1 | key = a
    ///          ^^^
    /// ? hint
    /// ```
    ///
    /// Snippets are only produced when both `source` and a location are present.
    pub fn render(&self, source: Option<&str>, options: &RenderOptions) -> String {
        let mut result = String::new();

        let label = match &self.code {
            Some(code) => format!("{}[{}]", self.kind.as_str(), code),
            None => self.kind.as_str().to_string(),
        };
        result.push_str(&format!(
            "{}: {}\n",
            paint(&label, self.kind.color(), options.colorize),
            self.title
        ));

        if let Some(problem) = &self.problem {
            result.push_str(problem);
            result.push('\n');
        }

        if let (Some(source), Some(location)) = (source, self.location) {
            result.push_str(&render_snippet(
                source,
                location,
                self.kind.color(),
                options,
            ));
        }

        for detail in &self.details {
            result.push_str(&format!(
                "{} {}\n",
                paint(detail.kind.bullet(), detail.kind.color(), options.colorize),
                detail.content
            ));
            if let (Some(source), Some(location)) = (source, detail.location) {
                result.push_str(&render_snippet(
                    source,
                    location,
                    detail.kind.color(),
                    options,
                ));
            }
        }

        for hint in &self.hints {
            result.push_str(&format!("? {}\n", hint));
        }

        result
    }

    /// Machine-readable form; absent fields are omitted.
    ///
    /// # Example
    ///
    /// ```
    /// use pane_error_reporting::DiagnosticMessage;
    ///
    /// let json = DiagnosticMessage::warning("unused key 'x'").with_code("P-5-1").to_json();
    /// assert_eq!(json["kind"], "warning");
    /// assert_eq!(json["code"], "P-5-1");
    /// assert!(json.get("hints").is_none());
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut obj = json!({
            "kind": self.kind.as_str(),
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
        }

        if let Some(problem) = &self.problem {
            obj["problem"] = json!(problem);
        }

        if !self.details.is_empty() {
            obj["details"] = json!(self.details);
        }

        if !self.hints.is_empty() {
            obj["hints"] = json!(self.hints);
        }

        if let Some(location) = &self.location {
            obj["location"] = json!(location);
        }

        obj
    }

    /// Render this diagnostic with ariadne, labelling every located detail.
    ///
    /// Returns `None` when the diagnostic has no location to anchor the report.
    pub fn to_report(&self, path: &str, source: &str) -> Option<String> {
        use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

        let location = self
            .location
            .or_else(|| self.details.iter().find_map(|d| d.location))?;
        let clamp = |span: Span| snap_span(source, span).range();

        let report_kind = match self.kind {
            DiagnosticKind::Error => ReportKind::Error,
            DiagnosticKind::Warning => ReportKind::Warning,
        };

        let path = path.to_string();
        // Spans are byte offsets; ariadne counts characters unless told otherwise
        let mut report = Report::build(report_kind, path.clone(), location.offset)
            .with_config(Config::default().with_index_type(IndexType::Byte));

        if let Some(code) = &self.code {
            report = report.with_message(format!("[{}] {}", code, self.title));
        } else {
            report = report.with_message(&self.title);
        }

        if let Some(main) = self.location {
            let message = self.problem.as_deref().unwrap_or(&self.title);
            report = report.with_label(
                Label::new((path.clone(), clamp(main)))
                    .with_message(message)
                    .with_color(self.kind.color()),
            );
        }

        for detail in &self.details {
            if let Some(detail_location) = detail.location {
                report = report.with_label(
                    Label::new((path.clone(), clamp(detail_location)))
                        .with_message(&detail.content)
                        .with_color(detail.kind.color()),
                );
            }
        }

        if let Some(hint) = self.hints.first() {
            report = report.with_help(hint);
        }

        let mut output = Vec::new();
        report
            .finish()
            .write((path, Source::from(source)), &mut output)
            .ok()?;

        String::from_utf8(output).ok()
    }
}
