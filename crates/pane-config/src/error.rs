/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for document parsing, lookups and value conversion.
//!
//! Every failure the engine can produce is a [`ConfigError`]. Each variant
//! carries enough location information to be rendered against the source
//! text by [`ConfigError::to_diagnostic`].

use crate::tree::Entry;
use pane_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use pane_source_map::{LocatedText, Span, snap_span};
use std::fmt;
use thiserror::Error;

/// Result type alias for pane-config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// What the parser was reading when a syntax error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Toplevel,
    SectionHeader,
    Key,
    Value,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Toplevel => "the document",
            Phase::SectionHeader => "a section header",
            Phase::Key => "a key",
            Phase::Value => "a value",
        })
    }
}

/// The closed set of syntax problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("missing closing quote")]
    MissingQuote,
    #[error("backslash at the end of the input")]
    IncompleteEscape,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unexpected ';'")]
    UnexpectedSemicolon,
    #[error("missing ']' at the end of the section header")]
    UnterminatedSection,
    #[error("missing value")]
    MissingValue,
    #[error("empty key")]
    EmptyKey,
    #[error("empty section name")]
    EmptySectionName,
}

impl SyntaxErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            SyntaxErrorKind::MissingQuote => "P-1-1",
            SyntaxErrorKind::IncompleteEscape => "P-1-2",
            SyntaxErrorKind::UnexpectedCharacter(_) => "P-1-3",
            SyntaxErrorKind::UnexpectedSemicolon => "P-1-4",
            SyntaxErrorKind::UnterminatedSection => "P-1-5",
            SyntaxErrorKind::MissingValue => "P-1-6",
            SyntaxErrorKind::EmptyKey => "P-1-7",
            SyntaxErrorKind::EmptySectionName => "P-1-8",
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            SyntaxErrorKind::MissingQuote => Some("close the quote before the end of the line?"),
            SyntaxErrorKind::IncompleteEscape => {
                Some("use '\\\\' for a literal backslash at the end of the input?")
            }
            SyntaxErrorKind::UnexpectedCharacter(_) => {
                Some("put the whole value inside the quotes?")
            }
            SyntaxErrorKind::UnexpectedSemicolon => Some("remove the extra ';'?"),
            SyntaxErrorKind::UnterminatedSection => None,
            SyntaxErrorKind::MissingValue => Some("values are introduced using '='"),
            SyntaxErrorKind::EmptyKey => Some("write the key name before '='?"),
            SyntaxErrorKind::EmptySectionName => {
                Some("use '[]' alone to return to the top level")
            }
        }
    }
}

/// Error produced by the lexical reader.
///
/// The reader does not know what grammar element it is reading; the parser
/// attaches a [`Phase`] with [`LexError::in_phase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
}

impl LexError {
    pub fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn in_phase(self, phase: Phase) -> SyntaxError {
        SyntaxError::new(self.kind, phase, self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("syntax error while parsing {phase}: {kind}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub phase: Phase,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(kind: SyntaxErrorKind, phase: Phase, offset: usize) -> Self {
        Self {
            kind,
            phase,
            offset,
        }
    }
}

/// An error located inside a text fragment.
///
/// `offset` is relative to the start of the text that was being parsed, which
/// is usually the decoded content of a value. Value parsers return these to
/// point at the failing part of a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RangeError {
    pub offset: usize,
    pub size: usize,
    pub message: String,
    pub code: Option<&'static str>,
    pub hint: Option<&'static str>,
}

impl RangeError {
    pub fn new(offset: usize, size: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            size,
            message: message.into(),
            code: None,
            hint: None,
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Move the error right by `delta` bytes, for composite parsers that
    /// delegate to a component parser.
    pub fn shifted(mut self, delta: usize) -> Self {
        self.offset += delta;
        self
    }
}

/// Whether a duplicate or missing key was detected within one group or
/// across the groups of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Group,
    Section,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Group => "group",
            Scope::Section => "section",
        })
    }
}

/// Errors that can occur while parsing or querying a configuration document.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("missing key '{key}' in {scope}")]
    MissingKey {
        key: String,
        /// Offset of the enclosing group or section.
        offset: usize,
        scope: Scope,
    },

    #[error("invalid value for '{}': expected {type_name} ({format})", .entry.key)]
    ValueParse {
        entry: Box<Entry>,
        type_name: String,
        format: String,
        /// Part of the value that was rejected, relative to its decoded content.
        range: Option<RangeError>,
    },

    #[error("multiple definitions of '{}' within one {scope}", .first.key)]
    Duplicate {
        first: Box<Entry>,
        second: Box<Entry>,
        scope: Scope,
    },

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ConfigError {
    /// The catalog code of this error, if it has one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ConfigError::Syntax(err) => Some(err.kind.code()),
            ConfigError::MissingKey { .. } => Some("P-2-3"),
            ConfigError::ValueParse { .. } => Some("P-3-1"),
            ConfigError::Duplicate { scope, .. } => Some(match scope {
                Scope::Group => "P-2-1",
                Scope::Section => "P-2-2",
            }),
            ConfigError::Range(err) => err.code,
        }
    }

    /// Convert this error to a DiagnosticMessage located in `source`.
    ///
    /// `source` must be the text the document (or the standalone expression
    /// for [`ConfigError::Range`]) was parsed from.
    pub fn to_diagnostic(&self, source: &str) -> DiagnosticMessage {
        match self {
            ConfigError::Syntax(err) => {
                let mut builder = DiagnosticMessageBuilder::error(format!(
                    "syntax error while parsing {}",
                    err.phase
                ))
                .with_code(err.kind.code())
                .problem(err.kind.to_string())
                .with_location(Span::new(err.offset, 1));
                if let Some(hint) = err.kind.hint() {
                    builder = builder.add_hint(hint);
                }
                builder.build()
            }

            ConfigError::MissingKey { key, offset, scope } => {
                DiagnosticMessageBuilder::error(format!("missing key '{}'", key))
                    .with_code("P-2-3")
                    .problem(format!("this {} requires a value for '{}'", scope, key))
                    .with_location(Span::new(*offset, 1))
                    .add_hint(format!("add '{} = ...' here?", key))
                    .build()
            }

            ConfigError::ValueParse {
                entry,
                type_name,
                format,
                range,
            } => {
                let value_span = entry.value.span();
                let builder =
                    DiagnosticMessageBuilder::error(format!("invalid value for '{}'", entry.key))
                        .with_code("P-3-1");
                match range {
                    Some(range) => {
                        let mut builder = builder
                            .problem(range.message.clone())
                            .with_location(nested_span(source, &entry.value, range))
                            .add_info_at(
                                format!("in this value, expected {}: {}", type_name, format),
                                value_span,
                            );
                        if let Some(hint) = range.hint {
                            builder = builder.add_hint(hint);
                        }
                        builder.build()
                    }
                    None => builder
                        .problem(format!("expected {}: {}", type_name, format))
                        .with_location(value_span)
                        .build(),
                }
            }

            ConfigError::Duplicate {
                first,
                second,
                scope,
            } => {
                let code = match scope {
                    Scope::Group => "P-2-1",
                    Scope::Section => "P-2-2",
                };
                let builder = DiagnosticMessageBuilder::error(format!(
                    "multiple definitions of '{}'",
                    second.key
                ))
                .with_code(code)
                .with_location(second.key.span())
                .add_info_at("first defined here", first.key.span());
                match scope {
                    Scope::Group => builder
                        .problem("a key can only be defined once in each group")
                        .add_hint("start a new group with '-' to repeat keys")
                        .build(),
                    Scope::Section => builder
                        .problem("this key can only be defined once in the section")
                        .add_hint("remove one of the definitions?")
                        .build(),
                }
            }

            ConfigError::Range(err) => {
                let mut builder = DiagnosticMessageBuilder::error(err.message.clone())
                    .with_location(Span::new(err.offset, err.size));
                if let Some(code) = err.code {
                    builder = builder.with_code(code);
                }
                if let Some(hint) = err.hint {
                    builder = builder.add_hint(hint);
                }
                builder.build()
            }
        }
    }
}

/// Map an error located in the decoded content of `value` back onto the
/// source text.
///
/// Offsets line up with the source only for unescaped text, so the result is
/// clamped to the value's own span. Quoted values start one byte later.
fn nested_span(source: &str, value: &LocatedText, range: &RangeError) -> Span {
    let quoted = matches!(source.as_bytes().get(value.offset), Some(b'"' | b'\''));
    let span = value.span();
    let inner = if quoted && span.size >= 2 {
        Span::new(span.offset + 1, span.size - 2)
    } else {
        span
    };
    let located = match source.get(inner.range()) {
        Some(raw) => {
            let start = source_offset(raw, range.offset);
            let end = source_offset(raw, range.offset + range.size.max(1));
            Span::new(inner.offset + start, end - start)
        }
        None => inner.sub_span(range.offset, range.size.max(1)),
    };
    snap_span(source, located)
}

/// Byte offset in the raw text `raw` of byte `decoded` of its decoded form.
///
/// An escape `\X` decodes to a character of the same length as `X`, so only
/// the backslashes need to be skipped. Offsets past the end map to the end.
fn source_offset(raw: &str, decoded: usize) -> usize {
    let mut seen = 0;
    let mut chars = raw.char_indices();
    while let Some((index, c)) = chars.next() {
        if seen >= decoded {
            return index;
        }
        let c = if c == '\\' {
            match chars.next() {
                Some((_, escaped)) => escaped,
                None => return raw.len(),
            }
        } else {
            c
        };
        seen += c.len_utf8();
    }
    raw.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Entry, NodeId};
    use pretty_assertions::assert_eq;

    fn entry(key: &str, key_offset: usize, value: &str, value_offset: usize) -> Entry {
        Entry::new(
            NodeId::new(1),
            LocatedText::verbatim(key, key_offset),
            LocatedText::verbatim(value, value_offset),
        )
    }

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(SyntaxErrorKind::MissingValue, Phase::Key, 3);
        assert_eq!(
            err.to_string(),
            "syntax error while parsing a key: missing value"
        );
    }

    #[test]
    fn test_codes() {
        let err: ConfigError =
            SyntaxError::new(SyntaxErrorKind::EmptyKey, Phase::Key, 0).into();
        assert_eq!(err.code(), Some("P-1-7"));

        let dup = ConfigError::Duplicate {
            first: Box::new(entry("a", 0, "1", 4)),
            second: Box::new(entry("a", 6, "2", 10)),
            scope: Scope::Section,
        };
        assert_eq!(dup.code(), Some("P-2-2"));

        let range: ConfigError = RangeError::new(0, 1, "bad").into();
        assert_eq!(range.code(), None);
    }

    #[test]
    fn test_every_code_is_in_the_catalog() {
        let kinds = [
            SyntaxErrorKind::MissingQuote,
            SyntaxErrorKind::IncompleteEscape,
            SyntaxErrorKind::UnexpectedCharacter('x'),
            SyntaxErrorKind::UnexpectedSemicolon,
            SyntaxErrorKind::UnterminatedSection,
            SyntaxErrorKind::MissingValue,
            SyntaxErrorKind::EmptyKey,
            SyntaxErrorKind::EmptySectionName,
        ];
        for kind in kinds {
            assert!(
                pane_error_reporting::get_error_info(kind.code()).is_some(),
                "{} is not in the catalog",
                kind.code()
            );
        }
    }

    #[test]
    fn test_missing_value_hint() {
        let source = "key\n";
        let err: ConfigError = SyntaxError::new(SyntaxErrorKind::MissingValue, Phase::Key, 3).into();
        let diagnostic = err.to_diagnostic(source);
        assert_eq!(diagnostic.title, "syntax error while parsing a key");
        assert_eq!(diagnostic.hints, vec!["values are introduced using '='"]);
        assert_eq!(diagnostic.location, Some(Span::new(3, 1)));
    }

    #[test]
    fn test_duplicate_in_group_diagnostic() {
        let source = "a = 1\na = 2\n";
        let err = ConfigError::Duplicate {
            first: Box::new(entry("a", 0, "1", 4)),
            second: Box::new(entry("a", 6, "2", 10)),
            scope: Scope::Group,
        };
        let diagnostic = err.to_diagnostic(source);
        assert_eq!(diagnostic.code.as_deref(), Some("P-2-1"));
        assert_eq!(diagnostic.location, Some(Span::new(6, 1)));
        assert_eq!(diagnostic.details[0].location, Some(Span::new(0, 1)));
        assert!(diagnostic.hints[0].contains("'-'"));
    }

    #[test]
    fn test_nested_span_in_quoted_value() {
        let source = "path = \"a:b:x\"\n";
        let value = LocatedText::new("a:b:x", 7, 7);
        let range = RangeError::new(4, 1, "not a number");
        assert_eq!(nested_span(source, &value, &range), Span::new(12, 1));
    }

    #[test]
    fn test_nested_span_is_clamped() {
        let source = "n = 12\n";
        let value = LocatedText::verbatim("12", 4);
        let range = RangeError::new(10, 3, "out of range");
        assert_eq!(nested_span(source, &value, &range), Span::new(6, 0));
    }

    #[test]
    fn test_nested_span_skips_escapes() {
        // decoded "aé&x": '&' is decoded byte 3 and source byte 11
        let source = "when = \\aé&x\n";
        let value = LocatedText::new("aé&x", 7, 6);
        let range = RangeError::new(3, 1, "invalid operator");
        assert_eq!(nested_span(source, &value, &range), Span::new(11, 1));

        let source = "path = \"\\\"é\\:b:\\x\"\n";
        let value = LocatedText::new("\"é:b:x", 7, 12);
        let range = RangeError::new(6, 1, "not a number");
        assert_eq!(&source[nested_span(source, &value, &range).range()], "\\x");
    }
}
