/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line-oriented document parser.
//!
//! ```text
//! # comment
//! key = value;            top-level entry (trailing ';' optional)
//! [server.tls]            select (creating if needed) a nested section
//! cert = "a;b"            quoted values keep control characters
//! -                       start a new group in the selected section
//! []                      return to the root section
//! ```
//!
//! Section paths always resolve from the root, and re-entering a section
//! with a later header starts a new group in it. The empty path `[]` is the
//! root too, whichever section was selected before it. Parsing stops at the
//! first error.

use crate::document::Document;
use crate::error::{ConfigResult, LexError, Phase, SyntaxError, SyntaxErrorKind};
use crate::reader::Reader;
use crate::tree::{Entry, NodeId, Section};
use pane_source_map::LocatedText;

const KEY_CONTROLS: &[char] = &['=', ';', '\n'];
const VALUE_CONTROLS: &[char] = &[';', '\n', '['];
const HEADER_CONTROLS: &[char] = &['.', ']', '\n'];

/// Parse a complete document.
pub fn parse_document(text: &str) -> ConfigResult<Document> {
    let root = Parser::new(text).parse()?;
    tracing::debug!(
        sections = root.subsections().len(),
        entries = root.entries().count(),
        "parsed document"
    );
    Ok(Document::new(root))
}

struct Parser<'a> {
    reader: Reader<'a>,
    root: Section,
    /// Path of subsection indices from the root to the selected section.
    selected: Vec<usize>,
    next_id: usize,
}

fn syntax(kind: SyntaxErrorKind, phase: Phase, offset: usize) -> SyntaxError {
    SyntaxError::new(kind, phase, offset)
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::new(text),
            root: Section::new(NodeId::new(0), "", 0),
            selected: Vec::new(),
            next_id: 1,
        }
    }

    fn parse(mut self) -> ConfigResult<Section> {
        loop {
            self.reader.skip_ignored();
            let Some(c) = self.reader.peek() else {
                break;
            };
            match c {
                '[' => self.parse_section_header()?,
                ';' => {
                    return Err(syntax(
                        SyntaxErrorKind::UnexpectedSemicolon,
                        Phase::Toplevel,
                        self.reader.offset(),
                    )
                    .into());
                }
                '-' if self.at_group_break() => {
                    let offset = self.reader.offset();
                    self.reader.skip(1);
                    self.selected_mut().open_group(offset);
                }
                _ => self.parse_entry()?,
            }
        }
        Ok(self.root)
    }

    /// A `-` starts a new group only when nothing but whitespace or a
    /// comment follows it on the line. Otherwise it begins a key.
    fn at_group_break(&self) -> bool {
        let after = self.reader.rest()[1..].trim_start_matches([' ', '\t', '\r']);
        after.is_empty() || after.starts_with('\n') || after.starts_with('#')
    }

    fn allocate_id(next_id: &mut usize) -> NodeId {
        let id = NodeId::new(*next_id);
        *next_id += 1;
        id
    }

    fn selected_mut(&mut self) -> &mut Section {
        let mut section = &mut self.root;
        for &index in &self.selected {
            section = section.subsection_at_mut(index);
        }
        section
    }

    fn parse_section_header(&mut self) -> ConfigResult<()> {
        let open = self.reader.offset();
        self.reader.skip(1);

        let mut segments: Vec<LocatedText> = Vec::new();
        loop {
            let segment = self
                .reader
                .read_until_one_of(HEADER_CONTROLS)
                .map_err(|err: LexError| err.in_phase(Phase::SectionHeader))?;
            match self.reader.peek() {
                Some('.') => {
                    self.reader.skip(1);
                    segments.push(segment);
                }
                Some(']') => {
                    self.reader.skip(1);
                    segments.push(segment);
                    break;
                }
                _ => {
                    return Err(syntax(
                        SyntaxErrorKind::UnterminatedSection,
                        Phase::SectionHeader,
                        self.reader.offset(),
                    )
                    .into());
                }
            }
        }

        // `[]` selects the root; a quoted `[""]` is an empty name.
        if let [only] = segments.as_slice() {
            if only.size == 0 {
                self.selected.clear();
                self.root.open_group(open);
                tracing::debug!(offset = open, "selected root section");
                return Ok(());
            }
        }

        if let Some(empty) = segments.iter().find(|segment| segment.is_empty()) {
            return Err(syntax(
                SyntaxErrorKind::EmptySectionName,
                Phase::SectionHeader,
                empty.offset,
            )
            .into());
        }

        let Self { root, next_id, .. } = self;
        let mut path = Vec::with_capacity(segments.len());
        let mut section = root;
        for segment in &segments {
            let index =
                section.subsection_index_or_insert(segment, || Self::allocate_id(next_id));
            path.push(index);
            section = section.subsection_at_mut(index);
        }
        section.open_group(open);
        self.selected = path;

        tracing::debug!(
            offset = open,
            depth = segments.len(),
            "selected section"
        );
        Ok(())
    }

    fn parse_entry(&mut self) -> ConfigResult<()> {
        let key = self
            .reader
            .read_until_one_of(KEY_CONTROLS)
            .map_err(|err| err.in_phase(Phase::Key))?;
        if self.reader.peek() != Some('=') {
            return Err(syntax(SyntaxErrorKind::MissingValue, Phase::Key, self.reader.offset()).into());
        }
        if key.is_empty() {
            return Err(syntax(SyntaxErrorKind::EmptyKey, Phase::Key, key.offset).into());
        }
        self.reader.skip(1);

        let value = self
            .reader
            .read_until_one_of(VALUE_CONTROLS)
            .map_err(|err| err.in_phase(Phase::Value))?;
        self.reader.skip_whitespace_within_line();
        if self.reader.peek() == Some(';') {
            self.reader.skip(1);
        }

        let id = Self::allocate_id(&mut self.next_id);
        self.selected_mut()
            .current_group_mut()
            .push(Entry::new(id, key, value))
    }
}
