/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Sectioned configuration documents with source-located values.
//!
//! A document is a sequence of `key = value` entries organised into nested
//! sections (`[server.tls]`) and, within a section, into groups separated by
//! `-` lines. Every key and value remembers where it came from, so problems
//! found long after parsing (a value of the wrong type, a missing key, a key
//! nobody read) can be reported against the original text.
//!
//! # Example
//!
//! ```rust
//! use pane_config::{format_error, parse_document, unused_summary};
//!
//! let source = "[window]\nwidth = 80\nheigth = 24\n";
//! let doc = parse_document(source).unwrap();
//!
//! let window = doc.root().subsection("window").unwrap();
//! assert_eq!(window.require_as::<u16>("width").unwrap(), 80);
//!
//! let err = window.require_as::<u16>("height").unwrap_err();
//! assert!(format_error(&err, source, false).starts_with("error[P-2-3]: missing key 'height'"));
//!
//! let warning = unused_summary(&doc, source, false).unwrap();
//! assert!(warning.contains("key 'heigth' is never used"));
//! ```
//!
//! # Usage tracking
//!
//! The tree itself is immutable. Reading through [`Document::root`] and the
//! [`SectionRef`] / [`EntryRef`] views records which entries and sections
//! were consulted; [`Document::unused_keys`] and
//! [`Document::unused_sections`] report the rest.

pub mod document;
pub mod error;
pub mod parser;
pub mod reader;
pub mod report;
pub mod tree;
pub mod value;
pub mod writer;

pub use document::{Document, EntryRef, GroupRef, SectionRef};
pub use error::{
    ConfigError, ConfigResult, LexError, Phase, RangeError, Scope, SyntaxError, SyntaxErrorKind,
};
pub use pane_source_map::LocatedText;
pub use parser::parse_document;
pub use reader::Reader;
pub use report::{format_error, unused_diagnostic, unused_summary};
pub use tree::{Entry, Group, NodeId, Section};
pub use value::{BOOLEAN_TABLE, ColonSeparated, LookupTable, Parseable, parse, parse_optional};
pub use writer::write_document;
