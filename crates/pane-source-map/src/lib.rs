/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source locations for pane configuration text.
//!
//! Every piece of text the engine extracts from a document remembers where it
//! came from, so that any later failure (a bad value, a duplicate key, a
//! malformed predicate) can point at the exact bytes responsible.
//!
//! # Overview
//!
//! The core types are:
//! - [`Span`]: An absolute byte range in the original source
//! - [`LocatedText`]: Decoded content paired with the span it was read from
//! - [`Location`]: A byte offset resolved to a 0-indexed row and column
//!
//! # Example
//!
//! ```rust
//! use pane_source_map::*;
//!
//! let source = "[general]\nname = \"main\"\n";
//! let text = LocatedText::new("main", 17, 6);
//!
//! assert_eq!(text.as_str(), "main");
//! assert!(text.is_transformed());
//! assert_eq!(&source[text.span().range()], "\"main\"");
//!
//! let loc = offset_to_location(source, text.offset).unwrap();
//! assert_eq!((loc.row, loc.column), (1, 7));
//! ```

pub mod located;
pub mod types;
pub mod utils;

// Re-export main types
pub use located::LocatedText;
pub use types::{Location, Span};
pub use utils::{
    ceil_char_boundary, floor_char_boundary, line_bounds, line_col_to_offset, offset_to_location,
    snap_span,
};
