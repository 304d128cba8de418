/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Core types for source positions

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A location in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Byte offset from start of source
    pub offset: usize,
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

/// An absolute byte range in the original source.
///
/// A span with `size == 0` marks a position rather than a range (for example
/// the end of input where a closing character was expected).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte
    pub offset: usize,
    /// Number of bytes covered
    pub size: usize,
}

impl Span {
    pub fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// A zero-width span at `offset`.
    pub fn point(offset: usize) -> Self {
        Self { offset, size: 0 }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Build a span from a sub-range expressed relative to this span,
    /// clamped so that it never leaves this span.
    pub fn sub_span(&self, relative_offset: usize, size: usize) -> Span {
        let start = self.offset + relative_offset.min(self.size);
        let end = (start + size).min(self.end());
        Span::new(start, end - start)
    }
}
