/*
 * utils.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversions between byte offsets and line/column positions.
//!
//! Rows and columns are 0-based; columns count characters, not bytes.

use crate::types::{Location, Span};
use std::ops::Range;

/// Line and column of `offset`, or `None` past the end of `source`.
pub fn offset_to_location(source: &str, offset: usize) -> Option<Location> {
    let before = source.get(..offset)?;
    let row = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    Some(Location {
        offset,
        row,
        column: before[line_start..].chars().count(),
    })
}

/// Byte offset of a 0-based `line` and character `col`.
///
/// The column may point just past the last character of the line, but not
/// beyond it.
pub fn line_col_to_offset(source: &str, line: usize, col: usize) -> Option<usize> {
    let line_start = if line == 0 {
        0
    } else {
        source.match_indices('\n').nth(line - 1)?.0 + 1
    };
    let text = &source[line_start..];
    let text = &text[..text.find('\n').unwrap_or(text.len())];
    if col == text.chars().count() {
        return Some(line_start + text.len());
    }
    text.char_indices().nth(col).map(|(i, _)| line_start + i)
}

/// Largest char boundary of `source` at or before `offset`.
pub fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Smallest char boundary of `source` at or after `offset`.
pub fn ceil_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}

/// Widen `span` to whole characters of `source`, clamped to its end.
pub fn snap_span(source: &str, span: Span) -> Span {
    let start = floor_char_boundary(source, span.offset);
    let end = ceil_char_boundary(source, span.end().max(start));
    Span::new(start, end - start)
}

/// Byte range of the line containing `offset`, excluding its newline.
///
/// Offsets past the end of the source resolve to the last line, and offsets
/// inside a character resolve to that character. An offset pointing at a
/// newline belongs to the line that newline terminates.
pub fn line_bounds(source: &str, offset: usize) -> Range<usize> {
    let offset = floor_char_boundary(source, offset);
    let start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = source[offset..]
        .find('\n')
        .map_or(source.len(), |i| offset + i);
    start..end
}
