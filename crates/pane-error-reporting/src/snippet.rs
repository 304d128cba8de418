/*
 * snippet.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Single-line source snippets with caret underlines.
//!
//! A snippet shows the line containing a span, cropped to a fixed width around
//! the span, with the span underlined on the following line:
//!
//! ```text
//! line 3 | ...d = "a very long value that keeps going and going"; other = 1
//!                                                                  ^^^^^
//! ```

use ariadne::{Color, Fmt};
use pane_source_map::{Span, line_bounds, snap_span};

/// Display width of the cropped line, in characters.
pub const DEFAULT_WIDTH: usize = 80;

const ELLIPSIS: &str = "...";

/// Options controlling how diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI colors
    pub colorize: bool,
    /// Maximum number of source characters shown per line
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colorize: false,
            width: DEFAULT_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn colored(colorize: bool) -> Self {
        Self {
            colorize,
            ..Self::default()
        }
    }
}

pub(crate) fn paint(text: &str, color: Color, colorize: bool) -> String {
    if colorize {
        text.fg(color).to_string()
    } else {
        text.to_string()
    }
}

/// Render the line containing `span` followed by a caret underline.
///
/// Only the first line of a multi-line span is underlined. A zero-width span
/// still gets a single caret so that "expected something here" positions are
/// visible, including the position just past the end of the line. Spans
/// that cut through a character are widened to cover it.
pub fn render_snippet(source: &str, span: Span, color: Color, options: &RenderOptions) -> String {
    let span = snap_span(source, span);
    let offset = span.offset;
    let bounds = line_bounds(source, offset);
    let line = &source[bounds.clone()];
    let line_number = source[..bounds.start].matches('\n').count() + 1;

    // Columns are counted in characters; tabs are shown as one space so the
    // caret line stays aligned.
    let chars: Vec<char> = line
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect();
    let column_of = |byte: usize| {
        line.char_indices()
            .take_while(|(index, _)| *index < byte)
            .count()
    };
    let start_col = column_of(offset - bounds.start);
    let end_col = column_of(span.end().clamp(offset, bounds.end) - bounds.start);
    let caret_len = end_col.saturating_sub(start_col).max(1);

    let width = options.width.max(1);
    let (window_start, window_end) = if chars.len() <= width {
        (0, chars.len())
    } else {
        let start = if caret_len >= width {
            start_col
        } else {
            (start_col + caret_len / 2).saturating_sub(width / 2)
        };
        let start = start.min(chars.len() - width);
        (start, start + width)
    };

    let prefix = format!("line {} | ", line_number);
    let mut shown = String::new();
    if window_start > 0 {
        shown.push_str(ELLIPSIS);
    }
    shown.extend(&chars[window_start..window_end]);
    if window_end < chars.len() {
        shown.push_str(ELLIPSIS);
    }

    let lead = if window_start > 0 { ELLIPSIS.len() } else { 0 };
    let visible_start = start_col.max(window_start);
    let visible_end = (start_col + caret_len)
        .min(window_end)
        .max(visible_start + 1);
    let caret_col = prefix.chars().count() + lead + visible_start - window_start;
    let carets = "^".repeat(visible_end - visible_start);

    format!(
        "{}{}\n{}{}\n",
        prefix,
        shown,
        " ".repeat(caret_col),
        paint(&carets, color, options.colorize)
    )
}
