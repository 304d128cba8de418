/*
 * located.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text extracted from a source together with where it came from.

use crate::types::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded string content paired with its originating byte range.
///
/// `size` always describes the *source* span. For plain content it equals the
/// byte length of `content`; for content that went through quote removal or
/// escape decoding it can differ, and [`LocatedText::is_transformed`] reports
/// that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocatedText {
    /// The decoded content
    pub content: String,
    /// Absolute byte offset of the first source byte
    pub offset: usize,
    /// Number of source bytes the content was read from
    pub size: usize,
}

impl LocatedText {
    pub fn new(content: impl Into<String>, offset: usize, size: usize) -> Self {
        Self {
            content: content.into(),
            offset,
            size,
        }
    }

    /// Located text whose source span is exactly its content.
    pub fn verbatim(content: impl Into<String>, offset: usize) -> Self {
        let content = content.into();
        let size = content.len();
        Self {
            content,
            offset,
            size,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the source span differs from the decoded content
    /// (quotes were stripped or escapes decoded).
    pub fn is_transformed(&self) -> bool {
        self.size != self.content.len()
    }
}

impl fmt::Display for LocatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl AsRef<str> for LocatedText {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_text_is_not_transformed() {
        let text = LocatedText::verbatim("width", 12);
        assert_eq!(text.size, 5);
        assert_eq!(text.span(), Span::new(12, 5));
        assert!(!text.is_transformed());
    }

    #[test]
    fn test_quoted_text_is_transformed() {
        // "a b" in the source decodes to a b
        let text = LocatedText::new("a b", 0, 5);
        assert!(text.is_transformed());
        assert_eq!(text.to_string(), "a b");
    }
}
