/*
 * reader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lexical reader shared by the document parser and the predicate tokenizer.
//!
//! The reader is a cursor over immutable text. It knows about comments,
//! whitespace, quoting and backslash escapes, but nothing about the grammar
//! built on top of it. Errors carry the reader's offset at the point of
//! failure so callers can report them precisely.

use crate::error::{LexError, SyntaxErrorKind};
use pane_source_map::LocatedText;

/// A cursor over source text with byte-offset tracking.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    text: &'a str,
    offset: usize,
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

impl<'a> Reader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    /// Current byte offset into the text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn eof(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The unread remainder of the text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Text between two byte offsets previously returned by [`Reader::offset`].
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Advance past `n` characters (or to the end of the text).
    pub fn skip(&mut self, n: usize) {
        for _ in 0..n {
            match self.peek() {
                Some(c) => self.offset += c.len_utf8(),
                None => break,
            }
        }
    }

    /// Consume `#` comments (up to and including the end of line) and any
    /// whitespace, across lines.
    pub fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            if c == '#' {
                match self.rest().find('\n') {
                    Some(newline) => self.offset += newline + 1,
                    None => self.offset = self.text.len(),
                }
            } else if c.is_whitespace() {
                self.skip(1);
            } else {
                break;
            }
        }
    }

    /// Consume whitespace of any kind, including newlines.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip(1);
        }
    }

    /// Consume spaces and tabs, stopping at a newline.
    pub fn skip_whitespace_within_line(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.skip(1);
        }
    }

    /// Advance to the next character in `controls`, or to the end of input.
    ///
    /// Control characters inside quotes or right after a backslash do not
    /// stop the scan. A quoted span must close before the end of its line.
    pub fn skip_until(&mut self, controls: &[char]) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            if controls.contains(&c) {
                break;
            }
            match c {
                '\\' => {
                    self.skip_escape()?;
                }
                c if is_quote(c) => {
                    self.skip_quoted(c)?;
                }
                _ => self.skip(1),
            }
        }
        Ok(())
    }

    /// Read one token that ends at the first unescaped character in `controls`.
    ///
    /// Leading spaces and tabs are skipped. Unquoted content has its escapes
    /// decoded (`\n` becomes a newline, `\X` becomes `X`) and trailing
    /// whitespace trimmed; the returned span ends at the last significant
    /// character. Quoted content is decoded up to the matching quote, after
    /// which only whitespace may precede a control character or the end of
    /// input.
    pub fn read_until_one_of(&mut self, controls: &[char]) -> Result<LocatedText, LexError> {
        self.skip_whitespace_within_line();
        match self.peek() {
            Some(q) if is_quote(q) => self.read_quoted(q, controls),
            _ => self.read_unquoted(controls),
        }
    }

    fn read_unquoted(&mut self, controls: &[char]) -> Result<LocatedText, LexError> {
        let start = self.offset;
        let mut content = String::new();
        // Length of `content` and source offset just past the last
        // significant character.
        let mut content_end = 0;
        let mut source_end = start;

        while let Some(c) = self.peek() {
            if controls.contains(&c) {
                break;
            }
            if c == '\\' {
                content.push(self.read_escape()?);
                content_end = content.len();
                source_end = self.offset;
            } else {
                content.push(c);
                self.skip(1);
                if !c.is_whitespace() {
                    content_end = content.len();
                    source_end = self.offset;
                }
            }
        }

        content.truncate(content_end);
        Ok(LocatedText::new(content, start, source_end - start))
    }

    fn read_quoted(&mut self, quote: char, controls: &[char]) -> Result<LocatedText, LexError> {
        let start = self.offset;
        self.skip(1);
        let mut content = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError::new(SyntaxErrorKind::MissingQuote, start));
                }
                Some(c) if c == quote => {
                    self.skip(1);
                    break;
                }
                Some('\\') => content.push(self.read_escape()?),
                Some(c) => {
                    content.push(c);
                    self.skip(1);
                }
            }
        }

        let end = self.offset;
        self.skip_whitespace_within_line();
        match self.peek() {
            Some(c) if !controls.contains(&c) => Err(LexError::new(
                SyntaxErrorKind::UnexpectedCharacter(c),
                self.offset,
            )),
            _ => Ok(LocatedText::new(content, start, end - start)),
        }
    }

    /// Consume a backslash and the character it escapes, returning the
    /// decoded character.
    fn read_escape(&mut self) -> Result<char, LexError> {
        let escape_offset = self.offset;
        self.skip(1);
        let escaped = self
            .peek()
            .ok_or(LexError::new(SyntaxErrorKind::IncompleteEscape, escape_offset))?;
        self.skip(1);
        Ok(if escaped == 'n' { '\n' } else { escaped })
    }

    fn skip_escape(&mut self) -> Result<(), LexError> {
        self.read_escape().map(|_| ())
    }

    fn skip_quoted(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.offset;
        self.skip(1);
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError::new(SyntaxErrorKind::MissingQuote, start));
                }
                Some('\\') => self.skip_escape()?,
                Some(c) => {
                    self.skip(1);
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_ignored_crosses_comments_and_lines() {
        let mut reader = Reader::new("  # comment\n\n\t# another\n  key");
        reader.skip_ignored();
        assert_eq!(reader.rest(), "key");
    }

    #[test]
    fn test_skip_ignored_comment_at_end_of_input() {
        let mut reader = Reader::new("# only a comment");
        reader.skip_ignored();
        assert!(reader.eof());
    }

    #[test]
    fn test_skip_whitespace_within_line_stops_at_newline() {
        let mut reader = Reader::new(" \t \nnext");
        reader.skip_whitespace_within_line();
        assert_eq!(reader.peek(), Some('\n'));
        assert_eq!(reader.offset(), 3);
    }

    #[test]
    fn test_skip_counts_characters() {
        let mut reader = Reader::new("éa");
        reader.skip(1);
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.peek(), Some('a'));
        reader.skip(5);
        assert!(reader.eof());
    }

    #[test]
    fn test_skip_until_ignores_quoted_and_escaped_controls() {
        let mut reader = Reader::new(r#"a "&&" \& b && c"#);
        reader.skip_until(&['&']).unwrap();
        assert_eq!(reader.offset(), 12);
        assert_eq!(reader.rest(), "&& c");
    }

    #[test]
    fn test_skip_until_unclosed_quote() {
        let mut reader = Reader::new("ab 'cd\nef");
        let err = reader.skip_until(&['&']).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MissingQuote);
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_skip_until_trailing_backslash() {
        let mut reader = Reader::new("abc\\");
        let err = reader.skip_until(&['&']).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::IncompleteEscape);
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_read_unquoted_trims_and_locates() {
        let mut reader = Reader::new("  some value  ;rest");
        let text = reader.read_until_one_of(&[';']).unwrap();
        assert_eq!(text.as_str(), "some value");
        assert_eq!(text.offset, 2);
        assert_eq!(text.size, 10);
        assert_eq!(reader.peek(), Some(';'));
    }

    #[test]
    fn test_read_unquoted_decodes_escapes() {
        let mut reader = Reader::new(r"a\;b\nc;");
        let text = reader.read_until_one_of(&[';']).unwrap();
        assert_eq!(text.as_str(), "a;b\nc");
        assert_eq!(text.offset, 0);
        assert_eq!(text.size, 7);
        assert!(text.is_transformed());
    }

    #[test]
    fn test_read_unquoted_keeps_escaped_trailing_space() {
        let mut reader = Reader::new("ab\\  \n");
        let text = reader.read_until_one_of(&['\n']).unwrap();
        assert_eq!(text.as_str(), "ab ");
        assert_eq!(text.size, 4);
    }

    #[test]
    fn test_read_unquoted_empty() {
        let mut reader = Reader::new("   \nx");
        let text = reader.read_until_one_of(&['\n']).unwrap();
        assert_eq!(text.as_str(), "");
        assert_eq!(text.offset, 3);
        assert_eq!(text.size, 0);
    }

    #[test]
    fn test_read_quoted() {
        let mut reader = Reader::new(r#" "a \"b\" ;c"  ; next"#);
        let text = reader.read_until_one_of(&[';']).unwrap();
        assert_eq!(text.as_str(), r#"a "b" ;c"#);
        assert_eq!(text.offset, 1);
        assert_eq!(text.size, 12);
        assert_eq!(reader.peek(), Some(';'));
    }

    #[test]
    fn test_read_quoted_at_end_of_input() {
        let mut reader = Reader::new("'single'");
        let text = reader.read_until_one_of(&[';']).unwrap();
        assert_eq!(text.as_str(), "single");
        assert!(reader.eof());
    }

    #[test]
    fn test_read_quoted_followed_by_garbage() {
        let mut reader = Reader::new(r#""a" b;"#);
        let err = reader.read_until_one_of(&[';']).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedCharacter('b'));
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_read_quoted_missing_quote() {
        let mut reader = Reader::new("x = 'abc\n");
        reader.skip(3);
        let err = reader.read_until_one_of(&[';', '\n']).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MissingQuote);
        assert_eq!(err.offset, 4);
    }
}
