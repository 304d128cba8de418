/*
 * token.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tokenizer for predicate expressions.
//!
//! Operators are `!`, `&&`, `||`, `(` and `)`. Everything else up to the next
//! operator character is one value token; operator characters inside quotes
//! or after a backslash belong to the value.

use crate::error::{PredicateError, PredicateErrorKind, PredicateResult};
use pane_config::Reader;

const OPERATOR_CHARS: &[char] = &['!', '&', '|', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Not,
    And,
    Or,
    Open,
    Close,
    Value,
}

/// A token and its location in the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Source text of the token; value tokens are not yet decoded and have
    /// trailing whitespace removed.
    pub text: &'a str,
    pub offset: usize,
}

impl Token<'_> {
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

/// Iterator over the tokens of an expression. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::new(text),
            failed: false,
        }
    }

    fn operator(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
        let offset = self.reader.offset();
        self.reader.skip(len);
        Token {
            kind,
            text: self.reader.slice(offset, self.reader.offset()),
            offset,
        }
    }

    fn next_token(&mut self, first: char) -> PredicateResult<Token<'a>> {
        let offset = self.reader.offset();
        match first {
            '!' => Ok(self.operator(TokenKind::Not, 1)),
            '(' => Ok(self.operator(TokenKind::Open, 1)),
            ')' => Ok(self.operator(TokenKind::Close, 1)),
            '&' | '|' => {
                if self.reader.rest()[1..].starts_with(first) {
                    let kind = if first == '&' {
                        TokenKind::And
                    } else {
                        TokenKind::Or
                    };
                    Ok(self.operator(kind, 2))
                } else {
                    Err(PredicateError::new(
                        PredicateErrorKind::InvalidOperator,
                        offset,
                        1,
                    ))
                }
            }
            _ => {
                self.reader
                    .skip_until(OPERATOR_CHARS)
                    .map_err(|err| PredicateError::malformed(err, 0))?;
                let text = self.reader.slice(offset, self.reader.offset()).trim_end();
                Ok(Token {
                    kind: TokenKind::Value,
                    text,
                    offset,
                })
            }
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = PredicateResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.reader.skip_whitespace();
        let first = self.reader.peek()?;
        let token = self.next_token(first);
        self.failed = token.is_err();
        Some(token)
    }
}
