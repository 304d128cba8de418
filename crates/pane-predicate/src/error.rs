/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Compile errors for predicate expressions.

use crate::program::ProgramError;
use pane_config::{ConfigError, LexError, RangeError, SyntaxErrorKind};
use thiserror::Error;

/// Result type alias for pane-predicate operations.
pub type PredicateResult<T> = std::result::Result<T, PredicateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PredicateErrorKind {
    #[error("invalid operator")]
    InvalidOperator,
    #[error("missing operator before this")]
    MissingOperator,
    #[error("missing left operand")]
    MissingLeftOperand,
    #[error("missing operand before ')'")]
    MissingOperand,
    #[error("unexpected closing parenthesis")]
    UnexpectedClosingParenthesis,
    #[error("missing closing parenthesis")]
    MissingClosingParenthesis,
    #[error("expression does not have a value")]
    ExpressionWithoutValue,
    #[error("unknown token")]
    UnknownToken,
    #[error("malformed token: {0}")]
    MalformedToken(SyntaxErrorKind),
    /// The compiler produced an unbalanced program. Never expected.
    #[error("internal error: {0}")]
    InvalidProgram(ProgramError),
}

impl PredicateErrorKind {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            PredicateErrorKind::InvalidOperator => Some("P-4-1"),
            PredicateErrorKind::MissingOperator => Some("P-4-2"),
            PredicateErrorKind::MissingLeftOperand => Some("P-4-3"),
            PredicateErrorKind::MissingOperand => Some("P-4-4"),
            PredicateErrorKind::UnexpectedClosingParenthesis => Some("P-4-5"),
            PredicateErrorKind::MissingClosingParenthesis => Some("P-4-6"),
            PredicateErrorKind::ExpressionWithoutValue => Some("P-4-7"),
            PredicateErrorKind::UnknownToken => Some("P-4-8"),
            PredicateErrorKind::MalformedToken(_) => Some("P-4-9"),
            PredicateErrorKind::InvalidProgram(_) => None,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PredicateErrorKind::InvalidOperator => Some("write '&&' or '||' in full?"),
            PredicateErrorKind::MissingOperator => {
                Some("combine conditions with '&&' or '||'?")
            }
            PredicateErrorKind::MissingLeftOperand => {
                Some("add a condition before the operator?")
            }
            PredicateErrorKind::MissingOperand => Some("add a condition before ')'?"),
            PredicateErrorKind::UnexpectedClosingParenthesis => {
                Some("remove the ')' or add a matching '('?")
            }
            PredicateErrorKind::MissingClosingParenthesis => Some("add a matching ')'?"),
            PredicateErrorKind::ExpressionWithoutValue => {
                Some("end the expression with a condition?")
            }
            PredicateErrorKind::UnknownToken => {
                Some("use a known condition, 'true' or 'false'?")
            }
            PredicateErrorKind::MalformedToken(_) | PredicateErrorKind::InvalidProgram(_) => None,
        }
    }
}

/// A compile error located within the expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct PredicateError {
    pub kind: PredicateErrorKind,
    pub offset: usize,
    pub size: usize,
}

impl PredicateError {
    pub fn new(kind: PredicateErrorKind, offset: usize, size: usize) -> Self {
        Self { kind, offset, size }
    }

    /// A reader error inside a token, with `base` the token's own offset.
    pub(crate) fn malformed(err: LexError, base: usize) -> Self {
        Self::new(
            PredicateErrorKind::MalformedToken(err.kind),
            base + err.offset,
            1,
        )
    }
}

impl From<PredicateError> for RangeError {
    fn from(err: PredicateError) -> Self {
        let mut range = RangeError::new(err.offset, err.size, err.kind.to_string());
        if let Some(code) = err.kind.code() {
            range = range.with_code(code);
        }
        if let Some(hint) = err.kind.hint() {
            range = range.with_hint(hint);
        }
        range
    }
}

impl From<PredicateError> for ConfigError {
    fn from(err: PredicateError) -> Self {
        ConfigError::Range(err.into())
    }
}
