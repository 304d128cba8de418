/*
 * compiler.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Operator-precedence compiler from expression text to [`Program`].
//!
//! Precedence, tightest first: `!`, `&&`, `||`. The compiler is a single
//! pass over the tokens. Each binary operator emits `Store` as soon as it is
//! read, saving its left operand before the right operand is compiled; the
//! operator itself is emitted once an operator of equal or looser precedence,
//! a `)`, or the end of input follows.

use crate::error::{PredicateError, PredicateErrorKind, PredicateResult};
use crate::program::{Command, Leaf, Program};
use crate::token::{Token, TokenKind, Tokenizer};
use pane_config::{BOOLEAN_TABLE, Reader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Not,
    And,
    Or,
    Open,
}

impl Operator {
    fn precedence(self) -> u8 {
        match self {
            Operator::Not => 0,
            Operator::And => 1,
            Operator::Or => 2,
            Operator::Open => u8::MAX,
        }
    }

    fn command<L>(self) -> Option<Command<L>> {
        match self {
            Operator::Not => Some(Command::Not),
            Operator::And => Some(Command::And),
            Operator::Or => Some(Command::Or),
            Operator::Open => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    operator: Operator,
    offset: usize,
    size: usize,
}

struct Compiler<L> {
    output: Vec<Command<L>>,
    operators: Vec<Pending>,
    /// Whether the commands emitted so far end with a complete operand.
    have_value: bool,
}

/// Compile `text` into a program over leaf type `L`.
///
/// Value tokens are decoded (quotes and escapes) and offered to
/// [`Leaf::from_token`] first, then read as boolean literals.
pub fn compile<L: Leaf>(text: &str) -> PredicateResult<Program<L>> {
    let mut compiler = Compiler::new();
    for token in Tokenizer::new(text) {
        compiler.push(token?)?;
    }
    let commands = compiler.finish(text.len())?;
    let count = commands.len();
    let program = Program::new(commands).map_err(|err| {
        PredicateError::new(PredicateErrorKind::InvalidProgram(err), 0, text.len())
    })?;
    tracing::debug!(
        commands = count,
        max_depth = program.max_depth(),
        "compiled predicate"
    );
    Ok(program)
}

impl<L: Leaf> Compiler<L> {
    fn new() -> Self {
        Self {
            output: Vec::new(),
            operators: Vec::new(),
            have_value: false,
        }
    }

    fn error(kind: PredicateErrorKind, token: &Token<'_>) -> PredicateError {
        PredicateError::new(kind, token.offset, token.size())
    }

    fn push(&mut self, token: Token<'_>) -> PredicateResult<()> {
        match token.kind {
            TokenKind::Not => self.push_prefix(Operator::Not, &token),
            TokenKind::Open => self.push_prefix(Operator::Open, &token),
            TokenKind::And => self.push_binary(Operator::And, &token),
            TokenKind::Or => self.push_binary(Operator::Or, &token),
            TokenKind::Close => self.close(&token),
            TokenKind::Value => self.value(&token),
        }
    }

    fn push_prefix(&mut self, operator: Operator, token: &Token<'_>) -> PredicateResult<()> {
        if self.have_value {
            return Err(Self::error(PredicateErrorKind::MissingOperator, token));
        }
        self.operators.push(Pending {
            operator,
            offset: token.offset,
            size: token.size(),
        });
        Ok(())
    }

    fn push_binary(&mut self, operator: Operator, token: &Token<'_>) -> PredicateResult<()> {
        if !self.have_value {
            return Err(Self::error(PredicateErrorKind::MissingLeftOperand, token));
        }
        while let Some(top) = self.operators.last() {
            if top.operator.precedence() > operator.precedence() {
                break;
            }
            self.emit_top();
        }
        self.operators.push(Pending {
            operator,
            offset: token.offset,
            size: token.size(),
        });
        self.output.push(Command::Store);
        self.have_value = false;
        Ok(())
    }

    fn close(&mut self, token: &Token<'_>) -> PredicateResult<()> {
        if !self.have_value {
            return Err(Self::error(PredicateErrorKind::MissingOperand, token));
        }
        loop {
            match self.operators.last() {
                None => {
                    return Err(Self::error(
                        PredicateErrorKind::UnexpectedClosingParenthesis,
                        token,
                    ));
                }
                Some(top) if top.operator == Operator::Open => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(_) => self.emit_top(),
            }
        }
    }

    fn value(&mut self, token: &Token<'_>) -> PredicateResult<()> {
        if self.have_value {
            return Err(Self::error(PredicateErrorKind::MissingOperator, token));
        }
        let decoded = Reader::new(token.text)
            .read_until_one_of(&[])
            .map_err(|err| PredicateError::malformed(err, token.offset))?;

        let command = if let Some(leaf) = L::from_token(decoded.as_str()) {
            Command::Leaf(leaf)
        } else {
            match BOOLEAN_TABLE.lookup(decoded.as_str()) {
                Some(true) => Command::True,
                Some(false) => Command::False,
                None => return Err(Self::error(PredicateErrorKind::UnknownToken, token)),
            }
        };
        self.output.push(command);
        self.have_value = true;
        Ok(())
    }

    /// Pop the top operator and emit its command.
    fn emit_top(&mut self) {
        if let Some(command) = self.operators.pop().and_then(|p| p.operator.command()) {
            self.output.push(command);
        }
    }

    fn finish(mut self, end: usize) -> PredicateResult<Vec<Command<L>>> {
        while let Some(top) = self.operators.pop() {
            match top.operator.command() {
                Some(command) => self.output.push(command),
                None => {
                    return Err(PredicateError::new(
                        PredicateErrorKind::MissingClosingParenthesis,
                        top.offset,
                        top.size,
                    ));
                }
            }
        }
        if !self.have_value {
            return Err(PredicateError::new(
                PredicateErrorKind::ExpressionWithoutValue,
                end,
                0,
            ));
        }
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Name(String);

    impl Leaf for Name {
        fn from_token(token: &str) -> Option<Self> {
            token
                .chars()
                .all(|c| c.is_ascii_lowercase())
                .then(|| Name(token.to_string()))
        }
    }

    fn leaf(name: &str) -> Command<Name> {
        Command::Leaf(Name(name.to_string()))
    }

    fn commands(text: &str) -> Vec<Command<Name>> {
        compile::<Name>(text).unwrap().commands().to_vec()
    }

    fn error(text: &str) -> PredicateError {
        compile::<Name>(text).unwrap_err()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            commands("a && b || !c"),
            vec![
                leaf("a"),
                Command::Store,
                leaf("b"),
                Command::And,
                Command::Store,
                leaf("c"),
                Command::Not,
                Command::Or,
            ]
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            commands("a || b && c"),
            vec![
                leaf("a"),
                Command::Store,
                leaf("b"),
                Command::Store,
                leaf("c"),
                Command::And,
                Command::Or,
            ]
        );
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            commands("!(a || b)"),
            vec![leaf("a"), Command::Store, leaf("b"), Command::Or, Command::Not]
        );
    }

    #[test]
    fn test_boolean_literals_and_quoted_leaves() {
        assert_eq!(
            commands("YES && \"abc\" || 0"),
            vec![
                Command::True,
                Command::Store,
                leaf("abc"),
                Command::And,
                Command::Store,
                Command::False,
                Command::Or,
            ]
        );
    }

    #[test]
    fn test_missing_closing_parenthesis_points_at_open() {
        let err = error("(a");
        assert_eq!(err.kind, PredicateErrorKind::MissingClosingParenthesis);
        assert_eq!(err.offset, 0);

        let err = error("a && (b || (c)");
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_missing_left_operand() {
        let err = error("&& a");
        assert_eq!(err.kind, PredicateErrorKind::MissingLeftOperand);
        assert_eq!((err.offset, err.size), (0, 2));
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(error("a b").kind, PredicateErrorKind::UnknownToken);
        let err = error("a (b)");
        assert_eq!(err.kind, PredicateErrorKind::MissingOperator);
        assert_eq!(err.offset, 2);
        assert_eq!(error("(a) b").kind, PredicateErrorKind::MissingOperator);
        assert_eq!(error("a !b").kind, PredicateErrorKind::MissingOperator);
    }

    #[test]
    fn test_parenthesis_errors() {
        assert_eq!(error("a)").kind, PredicateErrorKind::UnexpectedClosingParenthesis);
        assert_eq!(error("()").kind, PredicateErrorKind::MissingOperand);
        assert_eq!(error("(a ||)").kind, PredicateErrorKind::MissingOperand);
    }

    #[test]
    fn test_expression_without_value() {
        for text in ["", "  ", "a &&", "!"] {
            let err = error(text);
            assert_eq!(err.kind, PredicateErrorKind::ExpressionWithoutValue, "{text:?}");
            assert_eq!(err.offset, text.len());
        }
    }

    #[test]
    fn test_unknown_token() {
        let err = error("a && Bad");
        assert_eq!(err.kind, PredicateErrorKind::UnknownToken);
        assert_eq!((err.offset, err.size), (5, 3));
    }

    #[test]
    fn test_malformed_token_offset() {
        let err = error(r#"a || "b" c"#);
        assert_eq!(
            err.kind,
            PredicateErrorKind::MalformedToken(pane_config::SyntaxErrorKind::UnexpectedCharacter('c'))
        );
        assert_eq!(err.offset, 9);
    }
}
