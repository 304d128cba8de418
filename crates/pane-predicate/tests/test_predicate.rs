/*
 * test_predicate.rs
 * Copyright (c) 2025 Posit, PBC
 */

use insta::assert_snapshot;
use pane_config::{ConfigError, format_error, parse_document};
use pane_predicate::{
    Command, Leaf, Predicate, PredicateErrorKind, Program, ProgramError, compile,
};
use pretty_assertions::assert_eq;
use std::cell::Cell;

/// Single-letter variables looked up in a slice of booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Var(char);

impl Leaf for Var {
    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Some(Var(c)),
            _ => None,
        }
    }
}

struct Vars<'a> {
    values: &'a [(char, bool)],
    calls: Cell<usize>,
}

impl<'a> Vars<'a> {
    fn new(values: &'a [(char, bool)]) -> Self {
        Self {
            values,
            calls: Cell::new(0),
        }
    }
}

impl Predicate<Vars<'_>> for Var {
    fn test(&self, vars: &Vars<'_>) -> bool {
        vars.calls.set(vars.calls.get() + 1);
        vars.values
            .iter()
            .find(|(name, _)| *name == self.0)
            .is_some_and(|(_, value)| *value)
    }
}

#[test]
fn test_precedence_evaluation() {
    let program = compile::<Var>("a && b || !c").unwrap();
    assert!(program.evaluate(&Vars::new(&[('a', true), ('b', false), ('c', false)])));
    assert!(!program.evaluate(&Vars::new(&[('a', true), ('b', false), ('c', true)])));
}

#[test]
fn test_evaluation_does_not_short_circuit() {
    let program = compile::<Var>("a && b && c || d").unwrap();
    let vars = Vars::new(&[('a', false)]);
    assert!(!program.evaluate(&vars));
    assert_eq!(vars.calls.get(), 4);
}

#[test]
fn test_program_is_reusable() {
    let program = compile::<Var>("(a || b) && !c").unwrap();
    let cases = [
        ([('a', true), ('b', false), ('c', false)], true),
        ([('a', false), ('b', false), ('c', false)], false),
        ([('a', false), ('b', true), ('c', true)], false),
    ];
    for (values, expected) in cases {
        assert_eq!(program.evaluate(&Vars::new(&values)), expected, "{values:?}");
    }
}

#[test]
fn test_missing_closing_parenthesis() {
    let err = compile::<Var>("(a").unwrap_err();
    assert_eq!(err.kind, PredicateErrorKind::MissingClosingParenthesis);
    assert_eq!(err.offset, 0);
}

#[test]
fn test_missing_left_operand() {
    let err = compile::<Var>("&& a").unwrap_err();
    assert_eq!(err.kind, PredicateErrorKind::MissingLeftOperand);
    assert_eq!(err.offset, 0);
}

#[test]
fn test_compiled_programs_are_balanced() {
    for text in ["a", "!a", "a && b", "(a || b) && (c || !d)", "!(!(a && (b)))"] {
        let program = compile::<Var>(text).unwrap();
        let rebuilt = Program::new(program.commands().to_vec());
        assert_eq!(rebuilt.as_ref(), Ok(&program), "{text}");
    }
}

#[test]
fn test_hand_built_program_is_checked() {
    let err = Program::new(vec![Command::Leaf(Var('a')), Command::Or]).unwrap_err();
    assert_eq!(err, ProgramError::Unbalanced { position: 1 });
}

#[test]
fn test_program_from_config_value() {
    let source = "[rule]\nwhen = a && (b || c)\n";
    let doc = parse_document(source).unwrap();
    let program: Program<Var> = doc
        .root()
        .subsection("rule")
        .unwrap()
        .require_as("when")
        .unwrap();
    assert!(program.evaluate(&Vars::new(&[('a', true), ('c', true)])));
    assert!(doc.unused_keys().is_empty());
}

#[test]
fn test_config_value_error_is_located_in_the_value() {
    let source = "when = \"a && (b || c\"\n";
    let doc = parse_document(source).unwrap();
    let err = doc.root().require_as::<Program<Var>>("when").unwrap_err();
    assert_snapshot!(format_error(&err, source, false), @r#"
    error[P-3-1]: invalid value for 'when'
    missing closing parenthesis
    line 1 | when = "a && (b || c"
                          ^
    ℹ in this value, expected condition: a boolean expression using '!', '&&', '||' and parentheses
    line 1 | when = "a && (b || c"
                    ^^^^^^^^^^^^^^
    ? add a matching ')'?
    "#);
}

#[test]
fn test_escaped_non_ascii_value_error() {
    let source = "when = \\é&x\n";
    let doc = parse_document(source).unwrap();
    let err = doc.root().require_as::<Program<Var>>("when").unwrap_err();
    assert_snapshot!(format_error(&err, source, false), @r#"
    error[P-3-1]: invalid value for 'when'
    invalid operator
    line 1 | when = \é&x
                      ^
    ℹ in this value, expected condition: a boolean expression using '!', '&&', '||' and parentheses
    line 1 | when = \é&x
                    ^^^^
    ? write '&&' or '||' in full?
    "#);
}

#[test]
fn test_standalone_expression_error() {
    let expression = "a & b";
    let err: ConfigError = compile::<Var>(expression).unwrap_err().into();
    assert_eq!(
        format_error(&err, expression, false),
        "error[P-4-1]: invalid operator\n\
         line 1 | a & b\n           ^\n\
         ? write '&&' or '||' in full?\n"
    );
}
