/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Boolean predicate expressions over caller-defined conditions.
//!
//! An expression such as `debug && !(linux || mac)` is compiled once into a
//! [`Program`] and evaluated as often as needed. The leaf conditions are a
//! type supplied by the caller: [`Leaf`] builds them from tokens and
//! [`Predicate`] tests them against a context.
//!
//! ```rust
//! use pane_predicate::{Leaf, Predicate, compile};
//! use std::collections::HashSet;
//!
//! struct Flag(String);
//!
//! impl Leaf for Flag {
//!     fn from_token(token: &str) -> Option<Self> {
//!         token.starts_with('+').then(|| Flag(token[1..].to_string()))
//!     }
//! }
//!
//! impl Predicate<HashSet<&str>> for Flag {
//!     fn test(&self, flags: &HashSet<&str>) -> bool {
//!         flags.contains(self.0.as_str())
//!     }
//! }
//!
//! let program = compile::<Flag>("+debug && !(+linux || +mac)").unwrap();
//! assert!(program.evaluate(&HashSet::from(["debug"])));
//! assert!(!program.evaluate(&HashSet::from(["debug", "mac"])));
//! ```
//!
//! Programs can also be read directly from configuration values, since
//! [`Program`] implements [`pane_config::Parseable`] for any leaf type.

pub mod compiler;
pub mod error;
pub mod program;
pub mod token;

pub use compiler::compile;
pub use error::{PredicateError, PredicateErrorKind, PredicateResult};
pub use program::{Command, Leaf, Predicate, Program, ProgramError};
pub use token::{Token, TokenKind, Tokenizer};

use pane_config::{Parseable, RangeError};
use std::borrow::Cow;

impl<L: Leaf> Parseable for Program<L> {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("condition")
    }

    fn format() -> Cow<'static, str> {
        Cow::Borrowed("a boolean expression using '!', '&&', '||' and parentheses")
    }

    fn parse(text: &str) -> Option<Self> {
        compile(text).ok()
    }

    fn parse_detailed(text: &str) -> Result<Self, Option<RangeError>> {
        compile(text).map_err(|err| Some(err.into()))
    }
}
