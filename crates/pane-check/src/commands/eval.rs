/*
 * eval.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `pane-check eval`: compile a predicate over named flags and run it.

use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;

use pane_config::{BOOLEAN_TABLE, ConfigError, format_error};
use pane_predicate::{Leaf, Predicate, compile};

/// A named flag, true when it appears in the set passed with `--set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag(String);

impl Leaf for Flag {
    fn from_token(token: &str) -> Option<Self> {
        // Leave boolean words to the literal table
        if BOOLEAN_TABLE.lookup(token).is_some() {
            return None;
        }
        let valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
        valid.then(|| Flag(token.to_string()))
    }
}

impl Predicate<BTreeSet<String>> for Flag {
    fn test(&self, flags: &BTreeSet<String>) -> bool {
        flags.contains(&self.0)
    }
}

/// Execute the eval command
pub fn execute(expression: &str, flags: Vec<String>, show_program: bool) -> Result<ExitCode> {
    let program = match compile::<Flag>(expression) {
        Ok(program) => program,
        Err(err) => {
            let colorize = std::io::stderr().is_terminal();
            eprint!(
                "{}",
                format_error(&ConfigError::from(err), expression, colorize)
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    if show_program {
        for (index, command) in program.commands().iter().enumerate() {
            println!("{index:>3}  {command:?}");
        }
    }

    let flags: BTreeSet<String> = flags.into_iter().collect();
    println!("{}", program.evaluate(&flags));
    Ok(ExitCode::SUCCESS)
}
