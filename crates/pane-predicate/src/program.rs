/*
 * program.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Compiled predicate programs and their evaluator.
//!
//! A program is a flat list of [`Command`]s run by a machine with one boolean
//! register and a stack of saved values. `Store` pushes the register; `And`
//! and `Or` pop one saved value and combine it with the register. Every leaf
//! is evaluated on every run: there is no short-circuiting, so leaf tests
//! must be cheap and free of side effects.

use thiserror::Error;

/// A leaf condition that can be built from a token of an expression.
pub trait Leaf: Sized {
    /// Build a leaf from a decoded token, or `None` if the token is not a
    /// condition this leaf type understands.
    fn from_token(token: &str) -> Option<Self>;
}

/// A leaf condition that can be tested against a context.
pub trait Predicate<C: ?Sized> {
    fn test(&self, context: &C) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<L> {
    Leaf(L),
    True,
    False,
    Not,
    And,
    Or,
    Store,
}

impl<L> Command<L> {
    /// Effect of this command on the depth of the saved-value stack.
    fn stack_delta(&self) -> isize {
        match self {
            Command::Store => 1,
            Command::And | Command::Or => -1,
            _ => 0,
        }
    }
}

/// A command list whose saved-value stack is not balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("command {position} combines with a value that was never stored")]
    Unbalanced { position: usize },
    #[error("{depth} stored values are never combined")]
    Unterminated { depth: usize },
}

/// A validated predicate program.
///
/// Construction checks that no command pops from an empty stack and that the
/// stack is empty at the end, so evaluation cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program<L> {
    commands: Vec<Command<L>>,
    max_depth: usize,
}

impl<L> Program<L> {
    pub fn new(commands: Vec<Command<L>>) -> Result<Self, ProgramError> {
        let mut depth: isize = 0;
        let mut max_depth = 0;
        for (position, command) in commands.iter().enumerate() {
            depth += command.stack_delta();
            if depth < 0 {
                return Err(ProgramError::Unbalanced { position });
            }
            max_depth = max_depth.max(depth.unsigned_abs());
        }
        if depth != 0 {
            return Err(ProgramError::Unterminated {
                depth: depth.unsigned_abs(),
            });
        }
        Ok(Self {
            commands,
            max_depth,
        })
    }

    pub fn commands(&self) -> &[Command<L>] {
        &self.commands
    }

    /// Largest number of values saved at once during evaluation.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run the program, testing each leaf with `test`.
    pub fn evaluate_with(&self, mut test: impl FnMut(&L) -> bool) -> bool {
        let mut current = false;
        let mut saved = Vec::with_capacity(self.max_depth);
        for command in &self.commands {
            match command {
                Command::Leaf(leaf) => current = test(leaf),
                Command::True => current = true,
                Command::False => current = false,
                Command::Not => current = !current,
                Command::Store => saved.push(current),
                Command::And | Command::Or => {
                    let Some(left) = saved.pop() else {
                        unreachable!("stack depth is checked in Program::new");
                    };
                    current = if matches!(command, Command::And) {
                        left & current
                    } else {
                        left | current
                    };
                }
            }
        }
        current
    }

    /// Run the program against `context`.
    pub fn evaluate<C: ?Sized>(&self, context: &C) -> bool
    where
        L: Predicate<C>,
    {
        self.evaluate_with(|leaf| leaf.test(context))
    }
}
