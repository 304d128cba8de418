/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Conversion of entry values into typed values.
//!
//! A type becomes readable from a document by implementing [`Parseable`].
//! Implementations exist for the integer and float primitives, `String`,
//! `bool` and [`ColonSeparated`] lists. Enumerations with a fixed set of
//! spellings can be declared with a [`LookupTable`] and the
//! [`lookup_parser!`](crate::lookup_parser) macro:
//!
//! ```
//! use pane_config::{LookupTable, lookup_parser, parse_document};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Align {
//!     Left,
//!     Right,
//! }
//!
//! static ALIGN: LookupTable<Align> =
//!     LookupTable::new(&[(&["left", "l"], Align::Left), (&["right", "r"], Align::Right)]);
//! lookup_parser!(Align, "alignment", ALIGN);
//!
//! let doc = parse_document("align = L\n").unwrap();
//! assert_eq!(doc.root().require_as::<Align>("align").unwrap(), Align::Left);
//! ```

use crate::document::EntryRef;
use crate::error::{ConfigError, ConfigResult, RangeError};
use std::borrow::Cow;

/// A type that can be read from the text of a value.
pub trait Parseable: Sized {
    /// Short name of the type, shown in error messages.
    fn name() -> Cow<'static, str>;

    /// Description of the accepted syntax, shown in error messages.
    fn format() -> Cow<'static, str>;

    fn parse(text: &str) -> Option<Self>;

    /// Parse, optionally locating the problem within `text`.
    ///
    /// Composite parsers override this to point at the failing component.
    fn parse_detailed(text: &str) -> Result<Self, Option<RangeError>> {
        Self::parse(text).ok_or(None)
    }
}

/// Convert the value of `entry`, marking it as used.
pub fn parse<T: Parseable>(entry: EntryRef<'_>) -> ConfigResult<T> {
    let value = entry.value();
    T::parse_detailed(value.as_str()).map_err(|range| {
        tracing::debug!(
            type_name = %T::name(),
            offset = value.offset,
            "rejected value"
        );
        ConfigError::ValueParse {
            entry: Box::new(entry.entry().clone()),
            type_name: T::name().into_owned(),
            format: T::format().into_owned(),
            range,
        }
    })
}

/// Convert the value of an optional entry; an absent entry yields `None`.
pub fn parse_optional<T: Parseable>(entry: Option<EntryRef<'_>>) -> ConfigResult<Option<T>> {
    entry.map(parse).transpose()
}

macro_rules! integer_parsers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Parseable for $ty {
                fn name() -> Cow<'static, str> {
                    Cow::Borrowed("integer")
                }

                fn format() -> Cow<'static, str> {
                    Cow::Owned(format!(
                        "a whole number between {} and {}",
                        <$ty>::MIN,
                        <$ty>::MAX
                    ))
                }

                fn parse(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

integer_parsers!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! float_parsers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Parseable for $ty {
                fn name() -> Cow<'static, str> {
                    Cow::Borrowed("number")
                }

                fn format() -> Cow<'static, str> {
                    Cow::Borrowed("a finite decimal number such as 1.5 or -2e3")
                }

                fn parse(text: &str) -> Option<Self> {
                    text.parse::<$ty>().ok().filter(|value| value.is_finite())
                }
            }
        )*
    };
}

float_parsers!(f32, f64);

impl Parseable for String {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }

    fn format() -> Cow<'static, str> {
        Cow::Borrowed("any text")
    }

    fn parse(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// A fixed set of case-insensitive spellings for each value of `T`.
#[derive(Debug)]
pub struct LookupTable<T: 'static> {
    entries: &'static [(&'static [&'static str], T)],
}

impl<T: Clone + 'static> LookupTable<T> {
    pub const fn new(entries: &'static [(&'static [&'static str], T)]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, text: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(spellings, _)| spellings.iter().any(|s| s.eq_ignore_ascii_case(text)))
            .map(|(_, value)| value.clone())
    }

    /// Human-readable list of accepted spellings, alternatives joined by `/`.
    pub fn describe(&self) -> String {
        let choices: Vec<String> = self
            .entries
            .iter()
            .map(|(spellings, _)| spellings.join("/"))
            .collect();
        format!("one of {}", choices.join(", "))
    }
}

/// Implement [`Parseable`] for a type through a [`LookupTable`].
///
/// `lookup_parser!(Type, "name", TABLE)` where `TABLE` is a
/// `LookupTable<Type>` in scope.
#[macro_export]
macro_rules! lookup_parser {
    ($ty:ty, $name:expr, $table:expr) => {
        impl $crate::Parseable for $ty {
            fn name() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed($name)
            }

            fn format() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Owned($table.describe())
            }

            fn parse(text: &str) -> ::std::option::Option<Self> {
                $table.lookup(text)
            }
        }
    };
}

pub static BOOLEAN_TABLE: LookupTable<bool> = LookupTable::new(&[
    (&["true", "t", "yes", "y", "1"], true),
    (&["false", "f", "no", "n", "0"], false),
]);

lookup_parser!(bool, "boolean", BOOLEAN_TABLE);

/// A list of values separated by `:`, such as `8080:8081:8082`.
///
/// Whitespace around each component is ignored. A rejected component is
/// reported at its own position within the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonSeparated<T>(pub Vec<T>);

impl<T: Parseable> Parseable for ColonSeparated<T> {
    fn name() -> Cow<'static, str> {
        Cow::Owned(format!("list of {}", T::name()))
    }

    fn format() -> Cow<'static, str> {
        Cow::Owned(format!("{} values separated by ':'", T::name()))
    }

    fn parse(text: &str) -> Option<Self> {
        Self::parse_detailed(text).ok()
    }

    fn parse_detailed(text: &str) -> Result<Self, Option<RangeError>> {
        let mut items = Vec::new();
        let mut start = 0;
        for part in text.split(':') {
            let trimmed = part.trim();
            let offset = start + (part.len() - part.trim_start().len());
            match T::parse_detailed(trimmed) {
                Ok(item) => items.push(item),
                Err(inner) => {
                    let error = match inner {
                        Some(inner) => inner.shifted(offset),
                        None => RangeError::new(
                            offset,
                            trimmed.len(),
                            format!("'{}' is not a valid {}: expected {}", trimmed, T::name(), T::format()),
                        ),
                    };
                    return Err(Some(error));
                }
            }
            start += part.len() + 1;
        }
        Ok(Self(items))
    }
}
