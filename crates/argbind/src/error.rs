use std::fmt;

use thiserror::Error;

use crate::tokenizer::{RawValue, Token};
use crate::value::ArgType;

/// The shape of the raw input a field received, reported on type mismatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A bare switch with no `=value`.
    Present,
    Value(String),
    /// A repeated switch; carries the number of occurrences.
    Values(usize),
}

impl Shape {
    pub fn of(raw: &RawValue) -> Self {
        match raw {
            RawValue::One(Token::Present) => Self::Present,
            RawValue::One(Token::Value(s)) => Self::Value(s.clone()),
            RawValue::Many(tokens) => Self::Values(tokens.len()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("a bare switch"),
            Self::Value(s) => write!(f, "the value {s:?}"),
            Self::Values(n) => write!(f, "{n} values"),
        }
    }
}

/// Errors raised while binding argv onto a definition set.
///
/// Every variant is terminal for the parse call that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(
        "you may not use both the long name (--{long}) and short name (-{short}) of an argument at the same time"
    )]
    ConflictingAlias { long: String, short: String },

    #[error("undefined arguments: {}", .names.join(", "))]
    UnknownArguments { names: Vec<String> },

    #[error("{}", missing_message(.long, .short.as_deref()))]
    MissingArgument { long: String, short: Option<String> },

    #[error("argument --{name} expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ArgType,
        actual: Shape,
    },

    #[error("invalid argument definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),

    #[error("cannot hydrate field '{name}': {reason}")]
    Hydration { name: String, reason: String },
}

fn missing_message(long: &str, short: Option<&str>) -> String {
    match short {
        Some(short) => format!("required argument --{long} (or short name -{short}) not found"),
        None => format!("required argument --{long} not found"),
    }
}

/// A definition set that cannot be bound against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("argument names must not be empty")]
    EmptyName,

    #[error("field '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("long name --{0} is declared more than once")]
    DuplicateLong(String),

    #[error("short name -{0} is declared more than once")]
    DuplicateShort(String),

    #[error("short name -{short} of '{name}' collides with the long name of another argument")]
    ShortShadowsLong { name: String, short: String },

    #[error("default for '{name}' is {actual} but the argument is declared {expected}")]
    DefaultTypeMismatch {
        name: String,
        expected: ArgType,
        actual: ArgType,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
